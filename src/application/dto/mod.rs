//! Data Transfer Objects - For API boundaries
//!
//! Request and response shapes of the HTTP surface; the domain types they
//! wrap keep their own serialized form.

pub mod catalog;
pub mod preset;

pub use catalog::*;
pub use preset::*;
