//! Application layer - Use cases, ports and transfer objects

pub mod dto;
pub mod ports;
pub mod services;
