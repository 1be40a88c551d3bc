//! Random source backed by the thread-local RNG

use rand::Rng;

use crate::application::ports::outbound::RandomPort;

#[derive(Debug, Clone, Default)]
pub struct ThreadRngAdapter;

impl ThreadRngAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl RandomPort for ThreadRngAdapter {
    fn random_f64(&self) -> f64 {
        rand::thread_rng().gen()
    }
}
