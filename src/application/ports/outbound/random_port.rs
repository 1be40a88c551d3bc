/// Source of randomness for rolls, injectable for deterministic tests
pub trait RandomPort: Send + Sync {
    /// Uniform value in `[0, 1)`
    fn random_f64(&self) -> f64;
}
