//! Configuration for the expiry sweeper

/// Configuration for the expiry sweeper
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// How often to run the sweep (in seconds). Must stay strictly below
    /// the validity window; an expired code remains visible for at most
    /// one extra interval.
    pub interval_seconds: u64,
    /// Whether to run the background sweep
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}
