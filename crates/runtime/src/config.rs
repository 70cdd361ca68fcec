use core_sim::SimConfig;
use strategy::StrategyProfile;

pub const DEFAULT_RISK_FRACTION: f64 = 0.01;
pub const DEFAULT_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub sim: SimConfig,
    pub profile: StrategyProfile,
    pub risk_fraction: f64,
    pub interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            profile: StrategyProfile::default(),
            risk_fraction: DEFAULT_RISK_FRACTION,
            interval_ms: DEFAULT_INTERVAL_MS,
            seed: None,
        }
    }
}
