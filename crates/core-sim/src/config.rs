use thiserror::Error;

pub const DEFAULT_INITIAL_EQUITY: f64 = 1_000.0;
pub const DEFAULT_HISTORY_CAP: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimConfigError {
    #[error("initial equity must be finite and positive")]
    InvalidInitialEquity,
    #[error("history cap must be at least one point")]
    ZeroHistoryCap,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    initial_equity: f64,
    history_cap: usize,
}

impl SimConfig {
    pub fn new(initial_equity: f64, history_cap: usize) -> Result<Self, SimConfigError> {
        if !initial_equity.is_finite() || initial_equity <= 0.0 {
            return Err(SimConfigError::InvalidInitialEquity);
        }
        if history_cap == 0 {
            return Err(SimConfigError::ZeroHistoryCap);
        }

        Ok(Self {
            initial_equity,
            history_cap,
        })
    }

    pub fn initial_equity(&self) -> f64 {
        self.initial_equity
    }

    pub fn history_cap(&self) -> usize {
        self.history_cap
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_equity: DEFAULT_INITIAL_EQUITY,
            history_cap: DEFAULT_HISTORY_CAP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SimConfig, SimConfigError};

    #[test]
    fn rejects_non_positive_or_non_finite_initial_equity() {
        assert_eq!(
            SimConfig::new(0.0, 300),
            Err(SimConfigError::InvalidInitialEquity)
        );
        assert_eq!(
            SimConfig::new(f64::INFINITY, 300),
            Err(SimConfigError::InvalidInitialEquity)
        );
    }

    #[test]
    fn rejects_empty_history_window() {
        assert_eq!(SimConfig::new(1_000.0, 0), Err(SimConfigError::ZeroHistoryCap));
    }
}
