mod config;
mod state;
mod stats;

pub use config::{SimConfig, SimConfigError, DEFAULT_HISTORY_CAP, DEFAULT_INITIAL_EQUITY};
pub use state::{LastOutcome, SimState, Snapshot, TradeRecord};
pub use stats::{normalize_series, observed_win_rate_pct, project, Statistics};

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};
    use strategy::StrategyProfile;

    use super::{normalize_series, SimConfig, SimState};

    #[test]
    fn sim_config_defaults_match_reference_session() {
        let config = SimConfig::default();
        assert_eq!(config.initial_equity(), 1_000.0);
        assert_eq!(config.history_cap(), 300);
    }

    proptest! {
        #[test]
        fn counters_and_drawdown_hold_their_invariants(
            seed in any::<u64>(),
            win_pct in 0.0f64..100.0,
            reward in 0.0f64..5.0,
            loss in 0.0f64..1.0,
            risk_fraction in 0.001f64..0.5,
            trades in 1usize..400,
        ) {
            let profile = StrategyProfile::new(win_pct, reward, loss);
            let mut state = SimState::default();
            let mut source = StdRng::seed_from_u64(seed);
            let mut previous_drawdown = 0.0;

            for _ in 0..trades {
                state.apply_trade(&profile, risk_fraction, &mut source);

                prop_assert_eq!(state.trade_count(), state.win_count() + state.loss_count());
                prop_assert!(state.max_drawdown_fraction() >= previous_drawdown);
                prop_assert!(state.peak_equity() >= state.equity());
                if state.equity() >= 0.0 {
                    prop_assert!(state.max_drawdown_fraction() <= 1.0);
                }
                let expected_len = (state.trade_count() as usize + 1).min(300);
                prop_assert_eq!(state.equity_history().len(), expected_len);
                previous_drawdown = state.max_drawdown_fraction();
            }
        }

        #[test]
        fn normalized_series_stays_in_unit_interval(
            values in proptest::collection::vec(-1.0e6f64..1.0e6, 1..200),
        ) {
            let normalized = normalize_series(values.clone());

            prop_assert_eq!(normalized.len(), values.len());
            prop_assert!(normalized.iter().all(|value| (0.0..=1.0).contains(value)));
        }
    }
}
