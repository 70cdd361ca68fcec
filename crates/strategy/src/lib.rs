pub mod profile;
pub mod sampler;
pub mod sizing;

pub use profile::{preset, Preset, ProfileError, ProfileUpdate, StrategyProfile, PRESETS};
pub use sampler::{sample_outcome, RandomSource, ScriptedSource};
pub use sizing::{
    clamp_risk_fraction, size_trade, SizedTrade, MAX_RISK_FRACTION, MIN_RISK_FRACTION,
};

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{sample_outcome, size_trade, ScriptedSource, StrategyProfile};

    proptest! {
        #[test]
        fn expectancy_matches_closed_form(
            win_pct in -50.0f64..150.0,
            reward in 0.0f64..10.0,
            loss in 0.0f64..10.0,
        ) {
            let profile = StrategyProfile::new(win_pct, reward, loss);
            let p = (win_pct / 100.0).clamp(0.0, 1.0);

            prop_assert!((profile.expectancy() - (p * reward - (1.0 - p) * loss)).abs() < 1e-9);
        }

        #[test]
        fn sized_pnl_is_outcome_times_clamped_risk(
            equity in 1.0f64..1_000_000.0,
            risk_fraction in 0.001f64..1.0,
            draw in 0.0f64..1.0,
        ) {
            let profile = StrategyProfile::new(55.0, 2.0, 1.0);
            let mut source = ScriptedSource::constant(draw);
            let r_multiple = sample_outcome(&profile, &mut source);

            let sized = size_trade(equity, risk_fraction, r_multiple);

            prop_assert!(r_multiple == 2.0 || r_multiple == -1.0);
            prop_assert!((sized.pnl - r_multiple * equity * risk_fraction).abs() < 1e-6);
            prop_assert!((sized.new_equity - (equity + sized.pnl)).abs() < 1e-6);
        }
    }
}
