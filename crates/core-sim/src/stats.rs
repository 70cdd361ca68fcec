use serde::Serialize;
use strategy::StrategyProfile;

use crate::state::SimState;

const NORMALIZE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub expectancy: f64,
    pub observed_win_rate_pct: f64,
    pub drawdown_pct: f64,
    pub normalized_equity: Vec<f64>,
}

pub fn project(profile: &StrategyProfile, state: &SimState) -> Statistics {
    Statistics {
        expectancy: profile.expectancy(),
        observed_win_rate_pct: observed_win_rate_pct(profile, state),
        drawdown_pct: state.max_drawdown_fraction() * 100.0,
        normalized_equity: normalize_series(state.equity_history().iter().copied()),
    }
}

pub fn observed_win_rate_pct(profile: &StrategyProfile, state: &SimState) -> f64 {
    if state.trade_count() == 0 {
        return profile.win_probability() * 100.0;
    }
    state.win_count() as f64 / state.trade_count() as f64 * 100.0
}

pub fn normalize_series<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let values = values.into_iter();
    let (min, max) = values
        .clone()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });
    let span = (max - min).max(NORMALIZE_EPSILON);

    values.map(|value| (value - min) / span).collect()
}

#[cfg(test)]
mod tests {
    use strategy::{ScriptedSource, StrategyProfile};

    use super::{normalize_series, observed_win_rate_pct, project};
    use crate::state::SimState;

    #[test]
    fn win_rate_falls_back_to_configured_probability_before_first_trade() {
        let profile = StrategyProfile::new(60.0, 2.0, 1.0);
        let state = SimState::default();

        assert!((observed_win_rate_pct(&profile, &state) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn win_rate_reflects_realised_outcomes() {
        let profile = StrategyProfile::new(50.0, 2.0, 1.0);
        let mut state = SimState::default();
        let mut source = ScriptedSource::new(vec![0.1, 0.1, 0.1, 0.9]);
        for _ in 0..4 {
            state.apply_trade(&profile, 0.01, &mut source);
        }

        assert_eq!(observed_win_rate_pct(&profile, &state), 75.0);
    }

    #[test]
    fn projection_reports_theoretical_expectancy_and_drawdown_percent() {
        let profile = StrategyProfile::new(0.0, 2.0, 1.0);
        let mut state = SimState::default();
        let mut source = ScriptedSource::constant(0.4);
        state.apply_trade(&profile, 0.10, &mut source);

        let stats = project(&profile, &state);

        assert_eq!(stats.expectancy, -1.0);
        assert_eq!(stats.observed_win_rate_pct, 0.0);
        assert!((stats.drawdown_pct - 10.0).abs() < 1e-9);
        assert_eq!(stats.normalized_equity, vec![1.0, 0.0]);
    }

    #[test]
    fn single_point_history_normalizes_to_zero() {
        let stats = project(&StrategyProfile::default(), &SimState::default());

        assert_eq!(stats.normalized_equity, vec![0.0]);
    }

    #[test]
    fn normalization_preserves_order_and_spans_unit_interval() {
        let normalized = normalize_series(vec![1_000.0, 1_050.0, 900.0, 1_200.0]);

        assert_eq!(normalized.len(), 4);
        assert_eq!(normalized[2], 0.0);
        assert_eq!(normalized[3], 1.0);
        assert!((normalized[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((normalized[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn flat_series_does_not_divide_by_zero() {
        let normalized = normalize_series(vec![5.0, 5.0, 5.0]);

        assert_eq!(normalized, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_series_stays_empty() {
        assert!(normalize_series(Vec::<f64>::new()).is_empty());
    }
}
