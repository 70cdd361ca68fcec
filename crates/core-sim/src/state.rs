use std::collections::VecDeque;

use serde::Serialize;
use strategy::{sample_outcome, size_trade, RandomSource, StrategyProfile};

use crate::config::SimConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LastOutcome {
    pub r_multiple: f64,
    pub pnl: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TradeRecord {
    pub trade: u64,
    pub r_multiple: f64,
    pub pnl: f64,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub equity: f64,
    pub trade_count: u64,
    pub win_count: u64,
    pub loss_count: u64,
    pub peak_equity: f64,
    pub max_drawdown_fraction: f64,
    pub last_outcome: Option<LastOutcome>,
    pub equity_history: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    config: SimConfig,
    equity: f64,
    trade_count: u64,
    win_count: u64,
    loss_count: u64,
    peak_equity: f64,
    max_drawdown_fraction: f64,
    last_outcome: Option<LastOutcome>,
    equity_history: VecDeque<f64>,
}

impl SimState {
    pub fn new(config: SimConfig) -> Self {
        let initial_equity = config.initial_equity();
        let mut equity_history = VecDeque::with_capacity(config.history_cap() + 1);
        equity_history.push_back(initial_equity);

        Self {
            config,
            equity: initial_equity,
            trade_count: 0,
            win_count: 0,
            loss_count: 0,
            peak_equity: initial_equity,
            max_drawdown_fraction: 0.0,
            last_outcome: None,
            equity_history,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub fn apply_trade(
        &mut self,
        profile: &StrategyProfile,
        risk_fraction: f64,
        source: &mut dyn RandomSource,
    ) -> TradeRecord {
        let r_multiple = sample_outcome(profile, source);
        let sized = size_trade(self.equity, risk_fraction, r_multiple);

        self.trade_count += 1;
        // a flat 0R outcome books as a loss
        if r_multiple > 0.0 {
            self.win_count += 1;
        } else {
            self.loss_count += 1;
        }

        self.equity = sized.new_equity;
        self.last_outcome = Some(LastOutcome {
            r_multiple,
            pnl: sized.pnl,
        });

        // peak first, so a trade that makes a new high contributes zero drawdown
        self.peak_equity = self.peak_equity.max(sized.new_equity);
        if self.peak_equity > 0.0 {
            let drawdown = 1.0 - sized.new_equity / self.peak_equity;
            self.max_drawdown_fraction = self.max_drawdown_fraction.max(drawdown);
        }

        self.equity_history.push_back(sized.new_equity);
        while self.equity_history.len() > self.config.history_cap() {
            self.equity_history.pop_front();
        }

        TradeRecord {
            trade: self.trade_count,
            r_multiple,
            pnl: sized.pnl,
            equity: sized.new_equity,
        }
    }

    pub fn equity(&self) -> f64 {
        self.equity
    }

    pub fn trade_count(&self) -> u64 {
        self.trade_count
    }

    pub fn win_count(&self) -> u64 {
        self.win_count
    }

    pub fn loss_count(&self) -> u64 {
        self.loss_count
    }

    pub fn peak_equity(&self) -> f64 {
        self.peak_equity
    }

    pub fn max_drawdown_fraction(&self) -> f64 {
        self.max_drawdown_fraction
    }

    pub fn last_outcome(&self) -> Option<LastOutcome> {
        self.last_outcome
    }

    pub fn equity_history(&self) -> &VecDeque<f64> {
        &self.equity_history
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            equity: self.equity,
            trade_count: self.trade_count,
            win_count: self.win_count,
            loss_count: self.loss_count,
            peak_equity: self.peak_equity,
            max_drawdown_fraction: self.max_drawdown_fraction,
            last_outcome: self.last_outcome,
            equity_history: self.equity_history.iter().copied().collect(),
        }
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
