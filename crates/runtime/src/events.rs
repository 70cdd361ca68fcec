use core_sim::TradeRecord;
use serde::Serialize;
use strategy::StrategyProfile;

pub const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SessionEvent {
    RunStarted {
        interval_ms: u64,
    },
    RunStopped,
    IntervalChanged {
        interval_ms: u64,
    },
    TradeExecuted {
        trade: u64,
        r_multiple: f64,
        pnl: f64,
        equity: f64,
    },
    ProfileChanged {
        profile: StrategyProfile,
    },
    RiskChanged {
        risk_fraction: f64,
    },
    Reset,
}

impl From<TradeRecord> for SessionEvent {
    fn from(record: TradeRecord) -> Self {
        Self::TradeExecuted {
            trade: record.trade,
            r_multiple: record.r_multiple,
            pnl: record.pnl,
            equity: record.equity,
        }
    }
}
