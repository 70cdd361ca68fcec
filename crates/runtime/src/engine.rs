use core_sim::{project, SimState, Snapshot, Statistics, TradeRecord};
use rand::{rngs::StdRng, SeedableRng};
use strategy::{ProfileError, ProfileUpdate, RandomSource, StrategyProfile};
use tokio::sync::broadcast;
use tracing::debug;

use crate::{
    config::SessionConfig,
    events::{SessionEvent, EVENT_CHANNEL_CAPACITY},
};

pub struct SimEngine {
    profile: StrategyProfile,
    risk_fraction: f64,
    state: SimState,
    source: Box<dyn RandomSource + Send>,
    events_tx: broadcast::Sender<SessionEvent>,
}

impl SimEngine {
    pub fn new(config: &SessionConfig) -> Self {
        let source = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_source(config, Box::new(source))
    }

    pub fn with_source(config: &SessionConfig, source: Box<dyn RandomSource + Send>) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            profile: config.profile,
            risk_fraction: config.risk_fraction,
            state: SimState::new(config.sim),
            source,
            events_tx,
        }
    }

    pub fn for_test_seed(seed: u64) -> Self {
        Self::new(&SessionConfig {
            seed: Some(seed),
            ..SessionConfig::default()
        })
    }

    pub fn profile(&self) -> StrategyProfile {
        self.profile
    }

    pub fn set_win_pct(&mut self, win_pct: f64) {
        self.profile.set_win_pct(win_pct);
        self.profile_changed();
    }

    pub fn set_reward_multiple(&mut self, reward_multiple: f64) {
        self.profile.set_reward_multiple(reward_multiple);
        self.profile_changed();
    }

    pub fn set_loss_multiple(&mut self, loss_multiple: f64) {
        self.profile.set_loss_multiple(loss_multiple);
        self.profile_changed();
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) -> StrategyProfile {
        self.profile.apply_update(update);
        self.profile_changed();
        self.profile
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<StrategyProfile, ProfileError> {
        self.profile.apply_preset(name)?;
        self.profile_changed();
        Ok(self.profile)
    }

    pub fn risk_fraction(&self) -> f64 {
        self.risk_fraction
    }

    pub fn set_risk_fraction(&mut self, risk_fraction: f64) {
        self.risk_fraction = risk_fraction;
        self.publish(SessionEvent::RiskChanged { risk_fraction });
    }

    pub fn step_once(&mut self) -> TradeRecord {
        let record = self
            .state
            .apply_trade(&self.profile, self.risk_fraction, &mut *self.source);

        debug!(
            trade = record.trade,
            r_multiple = record.r_multiple,
            pnl = record.pnl,
            equity = record.equity,
            "trade executed"
        );
        self.publish(record.into());
        record
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.publish(SessionEvent::Reset);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn statistics(&self) -> Statistics {
        project(&self.profile, &self.state)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    pub(crate) fn publish(&self, event: SessionEvent) {
        // nobody listening is fine
        let _ = self.events_tx.send(event);
    }

    fn profile_changed(&self) {
        self.publish(SessionEvent::ProfileChanged {
            profile: self.profile,
        });
    }
}
