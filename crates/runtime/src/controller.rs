use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use core_sim::{Snapshot, Statistics, TradeRecord};
use serde::Serialize;
use strategy::{ProfileError, ProfileUpdate, StrategyProfile};
use thiserror::Error;
use tokio::{
    runtime::Handle,
    sync::broadcast,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::info;

use crate::{config::SessionConfig, engine::SimEngine, events::SessionEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("auto-run needs a tokio runtime")]
    NoRuntime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStatus {
    pub phase: RunPhase,
    pub running: bool,
    pub interval_ms: u64,
}

struct Ticker {
    task: JoinHandle<()>,
    runtime: Handle,
}

struct Session {
    engine: SimEngine,
    interval_ms: u64,
    // bumped on every disarm; a ticker only trades while its generation is current
    generation: u64,
    ticker: Option<Ticker>,
}

impl Session {
    fn arm(&mut self, session: Weak<Mutex<Session>>, runtime: Handle) {
        let period = Duration::from_millis(self.interval_ms);
        let first_tick = Instant::now() + period;
        let task = runtime.spawn(run_ticker(session, self.generation, first_tick, period));
        self.ticker = Some(Ticker { task, runtime });
    }

    fn disarm(&mut self) -> Option<Handle> {
        self.generation = self.generation.wrapping_add(1);
        self.ticker.take().map(|ticker| {
            ticker.task.abort();
            ticker.runtime
        })
    }

    fn phase(&self) -> RunPhase {
        if self.ticker.is_some() {
            RunPhase::Running
        } else {
            RunPhase::Idle
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disarm();
    }
}

async fn run_ticker(
    session: Weak<Mutex<Session>>,
    generation: u64,
    first_tick: Instant,
    period: Duration,
) {
    let mut interval = time::interval_at(first_tick, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(shared) = session.upgrade() else {
            return;
        };
        let mut guard = lock_session(&shared);
        if guard.generation != generation {
            return;
        }
        guard.engine.step_once();
    }
}

fn lock_session(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
pub struct SimulationHandle {
    session: Arc<Mutex<Session>>,
}

impl SimulationHandle {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_engine(SimEngine::new(&config), config.interval_ms)
    }

    pub fn with_engine(engine: SimEngine, interval_ms: u64) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session {
                engine,
                interval_ms: interval_ms.max(1),
                generation: 0,
                ticker: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        lock_session(&self.session)
    }

    pub fn profile(&self) -> StrategyProfile {
        self.lock().engine.profile()
    }

    pub fn set_win_pct(&self, win_pct: f64) {
        self.lock().engine.set_win_pct(win_pct);
    }

    pub fn set_reward_multiple(&self, reward_multiple: f64) {
        self.lock().engine.set_reward_multiple(reward_multiple);
    }

    pub fn set_loss_multiple(&self, loss_multiple: f64) {
        self.lock().engine.set_loss_multiple(loss_multiple);
    }

    pub fn update_profile(&self, update: ProfileUpdate) -> StrategyProfile {
        self.lock().engine.update_profile(update)
    }

    pub fn apply_preset(&self, name: &str) -> Result<StrategyProfile, ProfileError> {
        self.lock().engine.apply_preset(name)
    }

    pub fn risk_fraction(&self) -> f64 {
        self.lock().engine.risk_fraction()
    }

    pub fn set_risk_fraction(&self, risk_fraction: f64) {
        self.lock().engine.set_risk_fraction(risk_fraction);
    }

    pub fn interval_ms(&self) -> u64 {
        self.lock().interval_ms
    }

    pub fn set_interval_ms(&self, interval_ms: u64) {
        let interval_ms = interval_ms.max(1);
        let mut session = self.lock();
        session.interval_ms = interval_ms;

        if let Some(runtime) = session.disarm() {
            session.arm(Arc::downgrade(&self.session), runtime);
        }
        session
            .engine
            .publish(SessionEvent::IntervalChanged { interval_ms });
        info!(interval_ms, "auto-run interval changed");
    }

    pub fn start(&self) -> Result<(), RunError> {
        let runtime = Handle::try_current().map_err(|_| RunError::NoRuntime)?;
        let mut session = self.lock();
        if session.ticker.is_some() {
            return Ok(());
        }

        session.arm(Arc::downgrade(&self.session), runtime);
        let interval_ms = session.interval_ms;
        session
            .engine
            .publish(SessionEvent::RunStarted { interval_ms });
        info!(interval_ms, "auto-run started");
        Ok(())
    }

    pub fn stop(&self) {
        let mut session = self.lock();
        if session.disarm().is_some() {
            session.engine.publish(SessionEvent::RunStopped);
            info!("auto-run stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock().ticker.is_some()
    }

    pub fn run_status(&self) -> RunStatus {
        let session = self.lock();
        let phase = session.phase();
        RunStatus {
            phase,
            running: phase == RunPhase::Running,
            interval_ms: session.interval_ms,
        }
    }

    pub fn step_once(&self) -> TradeRecord {
        self.lock().engine.step_once()
    }

    pub fn reset(&self) -> Snapshot {
        let mut session = self.lock();
        if session.disarm().is_some() {
            session.engine.publish(SessionEvent::RunStopped);
        }
        session.engine.reset();
        info!("session reset");
        session.engine.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().engine.snapshot()
    }

    pub fn statistics(&self) -> Statistics {
        self.lock().engine.statistics()
    }

    // snapshot and receiver taken under one lock so no event falls between them
    pub fn subscribe(&self) -> (Snapshot, broadcast::Receiver<SessionEvent>) {
        let session = self.lock();
        (session.engine.snapshot(), session.engine.subscribe())
    }
}
