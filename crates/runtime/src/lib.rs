pub mod config;
pub mod controller;
pub mod engine;
pub mod events;

pub use config::{SessionConfig, DEFAULT_INTERVAL_MS, DEFAULT_RISK_FRACTION};
pub use controller::{RunError, RunPhase, RunStatus, SimulationHandle};
pub use engine::SimEngine;
pub use events::SessionEvent;
