use runtime::{SessionConfig, SimulationHandle};

#[derive(Clone)]
pub struct AppState {
    sim: SimulationHandle,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SimulationHandle::new(SessionConfig::default()))
    }
}

impl AppState {
    pub fn new(sim: SimulationHandle) -> Self {
        Self { sim }
    }

    pub fn sim(&self) -> &SimulationHandle {
        &self.sim
    }
}
