use rand::{rngs::StdRng, Rng};

use crate::profile::StrategyProfile;

pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "scripted source needs at least one draw");
        assert!(
            draws.iter().all(|draw| (0.0..1.0).contains(draw)),
            "scripted draws must lie in [0, 1)"
        );

        Self { draws, cursor: 0 }
    }

    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let draw = self.draws[self.cursor];
        self.cursor = (self.cursor + 1) % self.draws.len();
        draw
    }
}

pub fn sample_outcome(profile: &StrategyProfile, source: &mut dyn RandomSource) -> f64 {
    if source.next_unit() < profile.win_probability() {
        profile.clamped_reward_multiple()
    } else {
        -profile.clamped_loss_multiple()
    }
}
