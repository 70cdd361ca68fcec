use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    #[error("{field} must be a finite number")]
    InvalidParameter { field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyProfile {
    pub win_pct: f64,
    pub reward_multiple: f64,
    pub loss_multiple: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
pub struct ProfileUpdate {
    pub win_pct: Option<f64>,
    pub reward_multiple: Option<f64>,
    pub loss_multiple: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub profile: StrategyProfile,
}

pub static PRESETS: [Preset; 4] = [
    Preset {
        name: "vantharp",
        profile: StrategyProfile::new(60.0, 2.0, 1.0),
    },
    Preset {
        name: "breakout",
        profile: StrategyProfile::new(40.0, 3.0, 1.0),
    },
    Preset {
        name: "scalper",
        profile: StrategyProfile::new(65.0, 1.0, 1.5),
    },
    Preset {
        name: "trend",
        profile: StrategyProfile::new(30.0, 5.0, 1.0),
    },
];

pub fn preset(name: &str) -> Result<&'static Preset, ProfileError> {
    PRESETS
        .iter()
        .find(|preset| preset.name == name)
        .ok_or_else(|| ProfileError::UnknownPreset(name.to_owned()))
}

impl StrategyProfile {
    pub const fn new(win_pct: f64, reward_multiple: f64, loss_multiple: f64) -> Self {
        Self {
            win_pct,
            reward_multiple,
            loss_multiple,
        }
    }

    pub fn set_win_pct(&mut self, win_pct: f64) {
        self.win_pct = win_pct;
    }

    pub fn set_reward_multiple(&mut self, reward_multiple: f64) {
        self.reward_multiple = reward_multiple;
    }

    pub fn set_loss_multiple(&mut self, loss_multiple: f64) {
        self.loss_multiple = loss_multiple;
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<(), ProfileError> {
        *self = preset(name)?.profile;
        Ok(())
    }

    pub fn win_probability(&self) -> f64 {
        let probability = self.win_pct / 100.0;
        if probability.is_nan() {
            return 0.0;
        }
        probability.clamp(0.0, 1.0)
    }

    pub fn clamped_reward_multiple(&self) -> f64 {
        non_negative(self.reward_multiple)
    }

    pub fn clamped_loss_multiple(&self) -> f64 {
        non_negative(self.loss_multiple)
    }

    pub fn expectancy(&self) -> f64 {
        let p = self.win_probability();
        p * self.clamped_reward_multiple() - (1.0 - p) * self.clamped_loss_multiple()
    }

    pub fn apply_update(&mut self, update: ProfileUpdate) {
        if let Some(win_pct) = update.win_pct {
            self.win_pct = win_pct;
        }
        if let Some(reward_multiple) = update.reward_multiple {
            self.reward_multiple = reward_multiple;
        }
        if let Some(loss_multiple) = update.loss_multiple {
            self.loss_multiple = loss_multiple;
        }
    }
}

// NaN counts as zero
fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0)
}

impl Default for StrategyProfile {
    fn default() -> Self {
        PRESETS[0].profile
    }
}
