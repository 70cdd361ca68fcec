use std::{
    env,
    net::{AddrParseError, SocketAddr},
};

use runtime::SessionConfig;
use strategy::{preset, StrategyProfile};
use thiserror::Error;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PRESET: &str = "vantharp";
const DEFAULT_RISK_PCT: f64 = 1.0;
const DEFAULT_INTERVAL_MS: u64 = 100;
const DEFAULT_AUTOSTART: bool = false;

const ENV_ADDR: &str = "EXPECTANCY_LAB_ADDR";
const ENV_PRESET: &str = "EXPECTANCY_LAB_PRESET";
const ENV_RISK_PCT: &str = "EXPECTANCY_LAB_RISK_PCT";
const ENV_INTERVAL_MS: &str = "EXPECTANCY_LAB_INTERVAL_MS";
const ENV_SEED: &str = "EXPECTANCY_LAB_SEED";
const ENV_AUTOSTART: &str = "EXPECTANCY_LAB_AUTOSTART";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub profile: StrategyProfile,
    pub risk_pct: f64,
    pub interval_ms: u64,
    pub seed: Option<u64>,
    pub autostart: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("EXPECTANCY_LAB_ADDR is not a valid socket address: {0}")]
    InvalidListenAddr(#[source] AddrParseError),
    #[error("EXPECTANCY_LAB_PRESET must be one of: vantharp, breakout, scalper, trend")]
    InvalidPreset,
    #[error("EXPECTANCY_LAB_RISK_PCT must be a finite percentage between 0 and 100")]
    InvalidRiskPct,
    #[error("EXPECTANCY_LAB_INTERVAL_MS must be a positive integer")]
    InvalidIntervalMs,
    #[error("EXPECTANCY_LAB_SEED must be an unsigned 64-bit integer")]
    InvalidSeed,
    #[error("EXPECTANCY_LAB_AUTOSTART must be true or false")]
    InvalidAutostart,
    #[error("{0} contains non-unicode data")]
    NonUnicode(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match read_env(ENV_ADDR)? {
            Some(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            None => DEFAULT_LISTEN_ADDR
                .parse()
                .map_err(ConfigError::InvalidListenAddr)?,
        };

        let preset_name = read_env(ENV_PRESET)?.unwrap_or_else(|| DEFAULT_PRESET.to_owned());
        let profile = preset(preset_name.trim())
            .map_err(|_| ConfigError::InvalidPreset)?
            .profile;

        let risk_pct = match read_env(ENV_RISK_PCT)? {
            Some(value) => parse_percentage(&value).ok_or(ConfigError::InvalidRiskPct)?,
            None => DEFAULT_RISK_PCT,
        };

        let interval_ms = match read_env(ENV_INTERVAL_MS)? {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|interval_ms| *interval_ms > 0)
                .ok_or(ConfigError::InvalidIntervalMs)?,
            None => DEFAULT_INTERVAL_MS,
        };

        let seed = match read_env(ENV_SEED)? {
            Some(value) => Some(value.parse::<u64>().map_err(|_| ConfigError::InvalidSeed)?),
            None => None,
        };

        let autostart = match read_env(ENV_AUTOSTART)? {
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidAutostart)?,
            None => DEFAULT_AUTOSTART,
        };

        Ok(Self {
            listen_addr,
            profile,
            risk_pct,
            interval_ms,
            seed,
            autostart,
        })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            profile: self.profile,
            risk_fraction: self.risk_pct / 100.0,
            interval_ms: self.interval_ms,
            seed: self.seed,
            ..SessionConfig::default()
        }
    }
}

fn read_env(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode(key)),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_percentage(value: &str) -> Option<f64> {
    let parsed = value.parse::<f64>().ok()?;
    if !parsed.is_finite() || parsed <= 0.0 || parsed > 100.0 {
        return None;
    }
    Some(parsed)
}
