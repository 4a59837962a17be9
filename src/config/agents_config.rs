//! Agent hyperparameters loaded from environment variables or a TOML file.

use crate::application::agents::ModelConfig;
use crate::application::indicators::SarParameters;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Hyperparameters for every agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    // Volatility / momentum windows
    pub atr_period: usize,
    pub stoch_period: usize,
    pub stoch_smoothing: usize,
    pub adx_period: usize,

    // Extended Parabolic SAR
    pub sar: SarParameters,

    // Classifier
    pub model: ModelConfig,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            atr_period: 14,
            stoch_period: 14,
            stoch_smoothing: 3,
            adx_period: 14,
            sar: SarParameters::default(),
            model: ModelConfig::default(),
        }
    }
}

impl AgentsConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            sar: SarParameters {
                start_af: parse_f64(&lookup, "SAR_START_AF", defaults.sar.start_af)?,
                inc_af: parse_f64(&lookup, "SAR_INC_AF", defaults.sar.inc_af)?,
                max_af: parse_f64(&lookup, "SAR_MAX_AF", defaults.sar.max_af)?,
            },
            atr_period: parse_usize(&lookup, "ATR_PERIOD", defaults.atr_period)?,
            stoch_period: parse_usize(&lookup, "STOCH_PERIOD", defaults.stoch_period)?,
            stoch_smoothing: parse_usize(&lookup, "STOCH_SMOOTHING", defaults.stoch_smoothing)?,
            adx_period: parse_usize(&lookup, "ADX_PERIOD", defaults.adx_period)?,
            model: ModelConfig {
                alpha: parse_f64(&lookup, "MODEL_ALPHA", defaults.model.alpha)?,
                scale_features: parse_bool(
                    &lookup,
                    "MODEL_SCALE_FEATURES",
                    defaults.model.scale_features,
                )?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read agent config {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse agent config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.sar.validate().context("Invalid SAR parameters")?;
        for (key, value) in [
            ("ATR_PERIOD", self.atr_period),
            ("STOCH_PERIOD", self.stoch_period),
            ("STOCH_SMOOTHING", self.stoch_smoothing),
            ("ADX_PERIOD", self.adx_period),
        ] {
            if value == 0 {
                anyhow::bail!("{} must be greater than 0", key);
            }
        }
        if !self.model.alpha.is_finite() || self.model.alpha < 0.0 {
            anyhow::bail!("MODEL_ALPHA must be a non-negative number, got {}", self.model.alpha);
        }
        Ok(())
    }
}

fn parse_usize<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<usize>()
        .context(format!("Failed to parse {}", key))
}

fn parse_f64<F>(lookup: &F, key: &str, default: f64) -> Result<f64>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<f64>()
        .context(format!("Failed to parse {}", key))
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .to_lowercase()
        .parse::<bool>()
        .context(format!("Failed to parse {}", key))
}
