//! Layered configuration for the `handoff` binary.
//!
//! Precedence, lowest first: built-in defaults, a TOML file (`--config` or
//! `HANDOFF_CONFIG`), then individual env overrides.
//!
//! ```toml
//! [triggers]
//! sentiment_threshold = -0.4
//! max_turns = 8
//! keywords = ["refund", "chargeback"]
//!
//! [sentiment]
//! escalation_threshold = -0.6
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use handoff_engine::{TriggerConfigPatch, TriggerDetector};
use serde::{Deserialize, Serialize};

/// Env var naming the TOML config file.
pub const ENV_CONFIG_PATH: &str = "HANDOFF_CONFIG";
pub const ENV_SENTIMENT_THRESHOLD: &str = "HANDOFF_SENTIMENT_THRESHOLD";
pub const ENV_MAX_TURNS: &str = "HANDOFF_MAX_TURNS";
pub const ENV_ESCALATION_THRESHOLD: &str = "HANDOFF_ESCALATION_THRESHOLD";

/// Sentiment-side settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentSettings {
    /// Score at or below which the conversation alone warrants a handoff.
    /// Unset means the engine default (-0.5).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandoffConfig {
    pub triggers: TriggerConfigPatch,
    pub sentiment: SentimentSettings,
}

impl HandoffConfig {
    /// Load from `path` (or `HANDOFF_CONFIG`) and apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from);
        let path = path.map(Path::to_path_buf).or(from_env);
        Self::load_with(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load) with an explicit env lookup.
    pub fn load_with(path: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides(lookup))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Apply env overrides; unparsable values are ignored with a warning.
    ///
    /// - `HANDOFF_SENTIMENT_THRESHOLD`: trigger sentiment threshold
    /// - `HANDOFF_MAX_TURNS`: trigger turn limit
    /// - `HANDOFF_ESCALATION_THRESHOLD`: sentiment-only escalation threshold
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env = TriggerConfigPatch {
            sentiment_threshold: parse_var::<f64>(&lookup, ENV_SENTIMENT_THRESHOLD),
            max_turns: parse_var::<u32>(&lookup, ENV_MAX_TURNS),
            ..TriggerConfigPatch::default()
        };
        self.triggers = self.triggers.overlay(env);
        if let Some(v) = parse_var::<f64>(&lookup, ENV_ESCALATION_THRESHOLD) {
            self.sentiment.escalation_threshold = Some(v);
        }
        self
    }

    /// Build the trigger detector. In strict mode out-of-range values are
    /// errors; otherwise they are clamped.
    pub fn detector(&self, strict: bool) -> Result<TriggerDetector> {
        if !strict {
            return Ok(TriggerDetector::from_patch(self.triggers.clone()));
        }
        let mut detector = TriggerDetector::new();
        detector
            .try_update_config(self.triggers.clone())
            .context("Invalid trigger configuration")?;
        Ok(detector)
    }

    /// Sentiment escalation threshold, validated or clamped like the triggers.
    pub fn escalation_threshold(&self, strict: bool) -> Result<Option<f64>> {
        let Some(threshold) = self.sentiment.escalation_threshold else {
            return Ok(None);
        };
        if threshold.is_finite() && (-1.0..=1.0).contains(&threshold) {
            return Ok(Some(threshold));
        }
        if strict {
            bail!("Sentiment escalation threshold {threshold} is outside [-1, 1]");
        }
        if !threshold.is_finite() {
            tracing::warn!(threshold, "ignoring non-finite escalation threshold");
            return Ok(None);
        }
        let clamped = threshold.clamp(-1.0, 1.0);
        tracing::warn!(
            requested = threshold,
            applied = clamped,
            "escalation threshold clamped to [-1, 1]"
        );
        Ok(Some(clamped))
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable env override");
            None
        }
    }
}
