//! Trigger detector configuration
//!
//! [`TriggerConfig`] is the full rule set held by a detector.
//! [`TriggerConfigPatch`] is a partial update: scalars overwrite, lists are
//! replaced wholesale. Two merge paths exist:
//!
//! - [`TriggerConfig::apply`] clamps out-of-range values and logs each
//!   adjustment at `warn`.
//! - [`TriggerConfigPatch::validate`] rejects them with a [`ConfigError`].

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Sentiment at or below this fires the sentiment trigger.
pub const DEFAULT_SENTIMENT_THRESHOLD: f64 = -0.5;

/// Turn count at or above this fires the turns trigger.
pub const DEFAULT_MAX_TURNS: u32 = 10;

/// Keywords that signal a conversation needs a person.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "refund",
    "cancel",
    "cancellation",
    "lawyer",
    "attorney",
    "lawsuit",
    "sue",
    "legal action",
    "urgent",
    "emergency",
    "complaint",
    "fraud",
    "scam",
    "chargeback",
    "supervisor",
];

/// Multi-word phrases that signal a conversation needs a person.
pub const DEFAULT_PHRASES: &[&str] = &[
    "this is unacceptable",
    "not acceptable",
    "waste of time",
    "worst service",
    "want my money back",
    "speak to your manager",
    "file a complaint",
    "report you",
    "close my account",
];

/// Rule set held by a [`super::TriggerDetector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Sentiment at or below this fires (in `[-1, 1]`).
    pub sentiment_threshold: f64,
    /// Turn count at or above this fires (at least 1).
    pub max_turns: u32,
    /// Single-word terms, matched on word boundaries.
    pub keywords: Vec<String>,
    /// Multi-word terms; any whitespace run matches a space.
    pub phrases: Vec<String>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            sentiment_threshold: DEFAULT_SENTIMENT_THRESHOLD,
            max_turns: DEFAULT_MAX_TURNS,
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            phrases: DEFAULT_PHRASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TriggerConfig {
    /// Shallow-merge `patch`, clamping anything out of range.
    pub fn apply(&mut self, patch: TriggerConfigPatch) {
        if let Some(threshold) = patch.sentiment_threshold {
            if !threshold.is_finite() {
                tracing::warn!(threshold, "ignoring non-finite sentiment threshold");
            } else {
                let clamped = threshold.clamp(-1.0, 1.0);
                if clamped != threshold {
                    tracing::warn!(
                        requested = threshold,
                        applied = clamped,
                        "sentiment threshold clamped to [-1, 1]"
                    );
                }
                self.sentiment_threshold = clamped;
            }
        }

        if let Some(max_turns) = patch.max_turns {
            if max_turns == 0 {
                tracing::warn!("max_turns of 0 raised to 1");
            }
            self.max_turns = max_turns.max(1);
        }

        if let Some(keywords) = patch.keywords {
            self.keywords = normalize_terms("keywords", keywords);
        }

        if let Some(phrases) = patch.phrases {
            self.phrases = normalize_terms("phrases", phrases);
        }
    }

    /// `self` with every field passed through the clamping rules of
    /// [`apply`](Self::apply). A non-finite threshold falls back to the default.
    pub fn sanitized(self) -> Self {
        let mut out = Self {
            sentiment_threshold: DEFAULT_SENTIMENT_THRESHOLD,
            max_turns: DEFAULT_MAX_TURNS,
            keywords: Vec::new(),
            phrases: Vec::new(),
        };
        out.apply(TriggerConfigPatch {
            sentiment_threshold: Some(self.sentiment_threshold),
            max_turns: Some(self.max_turns),
            keywords: Some(self.keywords),
            phrases: Some(self.phrases),
        });
        out
    }

    /// Copy of `self` with `patch` applied.
    pub fn merged(&self, patch: TriggerConfigPatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

/// Partial update for a [`TriggerConfig`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrases: Option<Vec<String>>,
}

impl TriggerConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sentiment_threshold(mut self, threshold: f64) -> Self {
        self.sentiment_threshold = Some(threshold);
        self
    }

    pub fn max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    pub fn phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phrases = Some(phrases.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sentiment_threshold.is_none()
            && self.max_turns.is_none()
            && self.keywords.is_none()
            && self.phrases.is_none()
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn overlay(mut self, other: TriggerConfigPatch) -> Self {
        if other.sentiment_threshold.is_some() {
            self.sentiment_threshold = other.sentiment_threshold;
        }
        if other.max_turns.is_some() {
            self.max_turns = other.max_turns;
        }
        if other.keywords.is_some() {
            self.keywords = other.keywords;
        }
        if other.phrases.is_some() {
            self.phrases = other.phrases;
        }
        self
    }

    /// Reject values that [`TriggerConfig::apply`] would otherwise clamp.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(threshold) = self.sentiment_threshold {
            if !threshold.is_finite() {
                return Err(ConfigError::NonFiniteThreshold);
            }
            if !(-1.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ThresholdOutOfRange { value: threshold });
            }
        }
        if self.max_turns == Some(0) {
            return Err(ConfigError::ZeroMaxTurns);
        }
        for (field, terms) in [("keywords", &self.keywords), ("phrases", &self.phrases)] {
            if let Some(terms) = terms {
                if terms.iter().any(|t| t.trim().is_empty()) {
                    return Err(ConfigError::EmptyTerm { field });
                }
            }
        }
        Ok(())
    }
}

/// Trim, lowercase and de-duplicate terms, dropping blanks. Order is kept.
pub fn normalize_terms(field: &str, terms: Vec<String>) -> Vec<String> {
    let requested = terms.len();
    let mut out: Vec<String> = Vec::with_capacity(requested);
    for term in terms {
        let term = term.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        if !term.is_empty() && !out.contains(&term) {
            out.push(term);
        }
    }
    if out.len() != requested {
        tracing::warn!(
            field,
            requested,
            kept = out.len(),
            "dropped blank or duplicate terms"
        );
    }
    out
}
