//! Span helpers and decision aggregation
//!
//! Structured `tracing` spans for the two scoring paths. Field names use
//! dot notation so they export cleanly to OpenTelemetry collectors.
//!
//! ```text
//! handoff.sentiment    (one per conversation scored)
//! handoff.triggers     (one per detector evaluation)
//! ```
//!
//! Nothing here installs a subscriber; binaries and tests do that.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::Span;

use crate::escalation::{Trigger, TriggerType};
use crate::sentiment::SentimentLabel;

// ── Span Name Constants ──────────────────────────────────────────────

/// Conversation sentiment scoring.
pub const SPAN_SENTIMENT: &str = "handoff.sentiment";

/// Trigger detector evaluation.
pub const SPAN_TRIGGERS: &str = "handoff.triggers";

// ── Field Name Constants ─────────────────────────────────────────────

pub const FIELD_MESSAGE_COUNT: &str = "handoff.message_count";
pub const FIELD_TURN_COUNT: &str = "handoff.turn_count";
pub const FIELD_SCORE: &str = "handoff.sentiment.score";
pub const FIELD_LABEL: &str = "handoff.sentiment.label";
pub const FIELD_FIRED: &str = "handoff.triggers.fired";
pub const FIELD_PRIMARY: &str = "handoff.triggers.primary";

// ── Span Builders ────────────────────────────────────────────────────

/// Span for scoring a conversation.
///
/// Filled later via [`record_sentiment_result`]: score and label.
pub fn sentiment_span(message_count: usize) -> Span {
    tracing::debug_span!(
        SPAN_SENTIMENT,
        "handoff.message_count" = message_count as u64,
        "handoff.sentiment.score" = tracing::field::Empty,
        "handoff.sentiment.label" = tracing::field::Empty,
    )
}

pub fn record_sentiment_result(span: &Span, score: f64, label: SentimentLabel) {
    span.record(FIELD_SCORE, score);
    span.record(FIELD_LABEL, tracing::field::display(label));
}

/// Span for one detector evaluation.
///
/// Filled later via [`record_trigger_result`]: fired count and primary type.
pub fn trigger_span(turn_count: u32, message_count: usize) -> Span {
    tracing::debug_span!(
        SPAN_TRIGGERS,
        "handoff.turn_count" = turn_count,
        "handoff.message_count" = message_count as u64,
        "handoff.triggers.fired" = tracing::field::Empty,
        "handoff.triggers.primary" = tracing::field::Empty,
    )
}

pub fn record_trigger_result(span: &Span, fired: usize, primary: Option<TriggerType>) {
    span.record(FIELD_FIRED, fired as u64);
    if let Some(primary) = primary {
        span.record(FIELD_PRIMARY, tracing::field::display(primary));
    }
}

// ── Decision Summary ─────────────────────────────────────────────────

/// Aggregate over many escalation decisions, e.g. one batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionSummary {
    /// Conversations evaluated.
    pub evaluations: u32,
    /// Conversations where at least one trigger fired.
    pub escalations: u32,
    /// Sum of the sentiment scores seen.
    pub sentiment_total: f64,
    /// Evaluations that carried a sentiment score.
    pub sentiment_samples: u32,
    /// Fired count per trigger type.
    pub by_trigger: BTreeMap<TriggerType, u32>,
}

impl DecisionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one evaluation and the triggers it fired.
    pub fn record(&mut self, sentiment: Option<f64>, triggers: &[Trigger]) {
        self.evaluations += 1;
        if let Some(score) = sentiment {
            self.sentiment_total += score;
            self.sentiment_samples += 1;
        }
        if !triggers.is_empty() {
            self.escalations += 1;
        }
        for trigger in triggers {
            *self.by_trigger.entry(trigger.trigger_type).or_insert(0) += 1;
        }
    }

    /// Escalation rate as a fraction (0.0 to 1.0).
    pub fn escalation_rate(&self) -> f64 {
        if self.evaluations == 0 {
            return 0.0;
        }
        self.escalations as f64 / self.evaluations as f64
    }

    pub fn mean_sentiment(&self) -> Option<f64> {
        if self.sentiment_samples == 0 {
            return None;
        }
        Some(self.sentiment_total / self.sentiment_samples as f64)
    }

    /// Most frequently fired trigger type; ties go to the higher priority.
    pub fn dominant_trigger(&self) -> Option<TriggerType> {
        self.by_trigger
            .iter()
            .max_by(|(a, x), (b, y)| x.cmp(y).then(b.priority().cmp(&a.priority())))
            .map(|(t, _)| *t)
    }
}

impl std::fmt::Display for DecisionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "evaluations={} escalations={} rate={:.2}",
            self.evaluations,
            self.escalations,
            self.escalation_rate()
        )?;
        if let Some(mean) = self.mean_sentiment() {
            write!(f, " mean_sentiment={mean:.2}")?;
        }
        for (trigger, count) in &self.by_trigger {
            write!(f, " {trigger}={count}")?;
        }
        Ok(())
    }
}
