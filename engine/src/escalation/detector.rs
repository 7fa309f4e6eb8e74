//! Trigger Detector — deterministic escalation rule evaluation
//!
//! Consumes a [`ConversationContext`] and produces the list of fired
//! [`Trigger`]s. Each rule is evaluated independently; nothing here calls
//! the sentiment analyzer, the score arrives pre-computed in the context.

use std::sync::{Arc, RwLock};

use crate::error::ConfigResult;
use crate::escalation::config::{TriggerConfig, TriggerConfigPatch};
use crate::escalation::rules::{
    find_explicit_requests, find_frustration_indicators, normalize_text, TermMatcher,
    MIN_FRUSTRATION_INDICATORS,
};
use crate::escalation::trigger::{ConversationContext, Trigger, TriggerType};
use crate::telemetry;

/// Thread-safe shared detector; readers evaluate, writers reconfigure.
pub type SharedTriggerDetector = Arc<RwLock<TriggerDetector>>;

/// Holds a rule set and the matchers compiled from it.
#[derive(Debug, Clone)]
pub struct TriggerDetector {
    config: TriggerConfig,
    keywords: TermMatcher,
    phrases: TermMatcher,
}

impl Default for TriggerDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerDetector {
    /// Create a detector with the default rule set
    pub fn new() -> Self {
        Self::with_config(TriggerConfig::default())
    }

    /// Create with a full custom config. Out-of-range values are clamped
    /// and term lists normalized, the same as [`update_config`](Self::update_config).
    pub fn with_config(config: TriggerConfig) -> Self {
        let config = config.sanitized();
        let keywords = TermMatcher::lenient(&config.keywords);
        let phrases = TermMatcher::lenient(&config.phrases);
        Self {
            config,
            keywords,
            phrases,
        }
    }

    /// Create from defaults overlaid with `patch`
    pub fn from_patch(patch: TriggerConfigPatch) -> Self {
        Self::with_config(TriggerConfig::default().merged(patch))
    }

    /// Wrap in an `Arc<RwLock<_>>` for sharing across threads
    pub fn shared(self) -> SharedTriggerDetector {
        Arc::new(RwLock::new(self))
    }

    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// Evaluate every rule and return the ones that fired, in evaluation
    /// order: sentiment, turns, explicit_request, keyword, frustration.
    pub fn analyze(&self, context: &ConversationContext) -> Vec<Trigger> {
        let span = telemetry::trigger_span(context.turn_count, context.last_messages.len());
        let _guard = span.enter();

        let text = normalize_text(&context.joined_text());

        let fired: Vec<Trigger> = [
            self.check_sentiment(context),
            self.check_turns(context),
            self.check_explicit_request(&text),
            self.check_keywords(&text),
            self.check_frustration(&text),
        ]
        .into_iter()
        .flatten()
        .collect();

        for trigger in &fired {
            tracing::debug!(
                trigger = %trigger.trigger_type,
                reason = trigger.reason.as_deref().unwrap_or_default(),
                "escalation trigger fired"
            );
        }
        telemetry::record_trigger_result(
            &span,
            fired.len(),
            highest_priority(&fired).map(|t| t.trigger_type),
        );

        fired
    }

    /// True iff any rule fired
    pub fn should_escalate(&self, context: &ConversationContext) -> bool {
        !self.analyze(context).is_empty()
    }

    /// The fired trigger with the highest priority, if any
    pub fn primary_trigger(&self, context: &ConversationContext) -> Option<Trigger> {
        highest_priority(&self.analyze(context)).cloned()
    }

    /// Reason of the highest-priority fired trigger
    /// (explicit_request > sentiment > turns > keyword > frustration)
    pub fn get_escalation_reason(&self, context: &ConversationContext) -> Option<String> {
        self.primary_trigger(context).and_then(|t| t.reason)
    }

    /// Shallow-merge `patch` into the config, clamping out-of-range values.
    /// Matchers are rebuilt when the keyword or phrase lists change.
    pub fn update_config(&mut self, patch: TriggerConfigPatch) {
        let lists_changed = patch.keywords.is_some() || patch.phrases.is_some();
        self.config.apply(patch);
        if lists_changed {
            self.keywords = TermMatcher::lenient(&self.config.keywords);
            self.phrases = TermMatcher::lenient(&self.config.phrases);
        }
        tracing::debug!(
            sentiment_threshold = self.config.sentiment_threshold,
            max_turns = self.config.max_turns,
            keywords = self.config.keywords.len(),
            phrases = self.config.phrases.len(),
            "trigger config updated"
        );
    }

    /// Like [`update_config`](Self::update_config) but rejects out-of-range
    /// values. On error the detector is left unchanged.
    pub fn try_update_config(&mut self, patch: TriggerConfigPatch) -> ConfigResult<()> {
        patch.validate()?;
        let config = self.config.merged(patch);
        let keywords = TermMatcher::new(&config.keywords)?;
        let phrases = TermMatcher::new(&config.phrases)?;
        *self = Self {
            config,
            keywords,
            phrases,
        };
        Ok(())
    }

    /// Copy of this detector with `patch` applied; `self` is untouched.
    pub fn with_config_patch(&self, patch: TriggerConfigPatch) -> Self {
        let mut next = self.clone();
        next.update_config(patch);
        next
    }

    fn check_sentiment(&self, context: &ConversationContext) -> Option<Trigger> {
        let score = context.sentiment?;
        if score.is_nan() || score > self.config.sentiment_threshold {
            return None;
        }
        Some(
            Trigger::fired(
                TriggerType::Sentiment,
                format!(
                    "Negative sentiment detected (score {:.2}, threshold {:.2})",
                    score, self.config.sentiment_threshold
                ),
            )
            .with_confidence(score.abs().min(1.0)),
        )
    }

    fn check_turns(&self, context: &ConversationContext) -> Option<Trigger> {
        if context.turn_count < self.config.max_turns {
            return None;
        }
        Some(
            Trigger::fired(
                TriggerType::Turns,
                format!(
                    "Conversation turn limit exceeded ({} turns, limit {})",
                    context.turn_count, self.config.max_turns
                ),
            )
            .with_confidence(1.0),
        )
    }

    fn check_explicit_request(&self, text: &str) -> Option<Trigger> {
        let matched = find_explicit_requests(text);
        if matched.is_empty() {
            return None;
        }
        Some(
            Trigger::fired(
                TriggerType::ExplicitRequest,
                "Customer explicitly requested to speak with a human agent",
            )
            .with_confidence(1.0)
            .with_phrases(matched),
        )
    }

    fn check_keywords(&self, text: &str) -> Option<Trigger> {
        let keywords = self.keywords.find_all(text);
        let phrases = self.phrases.find_all(text);
        let total = keywords.len() + phrases.len();
        if total == 0 {
            return None;
        }
        let listed: Vec<&str> = keywords
            .iter()
            .chain(phrases.iter())
            .map(String::as_str)
            .collect();
        Some(
            Trigger::fired(
                TriggerType::Keyword,
                format!("Escalation keywords detected: {}", listed.join(", ")),
            )
            .with_confidence((0.6 + 0.1 * total as f64).min(0.9))
            .with_keywords(keywords)
            .with_phrases(phrases),
        )
    }

    fn check_frustration(&self, text: &str) -> Option<Trigger> {
        let indicators = find_frustration_indicators(text);
        if indicators.len() < MIN_FRUSTRATION_INDICATORS {
            return None;
        }
        Some(
            Trigger::fired(
                TriggerType::Frustration,
                format!(
                    "Customer appears frustrated ({} indicators: {})",
                    indicators.len(),
                    indicators.join(", ")
                ),
            )
            .with_confidence((0.5 + 0.15 * indicators.len() as f64).min(1.0))
            .with_keywords(indicators),
        )
    }
}

/// The trigger whose reason wins: lowest [`TriggerType::priority`] rank.
pub fn highest_priority(fired: &[Trigger]) -> Option<&Trigger> {
    fired.iter().min_by_key(|t| t.trigger_type.priority())
}
