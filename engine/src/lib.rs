//! Handoff Engine — escalation detection for automated support conversations
//!
//! Two independent, deterministic components:
//!
//! - [`sentiment`]: lexicon-based polarity scoring of single messages and
//!   whole conversations, with trend detection.
//! - [`escalation`]: rule-based triggers (sentiment, turn count, explicit
//!   requests, keywords, frustration) that decide when a human takes over.
//!
//! The components never call each other. A caller scores the conversation,
//! puts the score into a [`ConversationContext`], and hands that to the
//! detector:
//!
//! ```rust
//! use handoff_engine::{analyze_conversation_sentiment, should_escalate, ConversationContext};
//!
//! let messages = ["My order never arrived", "This is terrible, I want a refund"];
//! let sentiment = analyze_conversation_sentiment(&messages);
//! let context = ConversationContext::new(2)
//!     .with_sentiment(sentiment.score)
//!     .with_messages(messages);
//! assert!(should_escalate(&context, None));
//! ```
//!
//! The free functions below use default configuration unless a patch is
//! supplied; hold a [`TriggerDetector`] directly to keep custom rules around.

pub mod error;
pub mod escalation;
pub mod sentiment;
pub mod telemetry;

use std::sync::LazyLock;

pub use error::{ConfigError, ConfigResult};
pub use escalation::{
    ConversationContext, SharedTriggerDetector, Trigger, TriggerConfig, TriggerConfigPatch,
    TriggerDetector, TriggerMetadata, TriggerType,
};
pub use sentiment::{
    SentimentAnalyzer, SentimentDetails, SentimentInput, SentimentLabel, SentimentResult, Trend,
    TrendReport,
};
pub use telemetry::DecisionSummary;

static DEFAULT_DETECTOR: LazyLock<TriggerDetector> = LazyLock::new(TriggerDetector::new);

/// Score one message.
pub fn analyze_sentiment(text: &str) -> SentimentResult {
    SentimentAnalyzer::new().analyze(text)
}

/// Score a conversation, weighting later messages more heavily.
pub fn analyze_conversation_sentiment<S: AsRef<str>>(messages: &[S]) -> SentimentResult {
    SentimentAnalyzer::new().analyze_conversation(messages)
}

/// True when the score of `input` is at or below `threshold` (default -0.5).
pub fn needs_escalation<'a>(input: impl Into<SentimentInput<'a>>, threshold: Option<f64>) -> bool {
    SentimentAnalyzer::new().needs_escalation(input, threshold)
}

/// Fired triggers for `context`, using defaults overlaid with `config`.
pub fn detect_escalation_triggers(
    context: &ConversationContext,
    config: Option<&TriggerConfigPatch>,
) -> Vec<Trigger> {
    match config {
        Some(patch) => TriggerDetector::from_patch(patch.clone()).analyze(context),
        None => DEFAULT_DETECTOR.analyze(context),
    }
}

/// True iff any trigger fires for `context`.
pub fn should_escalate(context: &ConversationContext, config: Option<&TriggerConfigPatch>) -> bool {
    !detect_escalation_triggers(context, config).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_functions_match_components() {
        let text = "This is terrible and awful!";
        assert_eq!(analyze_sentiment(text), SentimentAnalyzer::new().analyze(text));

        let messages = vec!["fine".to_string(), "now it is broken".to_string()];
        assert_eq!(
            analyze_conversation_sentiment(&messages),
            SentimentAnalyzer::new().analyze_conversation(&messages)
        );
    }

    #[test]
    fn test_needs_escalation_default_threshold() {
        assert!(needs_escalation("This is terrible and awful!", None));
        assert!(!needs_escalation("Thanks, that works great", None));
        assert!(!needs_escalation("This is terrible and awful!", Some(-1.0)));
        assert!(needs_escalation(&["ok", "I hate this, it is useless"], None));
    }

    #[test]
    fn test_detect_with_patch_overrides_defaults() {
        let context = ConversationContext::new(5).with_message("Hello");
        assert!(detect_escalation_triggers(&context, None).is_empty());

        let patch = TriggerConfigPatch::new().max_turns(5);
        let triggers = detect_escalation_triggers(&context, Some(&patch));
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].trigger_type, TriggerType::Turns);
        assert!(should_escalate(&context, Some(&patch)));
        assert!(!should_escalate(&context, None));
    }

    #[test]
    fn test_components_compose() {
        let messages = ["My order never arrived", "This is terrible, I want a refund"];
        let sentiment = analyze_conversation_sentiment(&messages);
        let context = ConversationContext::new(2)
            .with_sentiment(sentiment.score)
            .with_messages(messages);
        assert!(should_escalate(&context, None));
    }
}
