//! Orchestration: score a conversation, run the detector, decide.
//!
//! The engine's two components stay independent; this is the one place that
//! feeds the analyzer's score into the detector's context.

use handoff_engine::escalation::highest_priority;
use handoff_engine::{
    ConversationContext, SentimentAnalyzer, SentimentResult, Trigger, TriggerDetector,
    TriggerType, TrendReport,
};
use serde::{Deserialize, Serialize};

/// Outcome of evaluating one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationDecision {
    /// True iff at least one trigger fired.
    pub escalate: bool,
    /// Reason of the highest-priority trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<TriggerType>,
    /// Score handed to the detector; supplied by the caller or computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    /// Computed analysis of the messages, absent when there were none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentResult>,
    /// Sentiment-only verdict at the configured escalation threshold.
    pub sentiment_alert: bool,
    pub trend: TrendReport,
    pub triggers: Vec<Trigger>,
}

/// Analyzer plus detector plus the sentiment-only threshold.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    analyzer: SentimentAnalyzer,
    detector: TriggerDetector,
    escalation_threshold: Option<f64>,
}

impl Evaluator {
    pub fn new(detector: TriggerDetector, escalation_threshold: Option<f64>) -> Self {
        Self {
            analyzer: SentimentAnalyzer::new(),
            detector,
            escalation_threshold,
        }
    }

    pub fn detector(&self) -> &TriggerDetector {
        &self.detector
    }

    /// Evaluate `context`. A missing sentiment score is computed from the
    /// messages; a supplied one is used as-is.
    pub fn evaluate(&self, mut context: ConversationContext) -> EscalationDecision {
        let analysis = if context.last_messages.is_empty() {
            None
        } else {
            Some(self.analyzer.analyze_conversation(&context.last_messages))
        };
        if context.sentiment.is_none() {
            context.sentiment = analysis.as_ref().map(|r| r.score);
        }

        let trend = self.analyzer.trend_report(&context.last_messages);
        let threshold = self
            .escalation_threshold
            .unwrap_or(handoff_engine::sentiment::DEFAULT_ESCALATION_THRESHOLD);
        let sentiment_alert = context.sentiment.is_some_and(|s| s <= threshold);

        let triggers = self.detector.analyze(&context);
        let primary = highest_priority(&triggers);
        let decision = EscalationDecision {
            escalate: !triggers.is_empty(),
            reason: primary.and_then(|t| t.reason.clone()),
            primary: primary.map(|t| t.trigger_type),
            sentiment_score: context.sentiment,
            sentiment: analysis,
            sentiment_alert,
            trend,
            triggers,
        };

        tracing::debug!(
            escalate = decision.escalate,
            triggers = decision.triggers.len(),
            sentiment = ?decision.sentiment_score,
            "evaluated conversation"
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_engine::{Trend, TriggerConfigPatch};

    #[test]
    fn test_computes_sentiment_when_missing() {
        let evaluator = Evaluator::default();
        let d = evaluator.evaluate(
            ConversationContext::new(2).with_messages(["This is terrible and awful!"]),
        );
        let computed = d.sentiment.as_ref().unwrap().score;
        assert_eq!(d.sentiment_score, Some(computed));
        assert!(d.sentiment_alert);
        assert!(d.escalate);
        assert_eq!(d.primary, Some(TriggerType::Sentiment));
    }

    #[test]
    fn test_supplied_sentiment_wins() {
        let evaluator = Evaluator::default();
        let d = evaluator.evaluate(
            ConversationContext::new(2)
                .with_sentiment(0.3)
                .with_messages(["This is terrible and awful!"]),
        );
        assert_eq!(d.sentiment_score, Some(0.3));
        assert!(!d.sentiment_alert);
        assert!(d.sentiment.unwrap().score < 0.0);
    }

    #[test]
    fn test_quiet_conversation() {
        let evaluator = Evaluator::default();
        let d = evaluator.evaluate(ConversationContext::new(1).with_messages(["Hello", "Hi"]));
        assert!(!d.escalate);
        assert_eq!(d.reason, None);
        assert_eq!(d.trend.trend, Trend::Stable);
        assert!(d.triggers.is_empty());
    }

    #[test]
    fn test_no_messages() {
        let evaluator =
            Evaluator::new(TriggerDetector::from_patch(TriggerConfigPatch::new().max_turns(3)), None);
        let d = evaluator.evaluate(ConversationContext::new(3));
        assert_eq!(d.sentiment, None);
        assert_eq!(d.sentiment_score, None);
        assert_eq!(d.primary, Some(TriggerType::Turns));
        assert_eq!(evaluator.detector().config().max_turns, 3);
    }

    #[test]
    fn test_custom_escalation_threshold() {
        let evaluator = Evaluator::new(TriggerDetector::new(), Some(-0.9));
        let d = evaluator.evaluate(ConversationContext::new(1).with_sentiment(-0.6));
        assert!(!d.sentiment_alert);
        assert!(d.escalate);
    }
}
