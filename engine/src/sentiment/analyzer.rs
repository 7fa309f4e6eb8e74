//! Lexicon-based sentiment analyzer.
//!
//! Scores a single text by walking its tokens once, tracking negation and
//! intensifier scopes, then normalizes the raw sums into `[-1, 1]` (score)
//! and `[0, 1]` (magnitude). Conversations are combined with linear recency
//! weights so the latest messages dominate.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lexicon::{
    classify, Polarity, TokenClass, CONFIDENCE_PER_SIGNAL, CONVERSATION_CONFIDENCE_SATURATION,
    DEFAULT_ESCALATION_THRESHOLD, INTENSIFIER_BOOST, INTENSIFIER_WINDOW, MAGNITUDE_SATURATION,
    MIN_TREND_MESSAGES, NEGATION_WINDOW, SCORE_SCALE, TREND_EPSILON, UNIT_WEIGHT,
};
use super::tokenizer::{tokenize, Token};
use crate::telemetry;

/// Discrete sentiment bucket derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl SentimentLabel {
    /// Map a score to its label. Buckets are contiguous and non-overlapping:
    /// `> 0.5`, `(0.2, 0.5]`, `[-0.2, 0.2]`, `[-0.5, -0.2)`, `< -0.5`.
    pub fn from_score(score: f64) -> Self {
        if score > 0.5 {
            Self::VeryPositive
        } else if score > 0.2 {
            Self::Positive
        } else if score >= -0.2 {
            Self::Neutral
        } else if score >= -0.5 {
            Self::Negative
        } else {
            Self::VeryNegative
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Self::Negative | Self::VeryNegative)
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VeryPositive => write!(f, "very_positive"),
            Self::Positive => write!(f, "positive"),
            Self::Neutral => write!(f, "neutral"),
            Self::Negative => write!(f, "negative"),
            Self::VeryNegative => write!(f, "very_negative"),
        }
    }
}

/// Tokens that contributed to a result, each recorded once in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentDetails {
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub negations: Vec<String>,
    pub intensifiers: Vec<String>,
    pub emoticons: Vec<String>,
}

impl SentimentDetails {
    /// Union `other` into `self`, keeping the first occurrence of each entry.
    pub fn merge(&mut self, other: &SentimentDetails) {
        for (dst, src) in [
            (&mut self.positive_words, &other.positive_words),
            (&mut self.negative_words, &other.negative_words),
            (&mut self.negations, &other.negations),
            (&mut self.intensifiers, &other.intensifiers),
            (&mut self.emoticons, &other.emoticons),
        ] {
            for item in src {
                record(dst, item);
            }
        }
    }

    /// Distinct polarity-bearing tokens (words and emoticons).
    pub fn signal_count(&self) -> usize {
        self.positive_words.len() + self.negative_words.len() + self.emoticons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal_count() == 0 && self.negations.is_empty() && self.intensifiers.is_empty()
    }
}

fn record(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}

/// Output of a single scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Signed polarity in `[-1, 1]`.
    pub score: f64,
    /// Unsigned strength in `[0, 1]`.
    pub magnitude: f64,
    pub label: SentimentLabel,
    /// How much signal backs the score, in `[0, 1]`.
    pub confidence: f64,
    pub details: SentimentDetails,
}

impl SentimentResult {
    /// The result for input that carries no signal at all.
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            magnitude: 0.0,
            label: SentimentLabel::Neutral,
            confidence: 0.0,
            details: SentimentDetails::default(),
        }
    }
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Direction a conversation's sentiment is moving in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Stable,
    Improving,
    Declining,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable => write!(f, "stable"),
            Self::Improving => write!(f, "improving"),
            Self::Declining => write!(f, "declining"),
        }
    }
}

/// The numbers behind a [`Trend`] verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub trend: Trend,
    /// Mean score of the earlier window (0 when too few messages).
    pub early_average: f64,
    /// Mean score of the later window (0 when too few messages).
    pub late_average: f64,
    /// `late_average - early_average`.
    pub delta: f64,
    pub messages_considered: usize,
}

/// Input accepted by [`SentimentAnalyzer::needs_escalation`]: one text or a
/// whole conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentimentInput<'a> {
    Text(&'a str),
    Conversation(Vec<&'a str>),
}

impl<'a> From<&'a str> for SentimentInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for SentimentInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<'a, S: AsRef<str>> From<&'a [S]> for SentimentInput<'a> {
    fn from(messages: &'a [S]) -> Self {
        Self::Conversation(messages.iter().map(AsRef::as_ref).collect())
    }
}

impl<'a, S: AsRef<str>> From<&'a Vec<S>> for SentimentInput<'a> {
    fn from(messages: &'a Vec<S>) -> Self {
        Self::from(messages.as_slice())
    }
}

impl<'a, S: AsRef<str>, const N: usize> From<&'a [S; N]> for SentimentInput<'a> {
    fn from(messages: &'a [S; N]) -> Self {
        Self::from(messages.as_slice())
    }
}

/// Stateless, deterministic sentiment scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score a single text.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let mut details = SentimentDetails::default();
        let mut raw = 0.0_f64;
        let mut raw_magnitude = 0.0_f64;

        // Remaining tokens in each scope; 0 means inactive.
        let mut negation_left = 0usize;
        let mut boost_left = 0usize;
        let mut boost = 1.0_f64;

        for token in tokenize(text) {
            let term = match token {
                Token::Term(term) => term,
                Token::Break => {
                    negation_left = 0;
                    boost_left = 0;
                    boost = 1.0;
                    continue;
                }
            };

            match classify(&term) {
                TokenClass::Negation => {
                    record(&mut details.negations, &term);
                    negation_left = NEGATION_WINDOW;
                }
                TokenClass::Intensifier => {
                    record(&mut details.intensifiers, &term);
                    boost = if boost_left > 0 {
                        boost * INTENSIFIER_BOOST
                    } else {
                        INTENSIFIER_BOOST
                    };
                    boost_left = INTENSIFIER_WINDOW;
                    negation_left = negation_left.saturating_sub(1);
                }
                TokenClass::Word(polarity) => {
                    match polarity {
                        Polarity::Positive => record(&mut details.positive_words, &term),
                        Polarity::Negative => record(&mut details.negative_words, &term),
                    }
                    let mut weight = UNIT_WEIGHT * polarity.sign();
                    if boost_left > 0 {
                        weight *= boost;
                    }
                    if negation_left > 0 {
                        weight = -weight;
                    }
                    raw += weight;
                    raw_magnitude += weight.abs();

                    // A sentiment word consumes both scopes.
                    negation_left = 0;
                    boost_left = 0;
                    boost = 1.0;
                }
                TokenClass::Emoticon(polarity) => {
                    // Emoticons carry their own tone; scopes do not apply.
                    record(&mut details.emoticons, &term);
                    raw += UNIT_WEIGHT * polarity.sign();
                    raw_magnitude += UNIT_WEIGHT;
                }
                TokenClass::Other => {
                    negation_left = negation_left.saturating_sub(1);
                    boost_left = boost_left.saturating_sub(1);
                    if boost_left == 0 {
                        boost = 1.0;
                    }
                }
            }
        }

        let score = (raw / SCORE_SCALE).tanh().clamp(-1.0, 1.0);
        let magnitude = (raw_magnitude / MAGNITUDE_SATURATION).clamp(0.0, 1.0);
        let confidence = (details.signal_count() as f64 * CONFIDENCE_PER_SIGNAL).min(1.0);

        SentimentResult {
            score,
            magnitude,
            label: SentimentLabel::from_score(score),
            confidence,
            details,
        }
    }

    /// Score a conversation. Message `i` is weighted `i + 1`, so later
    /// messages always count for more than earlier ones.
    pub fn analyze_conversation<S: AsRef<str>>(&self, messages: &[S]) -> SentimentResult {
        let span = telemetry::sentiment_span(messages.len());
        let _guard = span.enter();

        if messages.is_empty() {
            return SentimentResult::neutral();
        }

        let mut details = SentimentDetails::default();
        let mut total_weight = 0.0;
        let mut weighted_score = 0.0;
        let mut weighted_magnitude = 0.0;

        for (i, message) in messages.iter().enumerate() {
            let result = self.analyze(message.as_ref());
            let weight = (i + 1) as f64;
            total_weight += weight;
            weighted_score += result.score * weight;
            weighted_magnitude += result.magnitude * weight;
            details.merge(&result.details);
        }

        let score = (weighted_score / total_weight).clamp(-1.0, 1.0);
        let magnitude = (weighted_magnitude / total_weight).clamp(0.0, 1.0);
        let confidence = (messages.len() as f64 / CONVERSATION_CONFIDENCE_SATURATION).min(1.0);
        let label = SentimentLabel::from_score(score);

        telemetry::record_sentiment_result(&span, score, label);
        tracing::debug!(
            messages = messages.len(),
            score,
            label = %label,
            "scored conversation"
        );

        SentimentResult {
            score,
            magnitude,
            label,
            confidence,
            details,
        }
    }

    /// Compare the earlier half of a conversation against the later half.
    pub fn detect_trend<S: AsRef<str>>(&self, messages: &[S]) -> Trend {
        self.trend_report(messages).trend
    }

    /// Like [`detect_trend`](Self::detect_trend) but also returns the window
    /// averages. For odd lengths the middle message belongs to neither window.
    pub fn trend_report<S: AsRef<str>>(&self, messages: &[S]) -> TrendReport {
        let n = messages.len();
        if n < MIN_TREND_MESSAGES {
            return TrendReport {
                trend: Trend::Stable,
                early_average: 0.0,
                late_average: 0.0,
                delta: 0.0,
                messages_considered: n,
            };
        }

        let scores: Vec<f64> = messages
            .iter()
            .map(|m| self.analyze(m.as_ref()).score)
            .collect();
        let half = n / 2;
        let early_average = mean(&scores[..half]);
        let late_average = mean(&scores[n - half..]);
        let delta = late_average - early_average;

        let trend = if delta > TREND_EPSILON {
            Trend::Improving
        } else if delta < -TREND_EPSILON {
            Trend::Declining
        } else {
            Trend::Stable
        };

        TrendReport {
            trend,
            early_average,
            late_average,
            delta,
            messages_considered: n,
        }
    }

    /// True when the score of `input` is at or below `threshold`
    /// (default [`DEFAULT_ESCALATION_THRESHOLD`]).
    pub fn needs_escalation<'a>(
        &self,
        input: impl Into<SentimentInput<'a>>,
        threshold: Option<f64>,
    ) -> bool {
        let threshold = threshold.unwrap_or(DEFAULT_ESCALATION_THRESHOLD);
        let result = match input.into() {
            SentimentInput::Text(text) => self.analyze(text),
            SentimentInput::Conversation(messages) => self.analyze_conversation(messages.as_slice()),
        };
        result.score <= threshold
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> SentimentAnalyzer {
        SentimentAnalyzer::new()
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let r = analyzer().analyze("");
        assert_eq!(r.score, 0.0);
        assert_eq!(r.magnitude, 0.0);
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert_eq!(r.confidence, 0.0);
        assert!(r.details.is_empty());
    }

    #[test]
    fn test_punctuation_only_is_neutral() {
        let r = analyzer().analyze("?!... ,,, ;;");
        assert_eq!(r, SentimentResult::neutral());
    }

    #[test]
    fn test_positive_text() {
        let r = analyzer().analyze("This is great and amazing!");
        assert!(r.score > 0.0);
        assert!(matches!(
            r.label,
            SentimentLabel::Positive | SentimentLabel::VeryPositive
        ));
        assert_eq!(r.details.positive_words, vec!["great", "amazing"]);
    }

    #[test]
    fn test_negative_text() {
        let r = analyzer().analyze("This is terrible and awful!");
        assert!(r.score < 0.0);
        assert_eq!(r.details.negative_words, vec!["terrible", "awful"]);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let r = analyzer().analyze("This is not good.");
        assert!(r.score < 0.0, "expected negative, got {}", r.score);
        assert_eq!(r.details.negations, vec!["not"]);
        assert_eq!(r.details.positive_words, vec!["good"]);
    }

    #[test]
    fn test_negation_recorded_without_target() {
        let r = analyzer().analyze("I don't know");
        assert_eq!(r.details.negations, vec!["don't"]);
        assert_eq!(r.score, 0.0);
    }

    #[test]
    fn test_negation_scope_is_bounded() {
        // "good" sits four tokens after "not": outside the window.
        let r = analyzer().analyze("not that it was ever good");
        assert!(r.score > 0.0);
    }

    #[test]
    fn test_negation_stops_at_clause_break() {
        let r = analyzer().analyze("No, this is terrible");
        assert!(r.score < 0.0);
    }

    #[test]
    fn test_no_problem_reads_positive() {
        let r = analyzer().analyze("No problem");
        assert!(r.score > 0.0);
    }

    #[test]
    fn test_intensifier_scales_without_flipping() {
        let plain = analyzer().analyze("This is good.");
        let boosted = analyzer().analyze("This is very good.");
        assert_eq!(boosted.details.intensifiers, vec!["very"]);
        assert!(boosted.score > plain.score);
        assert!(boosted.magnitude > plain.magnitude);
    }

    #[test]
    fn test_stacked_intensifiers() {
        let one = analyzer().analyze("really bad");
        let two = analyzer().analyze("really very bad");
        assert!(two.score < one.score);
    }

    #[test]
    fn test_emoticons_and_emoji() {
        let r = analyzer().analyze("thanks :) 👍");
        assert_eq!(r.details.emoticons, vec![":)", "👍"]);
        assert!(r.score > 0.0);

        let r = analyzer().analyze("still waiting :( 😡");
        assert_eq!(r.details.emoticons, vec![":(", "😡"]);
        assert!(r.score < 0.0);
    }

    #[test]
    fn test_glued_leading_emoticon_counts() {
        let r = analyzer().analyze(":)thanks");
        assert_eq!(r.details.emoticons, vec![":)"]);
        assert_eq!(r.details.positive_words, vec!["thanks"]);
        assert!(r.score > analyzer().analyze("thanks").score);
    }

    #[test]
    fn test_plan_letters_are_not_emoticons() {
        let r = analyzer().analyze("Plan d: is fine");
        assert!(r.details.emoticons.is_empty());
        assert_eq!(r.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_case_insensitive() {
        let lower = analyzer().analyze("this is terrible");
        let upper = analyzer().analyze("THIS IS TERRIBLE");
        assert_eq!(lower.score, upper.score);
        assert_eq!(upper.details.negative_words, vec!["terrible"]);
    }

    #[test]
    fn test_duplicates_recorded_once_but_counted() {
        let once = analyzer().analyze("bad");
        let twice = analyzer().analyze("bad bad");
        assert_eq!(twice.details.negative_words, vec!["bad"]);
        assert!(twice.score < once.score);
    }

    #[test]
    fn test_bounds_hold_for_loaded_text() {
        let text = "terrible awful horrible worst hate useless ".repeat(50);
        let r = analyzer().analyze(&text);
        assert!((-1.0..=1.0).contains(&r.score));
        assert_eq!(r.magnitude, 1.0);
        assert_eq!(r.label, SentimentLabel::VeryNegative);
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn test_confidence_grows_with_signals() {
        let one = analyzer().analyze("good");
        let two = analyzer().analyze("good and nice");
        assert!(one.confidence > 0.0);
        assert!(two.confidence > one.confidence);
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(SentimentLabel::from_score(0.51), SentimentLabel::VeryPositive);
        assert_eq!(SentimentLabel::from_score(0.5), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.21), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.2), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.2), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.21), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(-0.5), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(-0.51), SentimentLabel::VeryNegative);
    }

    #[test]
    fn test_conversation_empty() {
        let empty: [&str; 0] = [];
        let r = analyzer().analyze_conversation(&empty);
        assert_eq!(r.score, 0.0);
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn test_conversation_recency_weighting() {
        let r = analyzer().analyze_conversation(&[
            "This is amazing!",
            "But now I am very disappointed and frustrated.",
        ]);
        assert!(r.score < 0.0, "expected negative, got {}", r.score);
        assert_eq!(r.details.positive_words, vec!["amazing"]);
        assert_eq!(r.details.negative_words, vec!["disappointed", "frustrated"]);
    }

    #[test]
    fn test_conversation_order_matters() {
        let a = analyzer().analyze_conversation(&["great", "bad"]);
        let b = analyzer().analyze_conversation(&["bad", "great"]);
        assert!(a.score < b.score);
    }

    #[test]
    fn test_conversation_confidence_grows_with_length() {
        let one = analyzer().analyze_conversation(&["hello"]);
        let three = analyzer().analyze_conversation(&["hello", "hi", "hey"]);
        let many = analyzer().analyze_conversation(&["hello"; 12]);
        assert!(one.confidence > 0.0);
        assert!(three.confidence > one.confidence);
        assert_eq!(many.confidence, 1.0);
    }

    #[test]
    fn test_trend_too_short_is_stable() {
        assert_eq!(analyzer().detect_trend(&["Hello", "Hi"]), Trend::Stable);
    }

    #[test]
    fn test_trend_declining() {
        let messages = [
            "This is great, thanks!",
            "Okay, that works",
            "Hmm, still waiting",
            "This is terrible and I am very angry",
        ];
        assert_eq!(analyzer().detect_trend(&messages), Trend::Declining);
    }

    #[test]
    fn test_trend_improving() {
        let messages = [
            "This is terrible, nothing happens",
            "Still broken and useless",
            "Okay, that looks better",
            "It works now, thank you so much!",
        ];
        assert_eq!(analyzer().detect_trend(&messages), Trend::Improving);
    }

    #[test]
    fn test_trend_identical_messages_are_stable() {
        let messages = ["This is bad"; 5];
        let report = analyzer().trend_report(&messages);
        assert_eq!(report.trend, Trend::Stable);
        assert_eq!(report.delta, 0.0);
        assert_eq!(report.messages_considered, 5);
    }

    #[test]
    fn test_trend_report_excludes_middle_message() {
        let report = analyzer().trend_report(&["good", "terrible terrible terrible", "good"]);
        assert_eq!(report.trend, Trend::Stable);
        assert_eq!(report.early_average, report.late_average);
    }

    #[test]
    fn test_needs_escalation_text_and_conversation() {
        let a = analyzer();
        assert!(a.needs_escalation("This is terrible, awful and useless!", None));
        assert!(!a.needs_escalation("Thanks, that was helpful", None));

        let convo = vec!["hello".to_string(), "this is the worst, I hate it".to_string()];
        assert!(a.needs_escalation(&convo, None));
        assert!(!a.needs_escalation(&convo, Some(-0.99)));
    }

    #[test]
    fn test_needs_escalation_threshold_is_inclusive() {
        let a = analyzer();
        let score = a.analyze("bad").score;
        assert!(a.needs_escalation("bad", Some(score)));
    }

    #[test]
    fn test_result_serializes_with_camel_case_details() {
        let r = analyzer().analyze("not very good :)");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["label"], "negative");
        assert!(json["details"]["positiveWords"].is_array());
        assert_eq!(json["details"]["emoticons"][0], ":)");
    }
}
