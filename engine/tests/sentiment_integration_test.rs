//! Sentiment integration tests — scoring behaviour through the public API.
//!
//! Covers:
//! - Score and magnitude bounds over varied input
//! - Polarity, negation and intensifier handling on reference sentences
//! - Recency weighting of conversations
//! - Trend detection in both directions
//! - Escalation threshold checks for text and conversations

use handoff_engine::{
    analyze_conversation_sentiment, analyze_sentiment, needs_escalation, SentimentAnalyzer,
    SentimentLabel, Trend,
};

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "Hello",
    "This is great and amazing!",
    "This is terrible and awful!",
    "not not not not good",
    "very very very extremely really terrible terrible terrible awful awful",
    "love love love love love love love love love love love",
    "😡😡😡😡 :( :( :( 👎",
    "!!!???...,,,",
    "Ça ne marche pas 🙂 thanks",
];

#[test]
fn scores_and_magnitudes_stay_in_range() {
    let analyzer = SentimentAnalyzer::new();
    for text in SAMPLES {
        let r = analyzer.analyze(text);
        assert!((-1.0..=1.0).contains(&r.score), "{text:?} score {}", r.score);
        assert!((0.0..=1.0).contains(&r.magnitude), "{text:?} magnitude {}", r.magnitude);
        assert!((0.0..=1.0).contains(&r.confidence), "{text:?}");
        assert_eq!(r.label, SentimentLabel::from_score(r.score));
    }
    let r = analyzer.analyze_conversation(SAMPLES);
    assert!((-1.0..=1.0).contains(&r.score));
    assert!((0.0..=1.0).contains(&r.magnitude));
}

#[test]
fn empty_text_is_neutral_with_zero_confidence() {
    let r = analyze_sentiment("");
    assert_eq!(r.score, 0.0);
    assert_eq!(r.label, SentimentLabel::Neutral);
    assert_eq!(r.confidence, 0.0);
    assert!(r.details.is_empty());
}

#[test]
fn positive_sentence() {
    let r = analyze_sentiment("This is great and amazing!");
    assert!(r.score > 0.0);
    assert!(matches!(
        r.label,
        SentimentLabel::Positive | SentimentLabel::VeryPositive
    ));
    assert!(r.details.positive_words.contains(&"great".to_string()));
    assert!(r.details.positive_words.contains(&"amazing".to_string()));
}

#[test]
fn negative_sentence() {
    let r = analyze_sentiment("This is terrible and awful!");
    assert!(r.score < 0.0);
    assert!(r.label.is_negative());
    assert!(r.details.negative_words.contains(&"terrible".to_string()));
    assert!(r.details.negative_words.contains(&"awful".to_string()));
}

#[test]
fn negation_is_recorded_and_flips_polarity() {
    let r = analyze_sentiment("This is not good.");
    assert_eq!(r.details.negations, vec!["not"]);
    assert!(r.score < 0.0);
}

#[test]
fn intensifier_is_recorded_and_amplifies() {
    let boosted = analyze_sentiment("This is very good.");
    let plain = analyze_sentiment("This is good.");
    assert_eq!(boosted.details.intensifiers, vec!["very"]);
    assert!(boosted.score > plain.score);
}

#[test]
fn later_messages_dominate_a_conversation() {
    let r = analyze_conversation_sentiment(&[
        "This is amazing!",
        "But now I am very disappointed and frustrated.",
    ]);
    assert!(r.score < 0.0);
    assert!(r.details.positive_words.contains(&"amazing".to_string()));
    assert!(r.details.negative_words.contains(&"disappointed".to_string()));

    let reversed = analyze_conversation_sentiment(&[
        "But now I am very disappointed and frustrated.",
        "This is amazing!",
    ]);
    assert!(reversed.score > r.score);
}

#[test]
fn empty_conversation_is_neutral() {
    let empty: [&str; 0] = [];
    let r = analyze_conversation_sentiment(&empty);
    assert_eq!(r.score, 0.0);
    assert_eq!(r.confidence, 0.0);
}

#[test]
fn trend_detection() {
    let analyzer = SentimentAnalyzer::new();
    assert_eq!(analyzer.detect_trend(&["Hello", "Hi"]), Trend::Stable);

    let declining = [
        "This is great!",
        "I love it, thanks!",
        "Hmm.",
        "This is terrible.",
        "Awful, I hate it!",
    ];
    assert_eq!(analyzer.detect_trend(&declining), Trend::Declining);

    let mut improving = declining;
    improving.reverse();
    assert_eq!(analyzer.detect_trend(&improving), Trend::Improving);

    let report = analyzer.trend_report(&declining);
    assert_eq!(report.messages_considered, 5);
    assert!(report.early_average > 0.0);
    assert!(report.late_average < 0.0);
    assert!((report.delta - (report.late_average - report.early_average)).abs() < 1e-12);
}

#[test]
fn escalation_threshold_for_text_and_conversation() {
    assert!(needs_escalation("This is terrible and awful!", None));
    assert!(!needs_escalation("This is great and amazing!", None));
    assert!(needs_escalation("This is great and amazing!", Some(1.0)));

    let messages = vec!["ok".to_string(), "I hate this, it is useless".to_string()];
    assert!(needs_escalation(&messages, None));
    assert!(!needs_escalation(&messages, Some(-0.9)));
}

#[test]
fn result_serializes_with_snake_case_label() {
    let r = analyze_sentiment("This is great and amazing!");
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["label"], "very_positive");
    assert_eq!(json["details"]["positiveWords"][0], "great");
}
