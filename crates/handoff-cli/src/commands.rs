//! Subcommand bodies, written against generic readers and writers.

use std::io::{BufRead, Read, Write};

use anyhow::{Context, Result};
use handoff_engine::{
    ConversationContext, DecisionSummary, SentimentAnalyzer, SentimentResult, TrendReport,
};
use serde::{Deserialize, Serialize};

use crate::decision::Evaluator;

/// Output of `handoff conversation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationReport {
    pub sentiment: SentimentResult,
    pub trend: TrendReport,
    /// Sentiment-only verdict at the configured escalation threshold.
    pub needs_escalation: bool,
}

/// Score a conversation and report its trend.
pub fn conversation_report(messages: &[String], threshold: Option<f64>) -> ConversationReport {
    let analyzer = SentimentAnalyzer::new();
    ConversationReport {
        sentiment: analyzer.analyze_conversation(messages),
        trend: analyzer.trend_report(messages),
        needs_escalation: analyzer.needs_escalation(messages, threshold),
    }
}

/// Parse a JSON array of message strings.
pub fn read_messages(mut reader: impl Read) -> Result<Vec<String>> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .context("Failed to read messages")?;
    serde_json::from_str(&raw).context("Expected a JSON array of message strings")
}

/// Evaluate one JSON `ConversationContext` per line, writing one decision
/// per line. Blank lines are skipped.
pub fn run_batch(
    evaluator: &Evaluator,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<DecisionSummary> {
    let mut summary = DecisionSummary::new();
    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let context: ConversationContext = serde_json::from_str(&line)
            .with_context(|| format!("Invalid conversation context on line {line_no}"))?;
        let decision = evaluator.evaluate(context);
        summary.record(decision.sentiment_score, &decision.triggers);
        serde_json::to_writer(&mut *out, &decision)
            .with_context(|| format!("Failed to write decision for line {line_no}"))?;
        writeln!(out)?;
    }
    tracing::info!(
        evaluations = summary.evaluations,
        escalations = summary.escalations,
        dominant = ?summary.dominant_trigger(),
        "batch complete: {summary}"
    );
    Ok(summary)
}

/// Write `value` as JSON followed by a newline.
pub fn emit<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_engine::Trend;

    #[test]
    fn test_read_messages() {
        let messages = read_messages(r#"["hi", "help"]"#.as_bytes()).unwrap();
        assert_eq!(messages, vec!["hi", "help"]);
        let err = read_messages(r#"{"not": "an array"}"#.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn test_conversation_report() {
        let messages: Vec<String> = ["This is great!", "Fine.", "Now it is broken and useless"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let report = conversation_report(&messages, None);
        assert_eq!(report.trend.trend, Trend::Declining);
        assert!(report.sentiment.score < 0.0);
        assert!(!report.needs_escalation);
    }

    #[test]
    fn test_emit_compact_and_pretty() {
        let mut buf = Vec::new();
        emit(&mut buf, &serde_json::json!({"a": 1}), false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\"a\":1}\n");

        let mut buf = Vec::new();
        emit(&mut buf, &serde_json::json!({"a": 1}), true).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("\n  \"a\": 1"));
    }
}
