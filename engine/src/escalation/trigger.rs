//! Trigger and context types shared by the detector and its callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of escalation condition.
///
/// Declaration order is evaluation order; [`TriggerType::priority`] is the
/// separate order used to pick a single reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// Externally supplied sentiment at or below the threshold
    Sentiment,
    /// Turn count at or above the limit
    Turns,
    /// Customer asked for a person
    ExplicitRequest,
    /// Configured keyword or phrase present
    Keyword,
    /// Two or more frustration indicators present
    Frustration,
}

impl TriggerType {
    /// Evaluation order.
    pub const ALL: [TriggerType; 5] = [
        Self::Sentiment,
        Self::Turns,
        Self::ExplicitRequest,
        Self::Keyword,
        Self::Frustration,
    ];

    /// Rank used for reason selection; lower wins.
    ///
    /// explicit_request > sentiment > turns > keyword > frustration
    pub fn priority(self) -> u8 {
        match self {
            Self::ExplicitRequest => 0,
            Self::Sentiment => 1,
            Self::Turns => 2,
            Self::Keyword => 3,
            Self::Frustration => 4,
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sentiment => write!(f, "sentiment"),
            Self::Turns => write!(f, "turns"),
            Self::ExplicitRequest => write!(f, "explicit_request"),
            Self::Keyword => write!(f, "keyword"),
            Self::Frustration => write!(f, "frustration"),
        }
    }
}

/// Matched terms attached to a trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_phrases: Vec<String>,
}

impl TriggerMetadata {
    pub fn is_empty(&self) -> bool {
        self.matched_keywords.is_empty() && self.matched_phrases.is_empty()
    }
}

/// One evaluated rule outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    pub triggered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "TriggerMetadata::is_empty")]
    pub metadata: TriggerMetadata,
}

impl Trigger {
    /// A fired trigger with its reason.
    pub fn fired(trigger_type: TriggerType, reason: impl Into<String>) -> Self {
        Self {
            trigger_type,
            triggered: true,
            reason: Some(reason.into()),
            confidence: None,
            metadata: TriggerMetadata::default(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.metadata.matched_keywords = keywords;
        self
    }

    pub fn with_phrases(mut self, phrases: Vec<String>) -> Self {
        self.metadata.matched_phrases = phrases;
        self
    }
}

/// Snapshot of a conversation handed to the detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Externally computed score; `None` means no sentiment signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,
    #[serde(default, alias = "turnCount")]
    pub turn_count: u32,
    /// Most recent customer utterances, in the caller's order.
    #[serde(default, alias = "lastMessages", alias = "messages")]
    pub last_messages: Vec<String>,
}

impl ConversationContext {
    pub fn new(turn_count: u32) -> Self {
        Self {
            turn_count,
            ..Self::default()
        }
    }

    pub fn with_sentiment(mut self, sentiment: f64) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.last_messages = messages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.last_messages.push(message.into());
        self
    }

    /// All messages joined into one searchable text.
    pub fn joined_text(&self) -> String {
        self.last_messages.join(" ")
    }
}
