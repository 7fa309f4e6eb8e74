//! Sentiment Analysis — lexicon-based polarity scoring for support messages
//!
//! Deterministic and explainable: every score can be traced back to the
//! words, markers and emoticons listed in [`SentimentDetails`].
//!
//! ```text
//! text ──► tokenizer ──► lexicon lookup ──► scope handling ──► normalize ──► SentimentResult
//!                         (words, emoji)    (negation 3,        (tanh score,
//!                                            intensifier 2)      capped magnitude)
//! ```

pub mod analyzer;
pub mod lexicon;
pub mod tokenizer;

pub use analyzer::{
    SentimentAnalyzer, SentimentDetails, SentimentInput, SentimentLabel, SentimentResult, Trend,
    TrendReport,
};
pub use lexicon::DEFAULT_ESCALATION_THRESHOLD;
