//! Command-line front end for the handoff escalation engine
//!
//! # Usage
//!
//! ```bash
//! # Score a single message (or pipe it on stdin)
//! handoff sentiment "This is not good at all"
//!
//! # Score a conversation and its trend from a JSON array of messages
//! handoff conversation --file chat.json
//!
//! # Full decision for one conversation
//! handoff evaluate --turns 6 "I want a refund" "talk to a human please"
//!
//! # One decision per JSON line, summary logged at the end
//! handoff --config handoff.toml batch --input contexts.jsonl
//! ```

pub mod commands;
pub mod config;
pub mod decision;

pub use config::HandoffConfig;
pub use decision::{EscalationDecision, Evaluator};
