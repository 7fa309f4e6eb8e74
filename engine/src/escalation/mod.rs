//! Escalation triggers — rule-based handoff conditions
//!
//! Decides whether a conversation should leave automation for a human agent.
//! Every rule is independent and deterministic; the detector returns the
//! rules that fired and picks one reason by fixed priority.
//!
//! ```text
//! ConversationContext { sentiment?, turn_count, last_messages }
//!     │
//!     ├─ sentiment        score <= sentiment_threshold
//!     ├─ turns            turn_count >= max_turns
//!     ├─ explicit_request "talk to a human", "transfer me", ...
//!     ├─ keyword          configured keywords / phrases
//!     └─ frustration      >= 2 frustration indicators
//!     │
//!     ▼
//! Vec<Trigger>  ──►  should_escalate = !is_empty()
//!               ──►  reason = highest priority
//!                    explicit_request > sentiment > turns > keyword > frustration
//! ```

pub mod config;
pub mod detector;
pub mod rules;
pub mod trigger;

pub use config::{
    TriggerConfig, TriggerConfigPatch, DEFAULT_KEYWORDS, DEFAULT_MAX_TURNS, DEFAULT_PHRASES,
    DEFAULT_SENTIMENT_THRESHOLD,
};
pub use detector::{highest_priority, SharedTriggerDetector, TriggerDetector};
pub use trigger::{ConversationContext, Trigger, TriggerMetadata, TriggerType};
