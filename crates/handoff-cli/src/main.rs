//! `handoff` — score support conversations and decide when to escalate
//!
//! Logging goes to stderr (`RUST_LOG`, default `info`); results go to
//! stdout as JSON.
//!
//! ```bash
//! HANDOFF_MAX_TURNS=6 handoff evaluate --turns 7 "where is my order"
//! RUST_LOG=handoff_engine=debug handoff batch --input contexts.jsonl
//! ```

use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use handoff_cli::commands::{self, conversation_report};
use handoff_cli::{Evaluator, HandoffConfig};
use handoff_engine::{ConversationContext, SentimentAnalyzer};
use tracing::info;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "handoff", author, version, about, long_about = None)]
struct Cli {
    /// TOML config file (overrides HANDOFF_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reject out-of-range config values instead of clamping them
    #[arg(long, global = true, default_value_t = false)]
    strict: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one message; reads stdin when no text is given
    Sentiment {
        /// Message text; multiple words are joined with spaces
        text: Vec<String>,
    },
    /// Score a JSON array of messages and report the trend
    Conversation {
        /// JSON file; stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Full escalation decision for one conversation
    Evaluate {
        /// Turns taken so far
        #[arg(long, default_value_t = 0)]
        turns: u32,
        /// Pre-computed sentiment score; computed from the messages if omitted
        #[arg(long, allow_hyphen_values = true)]
        sentiment: Option<f64>,
        /// Recent customer messages, oldest first
        messages: Vec<String>,
    },
    /// Evaluate JSON-lines conversation contexts
    Batch {
        /// JSON-lines file of conversation contexts
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = HandoffConfig::load(cli.config.as_deref())?;
    let threshold = config.escalation_threshold(cli.strict)?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Sentiment { text } => {
            let text = if text.is_empty() {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read text from stdin")?;
                buf
            } else {
                text.join(" ")
            };
            let result = SentimentAnalyzer::new().analyze(&text);
            commands::emit(&mut stdout, &result, cli.pretty)?;
        }
        Command::Conversation { file } => {
            let messages = match &file {
                Some(path) => {
                    let f = std::fs::File::open(path)
                        .with_context(|| format!("Failed to open {}", path.display()))?;
                    commands::read_messages(f)?
                }
                None => commands::read_messages(io::stdin())?,
            };
            let report = conversation_report(&messages, threshold);
            commands::emit(&mut stdout, &report, cli.pretty)?;
        }
        Command::Evaluate {
            turns,
            sentiment,
            messages,
        } => {
            let evaluator = Evaluator::new(config.detector(cli.strict)?, threshold);
            let mut context = ConversationContext::new(turns).with_messages(messages);
            context.sentiment = sentiment;
            let decision = evaluator.evaluate(context);
            if decision.escalate {
                info!(reason = decision.reason.as_deref().unwrap_or_default(), "escalate");
            }
            commands::emit(&mut stdout, &decision, cli.pretty)?;
        }
        Command::Batch { input } => {
            let evaluator = Evaluator::new(config.detector(cli.strict)?, threshold);
            let file = std::fs::File::open(&input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            commands::run_batch(&evaluator, BufReader::new(file), &mut stdout)?;
        }
    }

    Ok(())
}
