//! Gmail Digest
//!
//! A single-run automation that fetches unread Gmail messages, summarizes
//! each one through an OpenAI chat-completion call, aggregates the summaries
//! into one plain-text digest email, sends the digest, and archives the
//! source messages.
//!
//! # Overview
//!
//! One run walks a fixed sequence: authenticate, list unread inbox messages,
//! then per message fetch, extract readable text, summarize, append to the
//! digest, and mark processed. Messages without readable text are skipped
//! and stay unread. A non-empty digest is sent once at the end; send
//! failures are logged and swallowed. Nothing persists across runs except
//! the mailbox's own read/unread labels.
//!
//! # Example Usage
//!
//! ```no_run
//! use gmail_digest::{auth, client::GmailMailboxClient, config::Config,
//!     pipeline::DigestPipeline, summarizer::OpenAiSummarizer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml".as_ref()).await?;
//!
//!     let hub = auth::initialize_gmail_hub(
//!         "credentials.json".as_ref(),
//!         ".gmail-digest/token.json".as_ref(),
//!     ).await?;
//!
//!     let client = GmailMailboxClient::new(hub);
//!     let api_key = std::env::var("OPENAI_API_KEY")?;
//!     let summarizer = OpenAiSummarizer::new(api_key, &config.summarizer);
//!
//!     let report = DigestPipeline::new(&client, &summarizer, &config, false)
//!         .run()
//!         .await?;
//!     println!("Summarized {} messages", report.summarized);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`auth`] - OAuth2 authentication and Gmail API initialization
//! - [`cli`] - Command-line interface
//! - [`client`] - Gmail mailbox client (list, fetch, modify, send)
//! - [`config`] - Configuration management
//! - [`digest`] - Digest composition and the outbound envelope
//! - [`error`] - Error types and result alias
//! - [`extract`] - Message text extraction
//! - [`models`] - Core data structures
//! - [`pipeline`] - Run orchestration
//! - [`summarizer`] - Summarization oracle

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod digest;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod summarizer;

// Re-export commonly used types for convenience
pub use error::{DigestError, Result};

pub use models::{MessageOutcome, MessageRecord, SkipReason};

pub use config::{Config, DigestConfig, SummarizerConfig};

pub use client::{GmailMailboxClient, MailboxClient};

pub use digest::{build_envelope, DigestBuilder};

pub use pipeline::{DigestPipeline, DigestReport};

pub use summarizer::{OpenAiSummarizer, Summarize};

// CLI types (for binary usage)
pub use cli::{Cli, Commands};
