use serde::{Deserialize, Serialize};

/// Normalized view of one fetched message
///
/// Header fields are kept as the raw header strings; `text` is `None` when
/// no readable body content was found, which marks the message as
/// skip-not-summarize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    pub from: Option<String>,
    pub subject: Option<String>,
    pub date: Option<String>,
    pub text: Option<String>,
}

impl MessageRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }
}

/// Per-message outcome of one orchestrator loop iteration
///
/// Fatal conditions (fetch or summarization failures) are not outcomes; they
/// abort the run as `Err(DigestError)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Summarized, appended to the digest, and marked processed
    Summarized,
    /// Left unread and unprocessed
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither a plain-text nor an HTML body could be decoded
    NoReadableText,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoReadableText => write!(f, "no text content was found"),
        }
    }
}
