//! Digest composition: per-message summary blocks and the outbound envelope

use google_gmail1::api::Message;

use crate::models::MessageRecord;

/// Base URL for the per-message deep link included in each digest block
pub const MESSAGE_LINK_BASE: &str = "https://mail.google.com/mail/u/0/#inbox/";

/// Accumulates per-message summary blocks in processing order
///
/// Block order matches the order messages were listed; there is no
/// reordering and no deduplication. An untouched builder composes into an
/// empty string, which callers use to decide whether to send at all.
#[derive(Debug, Default)]
pub struct DigestBuilder {
    blocks: Vec<String>,
}

impl DigestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one formatted block for a summarized message
    pub fn push(&mut self, record: &MessageRecord, summary: &str) {
        let block = format!(
            "From: {}\nSubject: {}\nTimestamp: {}\nLink: {}{}\nSummary:\n{}\n\n\n",
            record.from.as_deref().unwrap_or("Unknown"),
            record.subject.as_deref().unwrap_or("No Subject"),
            record.date.as_deref().unwrap_or("Unknown"),
            MESSAGE_LINK_BASE,
            record.id,
            summary,
        );
        self.blocks.push(block);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Concatenate the accumulated blocks into the digest body
    pub fn into_body(self) -> String {
        self.blocks.concat()
    }
}

/// Package the digest into the provider's outbound message envelope
///
/// Builds a single-part `text/plain` RFC-2822 message and places its bytes
/// in the `raw` field; the base64url transport encoding happens when the
/// provider client serializes the request, i.e. at send time.
pub fn build_envelope(sender: &str, recipient: &str, subject: &str, body: &str) -> Message {
    let mime = format!(
        "From: {sender}\r\n\
         To: {recipient}\r\n\
         Subject: {subject}\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: text/plain; charset=\"UTF-8\"\r\n\
         \r\n\
         {body}"
    );

    Message {
        raw: Some(mime.into_bytes()),
        ..Default::default()
    }
}
