//! Common test utilities and fixtures

use async_trait::async_trait;
use google_gmail1::api::{Message, MessagePart, MessagePartBody, MessagePartHeader};
use std::collections::HashMap;
use std::sync::Mutex;

use gmail_digest::client::MailboxClient;
use gmail_digest::config::{Config, DigestConfig};
use gmail_digest::error::{DigestError, Result};
use gmail_digest::summarizer::Summarize;

/// Config pointing the digest at a test mailbox
pub fn test_config() -> Config {
    Config {
        digest: DigestConfig {
            recipient: "me@example.com".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn header(name: &str, value: &str) -> MessagePartHeader {
    MessagePartHeader {
        name: Some(name.to_string()),
        value: Some(value.to_string()),
    }
}

fn text_part(mime_type: &str, data: &str) -> MessagePart {
    MessagePart {
        mime_type: Some(mime_type.to_string()),
        body: Some(MessagePartBody {
            data: Some(data.as_bytes().to_vec()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn message_with_parts(id: &str, from: &str, subject: &str, parts: Vec<MessagePart>) -> Message {
    Message {
        id: Some(id.to_string()),
        payload: Some(MessagePart {
            headers: Some(vec![
                header("From", from),
                header("Subject", subject),
                header("Date", "Mon, 24 Nov 2025 10:30:00 +0000"),
            ]),
            parts: Some(parts),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Full-format message with a single plain-text part
pub fn plain_message(id: &str, from: &str, subject: &str, body: &str) -> Message {
    message_with_parts(id, from, subject, vec![text_part("text/plain", body)])
}

/// Full-format message whose only body part is HTML
pub fn html_message(id: &str, from: &str, subject: &str, html: &str) -> Message {
    message_with_parts(id, from, subject, vec![text_part("text/html", html)])
}

/// Full-format message with an HTML part listed before a plain-text part
pub fn html_then_plain_message(id: &str, html: &str, plain: &str) -> Message {
    message_with_parts(
        id,
        "sender@example.com",
        "Mixed parts",
        vec![text_part("text/html", html), text_part("text/plain", plain)],
    )
}

/// Full-format message carrying neither plain-text nor HTML parts
pub fn attachment_only_message(id: &str) -> Message {
    message_with_parts(
        id,
        "sender@example.com",
        "Attachment only",
        vec![MessagePart {
            mime_type: Some("application/pdf".to_string()),
            body: Some(MessagePartBody::default()),
            ..Default::default()
        }],
    )
}

/// In-memory mailbox recording label modifications and send attempts
pub struct FakeMailbox {
    messages: Vec<(String, Message)>,
    pub marked: Mutex<Vec<String>>,
    pub sent: Mutex<Vec<Message>>,
    pub fail_send: bool,
}

impl FakeMailbox {
    pub fn new(messages: Vec<Message>) -> Self {
        let messages = messages
            .into_iter()
            .map(|m| (m.id.clone().expect("fixture messages need ids"), m))
            .collect();
        Self {
            messages,
            marked: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            fail_send: false,
        }
    }

    pub fn with_failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub fn marked_ids(&self) -> Vec<String> {
        self.marked.lock().unwrap().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Body text of the single sent digest, decoded from the raw envelope
    pub fn sent_body(&self) -> String {
        let sent = self.sent.lock().unwrap();
        assert_eq!(sent.len(), 1, "expected exactly one sent message");
        let raw = sent[0].raw.clone().expect("envelope should carry raw bytes");
        String::from_utf8(raw).unwrap()
    }
}

#[async_trait]
impl MailboxClient for FakeMailbox {
    async fn list_unread(&self) -> Result<Vec<String>> {
        Ok(self.messages.iter().map(|(id, _)| id.clone()).collect())
    }

    async fn fetch_message(&self, id: &str) -> Result<Message> {
        self.messages
            .iter()
            .find(|(mid, _)| mid == id)
            .map(|(_, m)| m.clone())
            .ok_or_else(|| DigestError::MessageNotFound(id.to_string()))
    }

    async fn mark_processed(&self, id: &str) -> Result<()> {
        self.marked.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn send(&self, envelope: Message) -> Result<Message> {
        if self.fail_send {
            return Err(DigestError::ServerError {
                status: 500,
                message: "send rejected".to_string(),
            });
        }
        self.sent.lock().unwrap().push(envelope);
        Ok(Message::default())
    }
}

/// Canned summarizer recording the exact text it was asked to summarize
pub struct FakeSummarizer {
    pub inputs: Mutex<Vec<String>>,
    /// Call number (1-based) at which summarize starts failing
    pub fail_on_call: Option<usize>,
}

impl FakeSummarizer {
    pub fn new() -> Self {
        Self {
            inputs: Mutex::new(Vec::new()),
            fail_on_call: None,
        }
    }

    pub fn failing_on_call(call: usize) -> Self {
        Self {
            inputs: Mutex::new(Vec::new()),
            fail_on_call: Some(call),
        }
    }

    pub fn call_count(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    pub fn recorded_inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarize for FakeSummarizer {
    async fn summarize(&self, email_text: &str) -> Result<String> {
        let call = {
            let mut inputs = self.inputs.lock().unwrap();
            inputs.push(email_text.to_string());
            inputs.len()
        };
        if self.fail_on_call == Some(call) {
            return Err(DigestError::EmptySummary);
        }
        Ok(format!("- canned summary #{}", call))
    }
}

/// Count non-overlapping occurrences of a needle in a haystack
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    let mut count = 0;
    let mut rest = haystack;
    while let Some(pos) = rest.find(needle) {
        count += 1;
        rest = &rest[pos + needle.len()..];
    }
    count
}

/// Index of each needle in the haystack, for order assertions
pub fn positions(haystack: &str, needles: &[&str]) -> HashMap<String, usize> {
    needles
        .iter()
        .map(|n| {
            (
                n.to_string(),
                haystack.find(n).unwrap_or_else(|| panic!("'{}' not found in digest", n)),
            )
        })
        .collect()
}
