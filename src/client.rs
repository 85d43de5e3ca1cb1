//! Gmail API mailbox client

use async_trait::async_trait;
use google_gmail1::api::{Message, ModifyMessageRequest};
use std::io::Cursor;
use tracing::debug;

use crate::auth::GmailHub;
use crate::error::{DigestError, Result};

/// Query matching messages that are both unread and still in the inbox
pub const UNREAD_INBOX_QUERY: &str = "is:unread is:inbox";

/// Trait defining the mailbox operations a digest run needs
///
/// The orchestrator is written against this trait so runs can be exercised
/// with fake mailboxes in tests.
#[async_trait]
pub trait MailboxClient: Send + Sync {
    /// List ids of unread inbox messages, in the order the provider returns
    /// them. An empty mailbox yields an empty vec, not an error.
    async fn list_unread(&self) -> Result<Vec<String>>;

    /// Fetch one message in full format (headers plus body parts)
    async fn fetch_message(&self, id: &str) -> Result<Message>;

    /// Remove the UNREAD and INBOX labels. Idempotent at the provider;
    /// removing an absent label is a no-op.
    async fn mark_processed(&self, id: &str) -> Result<()>;

    /// Submit a composed outbound message
    async fn send(&self, envelope: Message) -> Result<Message>;
}

/// Production mailbox client over the authenticated Gmail hub
pub struct GmailMailboxClient {
    hub: GmailHub,
}

impl GmailMailboxClient {
    pub fn new(hub: GmailHub) -> Self {
        Self { hub }
    }

    /// Get the inner hub reference
    pub fn hub(&self) -> &GmailHub {
        &self.hub
    }
}

#[async_trait]
impl MailboxClient for GmailMailboxClient {
    async fn list_unread(&self) -> Result<Vec<String>> {
        let mut all_ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut call = self
                .hub
                .users()
                .messages_list("me")
                .q(UNREAD_INBOX_QUERY)
                .max_results(100);

            if let Some(token) = page_token.as_ref() {
                call = call.page_token(token);
            }

            let (_, response) = call
                .add_scope("https://www.googleapis.com/auth/gmail.modify")
                .doit()
                .await?;

            if let Some(messages) = response.messages {
                for msg_ref in messages {
                    if let Some(id) = msg_ref.id {
                        all_ids.push(id);
                    }
                }
            }

            page_token = response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        debug!("Listed {} unread inbox messages", all_ids.len());
        Ok(all_ids)
    }

    async fn fetch_message(&self, id: &str) -> Result<Message> {
        let result = self
            .hub
            .users()
            .messages_get("me", id)
            .format("full")
            .add_scope("https://www.googleapis.com/auth/gmail.modify")
            .doit()
            .await;

        match result {
            Ok((_, message)) => Ok(message),
            // Attach the id so a message deleted between list and fetch is
            // identifiable in the fatal error.
            Err(e) => match DigestError::from(e) {
                DigestError::MessageNotFound(_) => {
                    Err(DigestError::MessageNotFound(id.to_string()))
                }
                other => Err(other),
            },
        }
    }

    async fn mark_processed(&self, id: &str) -> Result<()> {
        let modify_request = ModifyMessageRequest {
            add_label_ids: None,
            remove_label_ids: Some(vec!["UNREAD".to_string(), "INBOX".to_string()]),
        };

        self.hub
            .users()
            .messages_modify(modify_request, "me", id)
            .add_scope("https://www.googleapis.com/auth/gmail.modify")
            .doit()
            .await?;

        debug!("Marked message {} processed", id);
        Ok(())
    }

    async fn send(&self, envelope: Message) -> Result<Message> {
        let mime_type: mime::Mime = "message/rfc822"
            .parse()
            .map_err(|e| DigestError::ApiError(format!("Invalid upload MIME type: {}", e)))?;

        // The RFC-2822 content travels in the request body's `raw` field;
        // the upload stream stays empty.
        let (_, sent) = self
            .hub
            .users()
            .messages_send(envelope, "me")
            .add_scope("https://www.googleapis.com/auth/gmail.send")
            .upload(Cursor::new(Vec::<u8>::new()), mime_type)
            .await?;

        Ok(sent)
    }
}
