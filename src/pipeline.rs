//! Digest run orchestration
//!
//! Drives the sequence: list unread -> per message fetch, extract,
//! summarize, append, mark processed -> send the digest if non-empty.
//! Strictly sequential; each message is handled in isolation.

use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use crate::client::MailboxClient;
use crate::config::Config;
use crate::digest::{build_envelope, DigestBuilder};
use crate::error::Result;
use crate::extract;
use crate::models::{MessageOutcome, SkipReason};
use crate::summarizer::Summarize;

/// Outcome summary of one digest run
#[derive(Debug, Clone)]
pub struct DigestReport {
    pub run_id: Uuid,
    pub duration_seconds: u64,
    /// Unread messages returned by the list call
    pub listed: usize,
    /// Messages summarized, added to the digest, and marked processed
    pub summarized: usize,
    /// Messages left unread because no readable text was found
    pub skipped: usize,
    /// Whether the digest was accepted by the provider's send call
    pub digest_sent: bool,
}

impl DigestReport {
    fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            duration_seconds: 0,
            listed: 0,
            summarized: 0,
            skipped: 0,
            digest_sent: false,
        }
    }
}

/// One-shot digest pipeline over injected collaborators
pub struct DigestPipeline<'a, M, S> {
    client: &'a M,
    summarizer: &'a S,
    config: &'a Config,
    dry_run: bool,
}

impl<'a, M, S> DigestPipeline<'a, M, S>
where
    M: MailboxClient,
    S: Summarize,
{
    pub fn new(client: &'a M, summarizer: &'a S, config: &'a Config, dry_run: bool) -> Self {
        Self {
            client,
            summarizer,
            config,
            dry_run,
        }
    }

    /// Run the pipeline to completion
    ///
    /// Fetch and summarization failures abort the run; messages already
    /// marked processed stay marked and their summaries are lost (no
    /// rollback, no partial delivery). A failing send is logged and
    /// swallowed so the run still completes; the digest is simply gone.
    /// Re-running after a fully successful run finds no unread messages and
    /// sends nothing.
    pub async fn run(&self) -> Result<DigestReport> {
        let started = Instant::now();
        let mut report = DigestReport::new();
        info!(run_id = %report.run_id, "Starting digest run");

        let ids = self.client.list_unread().await?;
        report.listed = ids.len();
        info!("Found {} unread messages", ids.len());

        let mut digest = DigestBuilder::new();
        for id in &ids {
            match self.process_message(id, &mut digest).await? {
                MessageOutcome::Summarized => report.summarized += 1,
                MessageOutcome::Skipped(reason) => {
                    info!("Skipping email {} because {}.", id, reason);
                    report.skipped += 1;
                }
            }
        }

        if digest.is_empty() {
            info!("No emails to summarize.");
        } else if self.dry_run {
            info!(
                "Dry run: would send digest with {} summaries to {}",
                digest.len(),
                self.config.digest.recipient
            );
        } else {
            // Sender and recipient are the same configured mailbox.
            let recipient = self.config.digest.recipient.as_str();
            let envelope = build_envelope(
                recipient,
                recipient,
                &self.config.digest.subject,
                &digest.into_body(),
            );

            // Best-effort delivery: a send failure is logged and swallowed,
            // never retried, and the run still counts as complete even
            // though the already-marked messages got no digest.
            match self.client.send(envelope).await {
                Ok(_) => {
                    info!("Successfully sent digest to {}", recipient);
                    report.digest_sent = true;
                }
                Err(e) => {
                    warn!("Failed to send digest: {}", e);
                }
            }
        }

        report.duration_seconds = started.elapsed().as_secs();
        Ok(report)
    }

    /// Handle one listed message
    ///
    /// Errors from fetch, summarize, or mark-processed propagate and abort
    /// the whole run.
    async fn process_message(
        &self,
        id: &str,
        digest: &mut DigestBuilder,
    ) -> Result<MessageOutcome> {
        let raw = self.client.fetch_message(id).await?;
        let record = extract::extract_record(id, &raw);

        let Some(text) = record.text.as_deref() else {
            return Ok(MessageOutcome::Skipped(SkipReason::NoReadableText));
        };

        let summary = self.summarizer.summarize(text).await?;
        digest.push(&record, &summary);

        if self.dry_run {
            info!("Dry run: would mark message {} processed", id);
        } else {
            self.client.mark_processed(id).await?;
        }

        Ok(MessageOutcome::Summarized)
    }
}
