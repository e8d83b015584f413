//! Email outbox
//!
//! Handlers enqueue rendered emails; the worker owns the transport and
//! retries with doubling backoff. A job that exhausts its retries is
//! logged and dropped; notification failure never propagates into the
//! request that triggered it.

use super::mailer::Mailer;
use super::templates::Email;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Max delivery attempts per email
const MAX_RETRIES: u32 = 3;
/// Initial retry delay, doubled after each failed attempt
const INITIAL_RETRY_DELAY_SECS: u64 = 5;

/// Sending half of the outbox, held on ServerState
#[derive(Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<Email>,
}

impl Outbox {
    /// Queue an email for delivery. Never blocks and never fails the
    /// caller; a closed queue is logged and the email dropped.
    pub fn enqueue(&self, email: Email) {
        if let Err(e) = self.tx.send(email) {
            tracing::error!("Outbox queue closed, dropping email to {}", e.0.to);
        }
    }
}

/// Worker half of the outbox
pub struct OutboxWorker {
    rx: mpsc::UnboundedReceiver<Email>,
    mailer: Arc<dyn Mailer>,
    shutdown: CancellationToken,
}

/// Create a connected outbox and its worker
pub fn channel(mailer: Arc<dyn Mailer>, shutdown: CancellationToken) -> (Outbox, OutboxWorker) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        Outbox { tx },
        OutboxWorker {
            rx,
            mailer,
            shutdown,
        },
    )
}

impl OutboxWorker {
    /// Drain the queue until shutdown
    pub async fn run(mut self) {
        tracing::info!("OutboxWorker started");
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("OutboxWorker shutting down");
                    break;
                }
                email = self.rx.recv() => {
                    match email {
                        Some(email) => self.deliver(email).await,
                        None => break,
                    }
                }
            }
        }
    }

    /// Deliver one email with retries; terminal failure is swallowed
    async fn deliver(&self, email: Email) {
        let mut delay = tokio::time::Duration::from_secs(INITIAL_RETRY_DELAY_SECS);
        for attempt in 1..=MAX_RETRIES {
            match self.mailer.send(&email).await {
                Ok(()) => {
                    tracing::debug!(to = %email.to, subject = %email.subject, "Email sent");
                    return;
                }
                Err(e) if attempt < MAX_RETRIES => {
                    tracing::warn!(
                        to = %email.to,
                        attempt,
                        error = %e,
                        "Email send failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!(
                        to = %email.to,
                        subject = %email.subject,
                        error = %e,
                        "Email delivery failed after {MAX_RETRIES} attempts, giving up"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::error::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mailer that fails the first `failures` sends
    struct FlakyMailer {
        attempts: AtomicUsize,
        failures: usize,
    }

    #[async_trait]
    impl Mailer for FlakyMailer {
        async fn send(&self, _email: &Email) -> Result<(), AppError> {
            let n = self.attempts.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(AppError::internal("transport down"))
            } else {
                Ok(())
            }
        }
    }

    fn test_email() -> Email {
        Email {
            to: "guest@example.com".into(),
            subject: "hi".into(),
            body: "hello".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_until_success() {
        let mailer = Arc::new(FlakyMailer {
            attempts: AtomicUsize::new(0),
            failures: 2,
        });
        let shutdown = CancellationToken::new();
        let (outbox, worker) = channel(mailer.clone(), shutdown.clone());

        outbox.enqueue(test_email());
        drop(outbox); // close the queue so the worker drains and exits
        worker.run().await;

        assert_eq!(mailer.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_failure_is_swallowed() {
        let mailer = Arc::new(FlakyMailer {
            attempts: AtomicUsize::new(0),
            failures: usize::MAX,
        });
        let shutdown = CancellationToken::new();
        let (outbox, worker) = channel(mailer.clone(), shutdown.clone());

        outbox.enqueue(test_email());
        drop(outbox);
        // Must complete without panicking even though every attempt fails
        worker.run().await;

        assert_eq!(mailer.attempts.load(Ordering::SeqCst), MAX_RETRIES as usize);
    }
}
