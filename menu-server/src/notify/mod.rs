//! Outbound notification stack
//!
//! Transactional email rides an in-process outbox: handlers enqueue, a
//! worker owns the transport and retries. The primary operation never
//! blocks on a mail send, and never fails because of one.

pub mod mailer;
pub mod outbox;
pub mod templates;

pub use mailer::{LogMailer, Mailer, SmtpMailer};
pub use outbox::{Outbox, OutboxWorker};
pub use templates::Email;
