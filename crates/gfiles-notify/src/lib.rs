//! # gfiles-notify
//!
//! Outbound email: SMTP transport and the share-notification template.
//! One message per dispatch, no retry — a transport failure surfaces to
//! the caller, who may resubmit.

pub mod mailer;
pub mod template;

pub use mailer::{Mailer, OutboundEmail, SmtpMailer};
pub use template::ShareNotification;
