//! Share notification service.
//!
//! Sends exactly one email per invocation through the SMTP relay. Each
//! precondition failure carries its own message so callers can tell what
//! to fix; this is deliberately the most granular error surface in the
//! system.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use gfiles_core::config::mail::MailConfig;
use gfiles_core::error::AppError;
use gfiles_core::result::AppResult;
use gfiles_database::repositories::contact::ContactRepository;
use gfiles_database::repositories::sharing::SharingRepository;
use gfiles_entity::contact::Contact;
use gfiles_entity::sharing::{SharedItem, SharingType};
use gfiles_notify::{Mailer, ShareNotification};

use crate::context::RequestContext;

/// Dispatches share-notification emails to CRM contacts.
#[derive(Debug)]
pub struct ShareEmailService {
    /// Sharing repository for item lookup.
    sharing_repo: Arc<SharingRepository>,
    /// Contact directory.
    contact_repo: Arc<ContactRepository>,
    /// Mail transport.
    mailer: Arc<dyn Mailer>,
    /// Mail settings (from address, share base URL).
    mail_config: MailConfig,
}

impl ShareEmailService {
    /// Creates a new share email service.
    pub fn new(
        sharing_repo: Arc<SharingRepository>,
        contact_repo: Arc<ContactRepository>,
        mailer: Arc<dyn Mailer>,
        mail_config: MailConfig,
    ) -> Self {
        Self {
            sharing_repo,
            contact_repo,
            mailer,
            mail_config,
        }
    }

    /// Send the notification email for a contact share on behalf of the
    /// share owner. Returns the share URL that was mailed.
    pub async fn send_share_email(
        &self,
        ctx: &RequestContext,
        shared_item_id: Uuid,
        contact_id: Uuid,
    ) -> AppResult<String> {
        let item = self
            .sharing_repo
            .find_item_by_id(shared_item_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shared item not found"))?;

        if item.shared_by != ctx.user_id {
            return Err(AppError::authorization(
                "Only the share owner can send share notifications",
            ));
        }
        if item.sharing_type != SharingType::Contact {
            return Err(AppError::validation(
                "Notifications can only be sent for contact shares",
            ));
        }
        let Some(token) = item.share_link.as_deref() else {
            return Err(AppError::validation("Shared item has no share link"));
        };

        let contact = self
            .contact_repo
            .find_by_id(contact_id)
            .await?
            .ok_or_else(|| AppError::not_found("Contact not found"))?;

        let Some(recipient) = contact.email.clone() else {
            return Err(AppError::validation("Contact has no email address"));
        };

        let share_url = self.share_url(token);
        self.dispatch(&contact, &item, &share_url, &recipient).await?;

        info!(
            user_id = %ctx.user_id,
            share_id = %item.id,
            contact_id = %contact.id,
            "Share notification dispatched"
        );

        Ok(share_url)
    }

    /// Best-effort notification right after a contact share is created.
    ///
    /// A contact without an email address is skipped silently — the share
    /// itself already committed and remains valid.
    pub async fn notify_contact(&self, item: &SharedItem) -> AppResult<()> {
        let Some(contact_id) = item.shared_with_contact_id else {
            return Ok(());
        };
        let Some(token) = item.share_link.as_deref() else {
            return Ok(());
        };

        let Some(contact) = self.contact_repo.find_by_id(contact_id).await? else {
            warn!(share_id = %item.id, %contact_id, "Share target contact vanished");
            return Ok(());
        };
        let Some(recipient) = contact.email.clone() else {
            warn!(share_id = %item.id, %contact_id, "Contact has no email, skipping notification");
            return Ok(());
        };

        let share_url = self.share_url(token);
        self.dispatch(&contact, item, &share_url, &recipient).await
    }

    fn share_url(&self, token: &str) -> String {
        format!(
            "{}/share/{token}",
            self.mail_config.share_base_url.trim_end_matches('/')
        )
    }

    async fn dispatch(
        &self,
        contact: &Contact,
        item: &SharedItem,
        share_url: &str,
        recipient: &str,
    ) -> AppResult<()> {
        let email = ShareNotification {
            contact,
            item,
            share_url,
        }
        .render(recipient);

        self.mailer.send(email).await
    }
}
