//! Share-notification email rendering.

use gfiles_entity::contact::Contact;
use gfiles_entity::sharing::SharedItem;

use crate::mailer::OutboundEmail;

/// Renders the "an item was shared with you" email for a contact.
#[derive(Debug, Clone)]
pub struct ShareNotification<'a> {
    /// The contact receiving the share.
    pub contact: &'a Contact,
    /// The shared item.
    pub item: &'a SharedItem,
    /// The full share URL built from the stored share link.
    pub share_url: &'a str,
}

impl ShareNotification<'_> {
    /// Render the notification into a ready-to-send email.
    ///
    /// The caller guarantees the contact has an email address; rendering
    /// with a missing address is a programming error upstream.
    pub fn render(&self, recipient: &str) -> OutboundEmail {
        let item_kind = match self.item.item_type {
            gfiles_entity::sharing::ItemType::File => "file",
            gfiles_entity::sharing::ItemType::Folder => "folder",
        };
        let permissions = self.item.permission_labels().join(", ");
        let expiry_line = match self.item.share_link_expires_at.or(self.item.expires_at) {
            Some(expires) => format!("This link expires on {}.", expires.format("%Y-%m-%d %H:%M")),
            None => "This link does not expire.".to_string(),
        };

        let subject = format!("A {item_kind} has been shared with you");

        let text_body = format!(
            "Hello {name},\n\n\
             The {item_kind} \"{item_name}\" has been shared with you.\n\
             Permissions: {permissions}\n\
             {expiry_line}\n\n\
             Open it here: {url}\n",
            name = self.contact.full_name(),
            item_name = self.item.item_name,
            url = self.share_url,
        );

        let html_body = format!(
            "<html><body>\
             <p>Hello {name},</p>\
             <p>The {item_kind} <strong>{item_name}</strong> has been shared with you.</p>\
             <p>Permissions: {permissions}<br>{expiry_line}</p>\
             <p><a href=\"{url}\">Open shared {item_kind}</a></p>\
             </body></html>",
            name = self.contact.full_name(),
            item_name = self.item.item_name,
            url = self.share_url,
        );

        OutboundEmail {
            to: recipient.to_string(),
            subject,
            text_body,
            html_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gfiles_entity::sharing::{ItemType, SharingType};
    use uuid::Uuid;

    fn sample_contact() -> Contact {
        Contact {
            id: Uuid::new_v4(),
            first_name: "Erika".into(),
            last_name: "Muster".into(),
            email: Some("erika@example.com".into()),
            company_name: Some("Muster GmbH".into()),
            erp_customer_id: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn sample_item() -> SharedItem {
        SharedItem {
            id: Uuid::new_v4(),
            item_path: "/docs/offer.pdf".into(),
            item_name: "offer.pdf".into(),
            item_type: ItemType::File,
            shared_by: Uuid::new_v4(),
            sharing_type: SharingType::Contact,
            shared_with_user_id: None,
            shared_with_contact_id: Some(Uuid::new_v4()),
            share_link: Some("abc123".into()),
            expires_at: None,
            share_link_expires_at: None,
            can_view: true,
            can_download: true,
            can_edit: false,
            can_delete: false,
            description: None,
            is_active: true,
            shared_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_includes_item_and_url() {
        let contact = sample_contact();
        let item = sample_item();
        let notification = ShareNotification {
            contact: &contact,
            item: &item,
            share_url: "https://gfiles.example.com/share/abc123",
        };
        let email = notification.render("erika@example.com");

        assert_eq!(email.to, "erika@example.com");
        assert!(email.text_body.contains("offer.pdf"));
        assert!(email.text_body.contains("view, download"));
        assert!(email.html_body.contains("https://gfiles.example.com/share/abc123"));
        assert!(email.text_body.contains("does not expire"));
    }

    #[test]
    fn test_render_mentions_expiry() {
        let contact = sample_contact();
        let mut item = sample_item();
        item.share_link_expires_at = Some(Utc::now() + chrono::Duration::days(7));
        let notification = ShareNotification {
            contact: &contact,
            item: &item,
            share_url: "https://gfiles.example.com/share/abc123",
        };
        let email = notification.render("erika@example.com");
        assert!(email.text_body.contains("expires on"));
    }
}
