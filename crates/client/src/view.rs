//! Markup for the contact list.
//!
//! Rendered with Askama; every value is HTML-escaped on output.

use askama::Template;

use contact_book_core::Contact;

/// Contact cards, or the empty state when there are none.
#[derive(Template)]
#[template(path = "contact_list.html")]
pub struct ContactListTemplate<'a> {
    pub contacts: &'a [&'a Contact],
}

/// Render the given contacts.
///
/// # Errors
///
/// Returns `askama::Error` if a value fails to format.
pub fn render_contacts(contacts: &[&Contact]) -> askama::Result<String> {
    ContactListTemplate { contacts }.render()
}

/// Labels of the form, which depend on edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub show_cancel: bool,
}

impl FormView {
    #[must_use]
    pub const fn for_mode(editing: bool) -> Self {
        if editing {
            Self {
                title: "Edit Contact",
                submit_label: "Update Contact",
                show_cancel: true,
            }
        } else {
            Self {
                title: "Add New Contact",
                submit_label: "Add Contact",
                show_cancel: false,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;
    use contact_book_core::{ContactId, Email, Phone};

    use super::*;

    fn contact(first: &str, last: &str, address: &str) -> Contact {
        Contact {
            id: ContactId::new(7),
            first_name: first.into(),
            last_name: last.into(),
            address: address.into(),
            email: Email::parse("ann@example.com").unwrap(),
            phone: Phone::parse("+12025550123").unwrap(),
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
        }
    }

    #[test]
    fn test_render_escapes_user_values() {
        let contact = contact("<b>Ann</b>", "O'Neil", "1 Main St & Co");

        let html = render_contacts(&[&contact]).unwrap();
        assert!(html.contains("&lt;b&gt;Ann&lt;/b&gt;"));
        assert!(html.contains("O&#39;Neil"));
        assert!(html.contains("1 Main St &amp; Co"));
        assert!(html.contains("data-id=\"7\""));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_render_escapes_script_and_quotes() {
        let contact = contact("Ann", "Lee", r#"<script>alert("x")</script>"#);

        let html = render_contacts(&[&contact]).unwrap();
        assert!(!html.contains("<script>"));
        assert!(!html.contains(r#"alert("x")"#));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_empty_state() {
        let html = render_contacts(&[]).unwrap();
        assert!(html.contains("No contacts found"));
        assert!(!html.contains("contact-card"));
    }

    #[test]
    fn test_form_view_modes() {
        assert_eq!(FormView::for_mode(false).submit_label, "Add Contact");
        let editing = FormView::for_mode(true);
        assert_eq!(editing.title, "Edit Contact");
        assert!(editing.show_cancel);
    }
}
