//! Contact book controller.
//!
//! [`ContactApp`] ties the API client to the list, form and flash state. A UI
//! layer calls one method per user action and re-renders from the accessors.

use tracing::{info, warn};

use contact_book_core::{Contact, ContactId, Field};

use crate::api::{ClientError, ContactsClient, FALLBACK_ERROR};
use crate::book::{ContactBook, Submission};
use crate::form::ContactForm;
use crate::view::{FormView, render_contacts};

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// One-line status message shown above the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    fn success(text: &str) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.to_string(),
        }
    }

    fn error(err: &ClientError) -> Self {
        let text = match err {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Http(_) => FALLBACK_ERROR.to_string(),
        };
        Self {
            kind: FlashKind::Error,
            text,
        }
    }
}

/// Result of submitting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form failed local validation. Nothing was sent.
    Invalid,
    /// The server rejected the request. The form is unchanged.
    Rejected,
    Created(Contact),
    Updated(Contact),
}

/// Client state for one contact book screen.
#[derive(Debug)]
pub struct ContactApp {
    api: ContactsClient,
    book: ContactBook,
    form: ContactForm,
    flash: Option<Flash>,
}

impl ContactApp {
    #[must_use]
    pub fn new(api: ContactsClient) -> Self {
        Self {
            api,
            book: ContactBook::new(),
            form: ContactForm::new(),
            flash: None,
        }
    }

    #[must_use]
    pub const fn book(&self) -> &ContactBook {
        &self.book
    }

    #[must_use]
    pub const fn form(&self) -> &ContactForm {
        &self.form
    }

    #[must_use]
    pub const fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    /// Labels for the form in the current mode.
    #[must_use]
    pub const fn form_view(&self) -> FormView {
        FormView::for_mode(self.book.editing().is_some())
    }

    /// Markup for the contacts matching the current search.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if the template fails to render.
    pub fn render_list(&self) -> askama::Result<String> {
        render_contacts(&self.book.visible())
    }

    /// "N contacts" counter for the visible list.
    #[must_use]
    pub fn count_label(&self) -> String {
        match self.book.visible().len() {
            1 => "1 contact".to_string(),
            n => format!("{n} contacts"),
        }
    }

    pub fn input(&mut self, field: Field, value: &str) {
        self.form.input(field, value);
    }

    pub fn blur(&mut self, field: Field) -> bool {
        self.form.blur(field)
    }

    pub fn set_search(&mut self, term: &str) {
        self.book.set_search(term);
    }

    /// Reload the list from the server.
    ///
    /// On failure the list is emptied, so the empty state is shown rather
    /// than stale contacts, and an error flash is set. Returns `true` if the
    /// list was refreshed.
    pub async fn load(&mut self) -> bool {
        match self.api.list().await {
            Ok(contacts) => {
                self.book.replace(contacts);
                true
            }
            Err(err) => {
                warn!(error = %err, "Failed to load contacts");
                self.book.replace(Vec::new());
                self.flash = Some(Flash::error(&err));
                false
            }
        }
    }

    /// Submit the form: create, or update the contact being edited.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let submission = match self.book.submission(self.form.values()) {
            Ok(submission) => submission,
            Err(errors) => {
                self.form.set_errors(errors);
                return SubmitOutcome::Invalid;
            }
        };

        let result = match &submission {
            Submission::Create(values) => self.api.create(values).await,
            Submission::Update(id, values) => self.api.update(*id, values).await,
        };

        let contact = match result {
            Ok(contact) => contact,
            Err(err) => {
                warn!(error = %err, "Contact submission rejected");
                self.flash = Some(Flash::error(&err));
                return SubmitOutcome::Rejected;
            }
        };

        let outcome = match submission {
            Submission::Create(_) => {
                info!(contact_id = %contact.id, "Contact created");
                self.flash = Some(Flash::success("Contact created successfully!"));
                SubmitOutcome::Created(contact)
            }
            Submission::Update(..) => {
                info!(contact_id = %contact.id, "Contact updated");
                self.flash = Some(Flash::success("Contact updated successfully!"));
                SubmitOutcome::Updated(contact)
            }
        };

        self.book.cancel_edit();
        self.form.reset();
        self.load().await;
        outcome
    }

    /// Enter edit mode for a listed contact and prefill the form.
    ///
    /// Returns `false` if the contact is not in the cached list.
    pub fn edit(&mut self, id: ContactId) -> bool {
        match self.book.begin_edit(id) {
            Some(values) => {
                self.form.load(values);
                true
            }
            None => false,
        }
    }

    /// Leave edit mode and empty the form.
    pub fn cancel_edit(&mut self) {
        self.book.cancel_edit();
        self.form.reset();
    }

    /// Delete a contact. The caller is expected to have confirmed.
    ///
    /// Returns `true` if the server deleted it.
    pub async fn delete(&mut self, id: ContactId) -> bool {
        if let Err(err) = self.api.delete(id).await {
            warn!(error = %err, contact_id = %id, "Failed to delete contact");
            self.flash = Some(Flash::error(&err));
            return false;
        }

        info!(contact_id = %id, "Contact deleted");
        if self.book.remove(id) {
            self.form.reset();
        }
        self.flash = Some(Flash::success("Contact deleted successfully!"));
        self.load().await;
        true
    }
}
