//! Client-side contact list state.
//!
//! [`ContactBook`] owns the last list loaded from the server, the current
//! search term and the ID of the contact being edited. Searching works on the
//! cached list only and never calls the server.

use contact_book_core::{Contact, ContactId, ContactInput, FieldError};

/// What submitting the form should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// No contact is being edited: create a new one.
    Create(ContactInput),
    /// Overwrite the contact being edited.
    Update(ContactId, ContactInput),
}

/// The cached contact list and edit mode.
#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    contacts: Vec<Contact>,
    search: String,
    editing: Option<ContactId>,
}

impl ContactBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached list with a fresh one from the server.
    pub fn replace(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
    }

    /// Every cached contact, in server order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Look up a cached contact.
    #[must_use]
    pub fn find(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn set_search(&mut self, term: &str) {
        term.clone_into(&mut self.search);
    }

    /// Cached contacts matching the current search term.
    #[must_use]
    pub fn visible(&self) -> Vec<&Contact> {
        filter(&self.contacts, &self.search)
    }

    /// The contact being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<ContactId> {
        self.editing
    }

    /// Enter edit mode for a cached contact and return its current values.
    ///
    /// Returns `None` and leaves edit mode unchanged if the contact is not
    /// in the cached list.
    pub fn begin_edit(&mut self, id: ContactId) -> Option<ContactInput> {
        let values = ContactInput::from(self.find(id)?);
        self.editing = Some(id);
        Some(values)
    }

    /// Leave edit mode.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Decide what submitting `form` should do.
    ///
    /// The submitted values are trimmed. Returns every field error instead if
    /// any field fails validation.
    ///
    /// # Errors
    ///
    /// Returns the list of field errors when the form is invalid.
    pub fn submission(&self, form: &ContactInput) -> Result<Submission, Vec<FieldError>> {
        let values = form.trimmed();
        let errors = values.field_errors();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(match self.editing {
            Some(id) => Submission::Update(id, values),
            None => Submission::Create(values),
        })
    }

    /// Forget a deleted contact. Leaves edit mode if it was being edited.
    ///
    /// Returns `true` if edit mode was cancelled.
    pub fn remove(&mut self, id: ContactId) -> bool {
        self.contacts.retain(|c| c.id != id);
        if self.editing == Some(id) {
            self.editing = None;
            return true;
        }
        false
    }
}

/// Contacts whose first name, last name, email or phone contain `term`.
///
/// Names and email match case-insensitively. The phone number is compared
/// against the lowercased term as-is. An empty term matches everything.
#[must_use]
pub fn filter<'a>(contacts: &'a [Contact], term: &str) -> Vec<&'a Contact> {
    if term.is_empty() {
        return contacts.iter().collect();
    }

    let needle = term.to_lowercase();
    contacts
        .iter()
        .filter(|c| {
            c.first_name.to_lowercase().contains(&needle)
                || c.last_name.to_lowercase().contains(&needle)
                || c.email.as_str().to_lowercase().contains(&needle)
                || c.phone.as_str().contains(&needle)
        })
        .collect()
}
