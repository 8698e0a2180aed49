//! Contact directory service.

use std::sync::Arc;

use crate::api::dto::{Contact, NewContact, UpdateContact};
use crate::domain::{CrudApi, QueryParams};
use crate::error::{ApiError, ApiResult};
use serde_json::json;

/// Service for the organization contact directory.
///
/// Thin wrapper over a [`CrudApi`] so the HTTP client can be swapped for a mock
/// in tests.
pub struct ContactService<C>
where
    C: CrudApi<Entity = Contact, Payload = NewContact, Patch = UpdateContact>,
{
    api: Arc<C>,
}

impl<C> ContactService<C>
where
    C: CrudApi<Entity = Contact, Payload = NewContact, Patch = UpdateContact>,
{
    /// Creates a new contact service.
    pub fn new(api: Arc<C>) -> Self {
        Self { api }
    }

    /// Lists contacts, optionally filtered by a free-text search term.
    ///
    /// A blank search term is not sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] on network or server failure.
    pub async fn list(&self, search: Option<&str>) -> ApiResult<Vec<Contact>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let query = QueryParams::new().opt_text("search", search);
        self.api.list(&query).await
    }

    /// Fetches one contact.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the contact does not exist.
    pub async fn get(&self, id: i64) -> ApiResult<Contact> {
        self.api.get(id).await
    }

    /// Creates a contact.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the payload is rejected.
    pub async fn create(&self, contact: &NewContact) -> ApiResult<Contact> {
        let created = self.api.create(contact).await?;
        tracing::info!(id = created.id, "Contact created");
        Ok(created)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the update changes nothing or is
    /// rejected; [`ApiError::NotFound`] if the contact does not exist.
    pub async fn update(&self, id: i64, update: &UpdateContact) -> ApiResult<Contact> {
        if is_empty_update(update) {
            return Err(ApiError::validation(
                "Nothing to update",
                json!({ "id": id }),
            ));
        }
        self.api.update(id, update).await
    }

    /// Deletes a contact.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] on failure.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.api.delete(id).await?;
        tracing::info!(id, "Contact deleted");
        Ok(())
    }
}

fn is_empty_update(update: &UpdateContact) -> bool {
    update.full_name.is_none()
        && update.position.is_none()
        && update.organization.is_none()
        && update.phone.is_none()
        && update.email.is_none()
}
