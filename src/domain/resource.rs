//! Generic CRUD capability over one resource collection.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::query::QueryParams;
use crate::error::ApiResult;

/// Describes one REST collection: where it lives and its wire shapes.
///
/// `Payload` is what the caller sends on create and never carries
/// server-assigned fields. `Patch` is the partial shape for updates; absent
/// fields are not serialized.
pub trait Resource: Send + Sync + 'static {
    /// Collection path relative to the API base, without leading slash.
    const PATH: &'static str;

    type Entity: DeserializeOwned + Send + 'static;
    type Payload: Serialize + Validate + Send + Sync + 'static;
    type Patch: Serialize + Validate + Send + Sync + 'static;
}

/// The five operations every CRUD resource supports.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::ResourceClient`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock(
    type Entity = crate::api::dto::contact::Contact;
    type Payload = crate::api::dto::contact::NewContact;
    type Patch = crate::api::dto::contact::UpdateContact;
))]
#[async_trait]
pub trait CrudApi: Send + Sync {
    type Entity: Send + 'static;
    type Payload: Send + Sync + 'static;
    type Patch: Send + Sync + 'static;

    /// Lists the collection.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError::Transport`] on network failure or a
    /// non-2xx status.
    async fn list(&self, query: &QueryParams) -> ApiResult<Vec<Self::Entity>>;

    /// Fetches one entity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError::NotFound`] if the server reports absence.
    async fn get(&self, id: i64) -> ApiResult<Self::Entity>;

    /// Creates an entity and returns it with its server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError::Validation`] if the payload is rejected
    /// locally or by the server.
    async fn create(&self, payload: &Self::Payload) -> ApiResult<Self::Entity>;

    /// Applies a partial update. Fields absent from `patch` are left unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`CrudApi::create`], plus [`crate::error::ApiError::NotFound`].
    async fn update(&self, id: i64, patch: &Self::Patch) -> ApiResult<Self::Entity>;

    /// Deletes an entity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError::Transport`] on any non-2xx status,
    /// 404 included.
    async fn delete(&self, id: i64) -> ApiResult<()>;
}
