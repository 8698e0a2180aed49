//! Dashboard user management service.

use validator::Validate;

use crate::api::dto::{Avatar, NewUser, UpdateUser, User, Users};
use crate::domain::{CrudApi, QueryParams, Resource};
use crate::error::ApiResult;
use crate::infrastructure::http::multipart::{form_from, with_avatar};
use crate::infrastructure::http::{ApiClient, ResourceClient};

/// Manages dashboard users.
///
/// Reads and deletes go through the generic [`ResourceClient`]; create and
/// edit are multipart so an avatar can be attached.
#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
    users: ResourceClient<Users>,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            users: ResourceClient::new(api.clone()),
            api,
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<User>> {
        self.users.list(&QueryParams::new()).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<User> {
        self.users.get(id).await
    }

    /// `POST /users` as multipart.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError::Validation`] if the fields are rejected
    /// locally or by the server.
    pub async fn create(&self, user: &NewUser, avatar: Option<Avatar>) -> ApiResult<User> {
        user.validate()?;
        let mut form = form_from(user)?;
        if let Some(avatar) = avatar {
            form = with_avatar(form, avatar)?;
        }

        let created: User = self.api.post_multipart(Users::PATH, form).await?;
        tracing::info!(id = created.id, username = %created.username, "User created");
        Ok(created)
    }

    /// `PATCH /users/{id}` as multipart. Absent fields stay unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`UserService::create`], plus
    /// [`crate::error::ApiError::NotFound`].
    pub async fn update(&self, id: i64, update: &UpdateUser, avatar: Option<Avatar>) -> ApiResult<User> {
        update.validate()?;
        let mut form = form_from(update)?;
        if let Some(avatar) = avatar {
            form = with_avatar(form, avatar)?;
        }

        self.api
            .patch_multipart(&format!("{}/{id}", Users::PATH), form)
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.users.delete(id).await?;
        tracing::info!(id, "User deleted");
        Ok(())
    }
}
