//! Generic CRUD client for any [`Resource`].

use std::marker::PhantomData;

use async_trait::async_trait;
use validator::Validate;

use crate::api::dto::pagination::ListBody;
use crate::domain::{CrudApi, QueryParams, Resource};
use crate::error::ApiResult;

use super::ApiClient;

/// CRUD operations for the collection described by `R`.
///
/// Every resource shares the same [`ApiClient`]; only the path and the DTO
/// shapes differ.
pub struct ResourceClient<R: Resource> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{id}", R::PATH)
    }
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

#[async_trait]
impl<R: Resource> CrudApi for ResourceClient<R> {
    type Entity = R::Entity;
    type Payload = R::Payload;
    type Patch = R::Patch;

    async fn list(&self, query: &QueryParams) -> ApiResult<Vec<R::Entity>> {
        let body: ListBody<R::Entity> = self.api.get(R::PATH, query).await?;
        Ok(body.into_items())
    }

    async fn get(&self, id: i64) -> ApiResult<R::Entity> {
        self.api.get_entity(&Self::item_path(id)).await
    }

    async fn create(&self, payload: &R::Payload) -> ApiResult<R::Entity> {
        payload.validate()?;
        self.api.post_json(R::PATH, payload).await
    }

    async fn update(&self, id: i64, patch: &R::Patch) -> ApiResult<R::Entity> {
        patch.validate()?;
        self.api.patch_json(&Self::item_path(id), patch).await
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        self.api.delete(&Self::item_path(id)).await
    }
}
