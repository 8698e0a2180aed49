//! Paginated news feed service.

use serde_json::json;

use crate::api::dto::{NewsItem, Paginated};
use crate::domain::QueryParams;
use crate::error::{ApiError, ApiResult};
use crate::infrastructure::http::ApiClient;

#[derive(Clone)]
pub struct NewsService {
    api: ApiClient,
}

impl NewsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /news?page=`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for page `0`, without sending a request.
    pub async fn page(&self, page: u32) -> ApiResult<Paginated<NewsItem>> {
        if page == 0 {
            return Err(ApiError::validation(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        let query = QueryParams::new().int("page", i64::from(page));
        self.api.get("news", &query).await
    }
}
