//! Reqwest-backed request builder shared by every resource.
//!
//! [`ApiClient`] owns transport details only: URL joining, bearer
//! authentication, status classification and JSON decoding. One method call
//! issues exactly one HTTP request.

use std::time::{Duration, Instant};

use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::domain::{QueryParams, Session};
use crate::error::{ApiError, ApiResult, RequestKind};

const USER_AGENT: &str = concat!("hydro-dashboard/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to one API base URL and one session.
///
/// Cloning is cheap: the underlying connection pool and session store are
/// shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Builds a client with its own connection pool and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the base URL is invalid or the
    /// reqwest client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration, session: Session) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Self::with_client(client, base_url, session)
    }

    /// Builds a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn from_config(config: &Config, session: Session) -> ApiResult<Self> {
        Self::new(&config.api_url, config.request_timeout(), session)
    }

    /// Builds a client reusing an existing [`reqwest::Client`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the base URL is invalid.
    pub fn with_client(client: Client, base_url: &str, session: Session) -> ApiResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ApiError::transport(None, format!("invalid base URL '{base_url}': {e}")))?;

        // Url::join replaces the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a resource path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::transport(None, format!("invalid path '{path}': {e}")))
    }

    /// `GET path?query` decoded as `T`. For collections and panels, so a 404
    /// or 422 stays [`ApiError::Transport`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &QueryParams) -> ApiResult<T> {
        let body = self
            .execute(RequestKind::Plain, Method::GET, path, |req| req.query(query.pairs()))
            .await?;
        decode(&body)
    }

    /// `GET path` for one entity; 404 is [`ApiError::NotFound`].
    pub async fn get_entity<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self
            .execute(RequestKind::Lookup, Method::GET, path, |req| req)
            .await?;
        decode(&body)
    }

    /// `POST path` with a JSON body, decoded as `T`.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let body = self
            .execute(RequestKind::Create, Method::POST, path, |req| req.json(body))
            .await?;
        decode(&body)
    }

    /// `PATCH path` with a JSON body, decoded as `T`.
    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let body = self
            .execute(RequestKind::Update, Method::PATCH, path, |req| req.json(body))
            .await?;
        decode(&body)
    }

    /// `PATCH path` with a JSON body; the response body is ignored.
    pub async fn patch_json_ack<B>(&self, path: &str, body: &B) -> ApiResult<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.execute(RequestKind::Update, Method::PATCH, path, |req| req.json(body))
            .await
            .map(|_| ())
    }

    /// `POST path` with a multipart form, decoded as `T`.
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> ApiResult<T> {
        let body = self
            .execute(RequestKind::Create, Method::POST, path, move |req| req.multipart(form))
            .await?;
        decode(&body)
    }

    /// `PATCH path` with a multipart form, decoded as `T`.
    pub async fn patch_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> ApiResult<T> {
        let body = self
            .execute(RequestKind::Update, Method::PATCH, path, move |req| req.multipart(form))
            .await?;
        decode(&body)
    }

    /// `DELETE path`; any 2xx counts as success and any other status is
    /// [`ApiError::Transport`].
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(RequestKind::Plain, Method::DELETE, path, |req| req)
            .await
            .map(|_| ())
    }

    async fn execute<F>(
        &self,
        kind: RequestKind,
        method: Method,
        path: &str,
        build: F,
    ) -> ApiResult<Vec<u8>>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder + Send,
    {
        let url = self.endpoint(path)?;
        let token = self.session.token().await;

        let mut request = build(
            self.client
                .request(method.clone(), url.clone())
                .header(ACCEPT, "application/json"),
        );
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, path = url.path(), error = %e, "API request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            let error = ApiError::from_status(kind, status, url.path(), &body);
            tracing::warn!(
                %method,
                path = url.path(),
                status = status.as_u16(),
                elapsed_ms,
                error = %error,
                "API request rejected"
            );
            return Err(error);
        }

        tracing::debug!(
            %method,
            path = url.path(),
            status = status.as_u16(),
            elapsed_ms,
            "API request completed"
        );

        Ok(body.to_vec())
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}
