//! REST client for the shop backend.
//!
//! Every resource follows the same shape: `GET /r`, `GET /r/:id`, `POST /r`,
//! `PUT /r/:id`, `DELETE /r/:id`, JSON bodies, bearer auth.

use crate::config::BackendSettings;
use crate::middleware::AccessToken;
use crate::services::metrics::record_backend_call;
use console_core::error::AppError;
use console_core::observability::{TracedClientExt, TracedRequest};
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected backend payload: {0}")]
    Decode(String),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, body } => match status {
                StatusCode::NOT_FOUND => AppError::NotFound(anyhow::anyhow!(body)),
                StatusCode::UNAUTHORIZED => AppError::Unauthorized(anyhow::anyhow!(body)),
                StatusCode::FORBIDDEN => AppError::Forbidden(anyhow::anyhow!(body)),
                StatusCode::CONFLICT => AppError::Conflict(anyhow::anyhow!(body)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    AppError::BadRequest(anyhow::anyhow!(body))
                }
                other => AppError::BadGateway(format!("backend returned {}", other)),
            },
            ApiError::Transport(e) => {
                tracing::error!(error = %e, "Backend unreachable");
                AppError::ServiceUnavailable
            }
            ApiError::Decode(msg) => AppError::BadGateway(msg),
        }
    }
}

/// List endpoints answer either a bare array or `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Wrapped { data } => data,
        }
    }
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::GET, token, path);
        self.execute(Method::GET, path, request).await
    }

    /// GET a collection, accepting either list envelope.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
    ) -> Result<Vec<T>, ApiError> {
        let envelope: ListEnvelope<T> = self.get(token, path).await?;
        Ok(envelope.into_vec())
    }

    pub async fn post<B, T>(&self, token: &AccessToken, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, token, path).json(body);
        self.execute(Method::POST, path, request).await
    }

    pub async fn put<B, T>(&self, token: &AccessToken, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, token, path).json(body);
        self.execute(Method::PUT, path, request).await
    }

    pub async fn delete(&self, token: &AccessToken, path: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, token, path);
        let _: serde_json::Value = self.execute(Method::DELETE, path, request).await?;
        Ok(())
    }

    fn request(&self, method: Method, token: &AccessToken, path: &str) -> TracedRequest {
        self.client
            .traced(method, &self.url(path))
            .bearer_auth(token.expose())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: TracedRequest,
    ) -> Result<T, ApiError> {
        let method = method.as_str();
        let response = request.send().await.map_err(|e| {
            tracing::error!(method, path, error = %e, "Backend request failed");
            record_backend_call(method, path, "transport_error");
            ApiError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(method, path, status = %status, "Backend rejected request");
            record_backend_call(method, path, "rejected");
            return Err(ApiError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        record_backend_call(method, path, "ok");

        // 204 and empty 200 bodies decode as JSON null.
        let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(payload).map_err(|e| {
            tracing::error!(method, path, error = %e, "Failed to decode backend response");
            ApiError::Decode(format!("{} {}: {}", method, path, e))
        })
    }
}
