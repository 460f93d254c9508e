//! Generic HTTP client for the tozti backend.
//!
//! Provides a client bound to a single origin with JSON-API content
//! negotiation and a same-origin cookie jar, generic GET/POST/PATCH/PUT/DELETE
//! helpers, and domain methods for the store and auth endpoints.

pub mod api;
pub mod endpoints;
pub mod error;

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{redirect, Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tozti_core::{ClientConfig, Document};
use tracing::{debug, warn};

pub use api::{LoginResponse, SignupRequest, SignupResponse};
pub use endpoints::{CredentialsPolicy, Endpoints, RequestConfig, RequestMode};
pub use error::{ApiError, ApiResult, ApiResultExt, ErrorBody};

const MAX_REDIRECTS: usize = 10;

/// HTTP client for the tozti API, scoped to one origin.
///
/// Cheap to clone: the underlying connection pool and cookie jar are shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    endpoints: Arc<Endpoints>,
    config: Arc<RequestConfig>,
}

impl ApiClient {
    pub fn new(origin: &str) -> ApiResult<Self> {
        Self::from_config(&ClientConfig::for_origin(origin)?)
    }

    /// Create client from environment: TOZTI_ORIGIN (or TOZTI_URL), TOZTI_TIMEOUT_SECS.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let endpoints = Endpoints::from_origin(&config.origin)?;
        let origin = endpoints.origin().to_string();

        // Redirects are only followed while they stay on the origin.
        let policy = redirect::Policy::custom(move |attempt| {
            if attempt.url().origin().ascii_serialization() != origin {
                attempt.stop()
            } else if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else {
                attempt.follow()
            }
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .redirect(policy)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            client,
            endpoints: Arc::new(endpoints),
            config: Arc::new(RequestConfig::json_api()),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn origin(&self) -> &str {
        self.endpoints.origin()
    }

    pub fn request_config(&self) -> &RequestConfig {
        &self.config
    }

    pub fn resource_url(&self, id: impl Display) -> String {
        self.endpoints.resource_url(id)
    }

    pub fn type_url(&self, resource_type: impl Display) -> String {
        self.endpoints.type_url(resource_type)
    }

    pub fn relationship_url(&self, id: impl Display, rel: impl Display) -> String {
        self.endpoints.relationship_url(id, rel)
    }

    pub async fn get(&self, url: &str) -> ApiResult<Option<Value>> {
        self.request(Method::GET, url, None::<&Value>).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, url: &str, data: &B) -> ApiResult<Option<Value>> {
        self.request(Method::POST, url, Some(data)).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &B,
    ) -> ApiResult<Option<Value>> {
        self.request(Method::PATCH, url, Some(data)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, url: &str, data: &B) -> ApiResult<Option<Value>> {
        self.request(Method::PUT, url, Some(data)).await
    }

    /// DELETE with a JSON body; the store accepts (and some routes expect) one.
    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &B,
    ) -> ApiResult<Option<Value>> {
        self.request(Method::DELETE, url, Some(data)).await
    }

    /// Issue exactly one request with the shared configuration.
    ///
    /// Any failure is logged once at warn level before being returned.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<Option<Value>> {
        let result = self.send(method.clone(), url, body).await;
        if let Err(err) = &result {
            log_failure(&method, url, err);
        }
        result
    }

    /// GET a JSON-API document and deserialize its `data` member.
    pub async fn get_document<T: DeserializeOwned>(&self, url: &str) -> ApiResult<Document<T>> {
        let value = self.get(url).await?;
        decode(&Method::GET, url, value)
    }

    pub(crate) async fn send_document<B, T>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.request(method.clone(), url, Some(body)).await?;
        decode(&method, url, value)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<Option<Value>> {
        let target = self.endpoints.check_same_origin(url)?;

        let mut request = self
            .client
            .request(method.clone(), target)
            .headers(self.config.headers().clone());

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(ApiError::Serialize)?;
            request = request.body(bytes);
        }

        debug!(method = %method, url = %url, "Sending API request");
        let response = request.send().await.map_err(ApiError::Transport)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::Transport)?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: ErrorBody::from_bytes(&bytes),
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(ApiError::Decode)
    }
}

fn decode<T: DeserializeOwned>(method: &Method, url: &str, value: Option<Value>) -> ApiResult<T> {
    let result = value
        .ok_or(ApiError::MissingBody)
        .and_then(|value| serde_json::from_value(value).map_err(ApiError::Decode));
    if let Err(err) = &result {
        log_failure(method, url, err);
    }
    result
}

fn log_failure(method: &Method, url: &str, err: &ApiError) {
    match err.status() {
        Some(status) => warn!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            error = %err,
            "API request failed"
        ),
        None => warn!(method = %method, url = %url, error = %err, "API request failed"),
    }
}
