//! Endpoint table and shared request configuration.
//!
//! Every URL the client produces derives from the single origin stored here.

use std::fmt::Display;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use tozti_core::config::normalize_origin;
use tozti_core::JSON_API_MEDIA_TYPE;

use crate::error::{ApiError, ApiResult};

/// Absolute URLs of the backend's logical endpoints
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    origin: String,
    pub resources: String,
    pub types: String,
    pub me: String,
    pub login: String,
    pub signup: String,
}

impl Endpoints {
    pub fn from_origin(origin: &str) -> ApiResult<Self> {
        let origin = normalize_origin(origin)?;
        let prefix = format!("{}/api", origin);

        Ok(Self {
            resources: format!("{}/store/resources", prefix),
            types: format!("{}/store/by-type", prefix),
            me: format!("{}/auth/me", prefix),
            login: format!("{}/auth/login", prefix),
            signup: format!("{}/auth/signup", prefix),
            origin,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// `{resources}/{id}`. The id is not validated.
    pub fn resource_url(&self, id: impl Display) -> String {
        format!("{}/{}", self.resources, id)
    }

    /// `{types}/{type}`.
    pub fn type_url(&self, resource_type: impl Display) -> String {
        format!("{}/{}", self.types, resource_type)
    }

    /// `{resources}/{id}/{rel}`.
    pub fn relationship_url(&self, id: impl Display, rel: impl Display) -> String {
        format!("{}/{}/{}", self.resources, id, rel)
    }

    /// Parse `url` and make sure it belongs to this origin.
    pub fn check_same_origin(&self, url: &str) -> ApiResult<Url> {
        let parsed = Url::parse(url).map_err(|e| ApiError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.origin().ascii_serialization() != self.origin {
            return Err(ApiError::CrossOrigin {
                url: url.to_string(),
                origin: self.origin.clone(),
            });
        }
        Ok(parsed)
    }
}

/// Request mode: only same-origin requests are ever issued
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestMode {
    SameOrigin,
}

/// Credentials policy: cookies are stored and replayed for the origin only
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialsPolicy {
    SameOrigin,
}

/// Configuration shared by every request; only method and body vary per call
#[derive(Clone, Debug)]
pub struct RequestConfig {
    pub mode: RequestMode,
    pub credentials: CredentialsPolicy,
    headers: HeaderMap,
}

impl RequestConfig {
    /// JSON-API content negotiation with same-origin mode and credentials.
    pub fn json_api() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API_MEDIA_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API_MEDIA_TYPE));

        Self {
            mode: RequestMode::SameOrigin,
            credentials: CredentialsPolicy::SameOrigin,
            headers,
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self::json_api()
    }
}
