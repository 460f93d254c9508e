//! Domain methods for the tozti API client.
//!
//! Store routes live under `/api/store`, auth routes under `/api/auth`.

use std::fmt::Display;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tozti_core::{Document, NewResource, Resource};

use crate::{ApiClient, ApiResult};

/// Body of a successful `POST /api/auth/login`. The session itself travels in
/// the `auth-token` cookie kept by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub logged: bool,
    /// Only reported by non-production backends
    #[serde(default)]
    pub uid: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub handle: String,
    pub name: String,
    pub email: String,
    pub passwd: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub created: bool,
    #[serde(default)]
    pub uid: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    handle: &'a str,
    passwd: &'a str,
}

impl ApiClient {
    /// Fetch a single resource.
    pub async fn get_resource(&self, id: impl Display) -> ApiResult<Document<Resource>> {
        self.get_document(&self.resource_url(id)).await
    }

    /// List resources of a given type.
    pub async fn list_by_type(
        &self,
        resource_type: impl Display,
    ) -> ApiResult<Document<Vec<Resource>>> {
        self.get_document(&self.type_url(resource_type)).await
    }

    /// Create a resource; the store answers with its rendering.
    pub async fn create_resource(&self, resource: NewResource) -> ApiResult<Document<Resource>> {
        let url = &self.endpoints().resources;
        self.send_document(Method::POST, url, &resource.into_document())
            .await
    }

    /// Patch a resource with a JSON-API document.
    pub async fn update_resource<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        patch: &B,
    ) -> ApiResult<Option<Value>> {
        self.patch(&self.resource_url(id), patch).await
    }

    /// Delete a resource. Sends an empty object as body.
    pub async fn delete_resource(&self, id: impl Display) -> ApiResult<()> {
        self.delete(&self.resource_url(id), &json!({})).await?;
        Ok(())
    }

    pub async fn get_relationship(
        &self,
        id: impl Display,
        rel: impl Display,
    ) -> ApiResult<Option<Value>> {
        self.get(&self.relationship_url(id, rel)).await
    }

    /// Replace the whole content of a relationship.
    pub async fn replace_relationship<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        rel: impl Display,
        data: &B,
    ) -> ApiResult<Option<Value>> {
        self.put(&self.relationship_url(id, rel), data).await
    }

    /// Append to a to-many relationship.
    pub async fn append_relationship<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        rel: impl Display,
        data: &B,
    ) -> ApiResult<Option<Value>> {
        self.post(&self.relationship_url(id, rel), data).await
    }

    /// Log in; on success the auth cookie is stored for later calls.
    pub async fn login(&self, handle: &str, passwd: &str) -> ApiResult<LoginResponse> {
        let url = &self.endpoints().login;
        self.send_document(Method::POST, url, &LoginRequest { handle, passwd })
            .await
    }

    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<SignupResponse> {
        let url = &self.endpoints().signup;
        self.send_document(Method::POST, url, request).await
    }

    /// The logged-in user (`core/user` resource).
    pub async fn me(&self) -> ApiResult<Document<Resource>> {
        let url = &self.endpoints().me;
        self.get_document(url).await
    }
}
