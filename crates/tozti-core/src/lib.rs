//! Tozti Core Library
//!
//! This crate provides the domain models, error type and configuration shared
//! by the API client, the extension registry and the CLI.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ToztiError, ToztiResult};
pub use models::{
    ComponentRef, Document, ErrorDocument, ErrorObject, Gender, MenuItem, NewResource, Relationship,
    Resource, ResourceMeta, ResourceType, Route, RouteTarget, TaxonomyItem, TypeTag,
    JSON_API_MEDIA_TYPE,
};
