//! Data models shared across the client
//!
//! JSON-API documents exchanged with the backend, and the records extensions
//! contribute to the registry (menu items, resource types, routes).

mod component;
mod document;
mod menu;
mod resource_type;
mod route;

// Re-export all models for convenient imports
pub use component::*;
pub use document::*;
pub use menu::*;
pub use resource_type::*;
pub use route::*;
