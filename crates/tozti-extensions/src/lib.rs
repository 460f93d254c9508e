//! Extension mechanism for the tozti client.
//!
//! Plugins implement [`Extension`] and contribute routes, menu items, resource
//! types, taxonomy item renderers and polymorphic components to an
//! [`ExtensionRegistry`]. [`Bootstrap`] loads them in order and freezes the
//! result into [`Extensions`], the read-only view the UI layer renders from.

pub mod bootstrap;
pub mod defaults;
pub mod extension;
pub mod manifest;
pub mod polymorphic;
pub mod registry;

pub use bootstrap::{Bootstrap, Extensions};
pub use extension::Extension;
pub use manifest::Manifest;
pub use polymorphic::PolymorphicTable;
pub use registry::ExtensionRegistry;
