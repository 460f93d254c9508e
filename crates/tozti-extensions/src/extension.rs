//! Extension trait implemented by plugins

use std::fmt::Debug;

use anyhow::Result;

use crate::registry::ExtensionRegistry;

/// A plugin contributing routes, menus, resource types and components.
///
/// Extensions are trusted first-party or co-deployed code: the registry does
/// not validate what they register.
pub trait Extension: Send + Sync + Debug {
    /// Extension name/identifier, e.g. `discussion`
    fn name(&self) -> &str;

    /// Contribute to the registry. Called once, before the UI is rendered.
    fn register(&self, registry: &mut ExtensionRegistry) -> Result<()>;
}
