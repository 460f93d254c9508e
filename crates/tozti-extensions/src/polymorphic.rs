//! Per-resource-type dispatch tables
//!
//! A polymorphic component renders a resource by delegating to the handler
//! registered for the resource's type, or to the table's fallback.

use std::collections::BTreeMap;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use tozti_core::{ComponentRef, Resource, TypeTag};

/// Mapping from type tag to handler with a mandatory fallback.
///
/// Lookups never fail: unknown types resolve to the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolymorphicTable<H = ComponentRef> {
    fallback: H,
    #[serde(default = "BTreeMap::new")]
    entries: BTreeMap<TypeTag, H>,
}

impl<H> PolymorphicTable<H> {
    pub fn new(fallback: H) -> Self {
        Self {
            fallback,
            entries: BTreeMap::new(),
        }
    }

    /// Register `handler` for `type_tag`, returning the handler it replaces.
    pub fn insert(&mut self, type_tag: impl Into<TypeTag>, handler: H) -> Option<H> {
        self.entries.insert(type_tag.into(), handler)
    }

    /// Builder form of [`PolymorphicTable::insert`].
    pub fn with(mut self, type_tag: impl Into<TypeTag>, handler: H) -> Self {
        self.insert(type_tag, handler);
        self
    }

    /// Handler for `type_tag`, or the fallback.
    pub fn resolve(&self, type_tag: &str) -> &H {
        self.entries.get(type_tag).unwrap_or(&self.fallback)
    }

    pub fn resolve_resource(&self, resource: &Resource) -> &H {
        self.resolve(resource.resource_type.as_str())
    }

    /// Exact match only, no fallback.
    pub fn get(&self, type_tag: &str) -> Option<&H> {
        self.entries.get(type_tag)
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.entries.contains_key(type_tag)
    }

    pub fn fallback(&self) -> &H {
        &self.fallback
    }

    /// Replace the fallback, returning the previous one.
    pub fn set_fallback(&mut self, fallback: H) -> H {
        std::mem::replace(&mut self.fallback, fallback)
    }

    /// Type-specific entries, ordered by type tag.
    pub fn entries(&self) -> impl Iterator<Item = (&TypeTag, &H)> {
        self.entries.iter()
    }

    /// Number of type-specific entries (the fallback is not counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> Index<&str> for PolymorphicTable<H> {
    type Output = H;

    fn index(&self, type_tag: &str) -> &H {
        self.resolve(type_tag)
    }
}
