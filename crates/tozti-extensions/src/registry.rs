//! Extension registry collecting plugin contributions
//!
//! The registry is an explicit value built at bootstrap. It is filled during
//! the extension loading phase, then frozen by [`crate::Bootstrap::launch`].
//! All sequences are append-only and keep insertion order.
//!
//! Registration is permissive on purpose: duplicate names, duplicate types
//! and unknown gender codes are all accepted, since every registrant is
//! trusted code deployed with the client.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tozti_api_client::ApiClient;
use tozti_core::{
    ComponentRef, Gender, MenuItem, ResourceType, Route, RouteTarget, TaxonomyItem, TypeTag,
};
use tracing::{debug, info_span};

use crate::defaults::{core_menu_items, core_routes, TAXONOMY_ITEM_FALLBACK};
use crate::extension::Extension;
use crate::polymorphic::PolymorphicTable;

/// Registry for routes, menu items, resource types and polymorphic components.
///
/// Mutation requires `&mut self`; registration happens in a single pass before
/// the UI starts, so no locking is involved.
#[derive(Debug)]
pub struct ExtensionRegistry {
    api: ApiClient,
    global_menu_items: Vec<MenuItem>,
    workspace_menu_items: Vec<MenuItem>,
    resource_types: Vec<ResourceType>,
    taxonomy_items: Vec<TaxonomyItem>,
    routes: Vec<Route>,
    polymorphic: BTreeMap<String, PolymorphicTable>,
    loaded: Vec<String>,
}

impl ExtensionRegistry {
    /// Create a new empty registry carrying `api` for extensions to use
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            global_menu_items: Vec::new(),
            workspace_menu_items: Vec::new(),
            resource_types: Vec::new(),
            taxonomy_items: Vec::new(),
            routes: Vec::new(),
            polymorphic: BTreeMap::new(),
            loaded: Vec::new(),
        }
    }

    /// Registry pre-filled with the core menu items and routes
    pub fn with_core_defaults(api: ApiClient) -> Self {
        let mut registry = Self::new(api);
        registry.global_menu_items.extend(core_menu_items());
        registry.routes.extend(core_routes());
        registry
    }

    /// Run an extension's registration hook.
    ///
    /// Errors raised by the extension itself propagate; the registry adds none.
    pub fn register(&mut self, extension: &dyn Extension) -> Result<()> {
        let name = extension.name().to_string();
        let _span = info_span!("extension", name = %name).entered();

        extension
            .register(self)
            .with_context(|| format!("Extension '{}' failed to register", name))?;

        debug!("Extension registered");
        self.loaded.push(name);
        Ok(())
    }

    /// Define a global sidebar menu item. Duplicates are kept in order.
    pub fn add_menu_item(
        &mut self,
        name: impl Into<String>,
        route: impl Into<RouteTarget>,
        props: Map<String, Value>,
    ) {
        let item = MenuItem::new(name, route, props);
        debug!(name = %item.name, "Adding global menu item");
        self.global_menu_items.push(item);
    }

    /// Define a workspace menu item. `route` should expect an `id` parameter.
    pub fn add_workspace_menu_item(
        &mut self,
        name: impl Into<String>,
        route: impl Into<RouteTarget>,
        props: Map<String, Value>,
    ) {
        let item = MenuItem::new(name, route, props);
        debug!(name = %item.name, "Adding workspace menu item");
        self.workspace_menu_items.push(item);
    }

    /// Register a creatable resource type.
    ///
    /// `name` is the lowercase display label and `gender` its grammatical
    /// gender (`m` or `f`); neither is checked, nor is `type_tag` uniqueness.
    pub fn add_resource_type(
        &mut self,
        type_tag: impl Into<TypeTag>,
        name: impl Into<String>,
        gender: impl Into<Gender>,
        creation_form: impl Into<ComponentRef>,
    ) {
        let entry = ResourceType {
            type_tag: type_tag.into(),
            name: name.into(),
            gender: gender.into(),
            creation_form: creation_form.into(),
        };
        debug!(type_tag = %entry.type_tag, gender = %entry.gender, "Adding resource type");
        self.resource_types.push(entry);
    }

    /// Register the component rendering `type_tag` entries in taxonomy folders.
    pub fn add_taxonomy_item(
        &mut self,
        type_tag: impl Into<TypeTag>,
        component: impl Into<ComponentRef>,
    ) {
        let item = TaxonomyItem {
            type_tag: type_tag.into(),
            component: component.into(),
        };
        debug!(type_tag = %item.type_tag, component = %item.component, "Adding taxonomy item");
        self.taxonomy_items.push(item);
    }

    /// Dispatch table for taxonomy folder entries.
    ///
    /// Built from the taxonomy items in registration order, so a later item
    /// for the same type overrides an earlier one.
    pub fn taxonomy_item_component(&self) -> PolymorphicTable {
        self.taxonomy_items.iter().fold(
            PolymorphicTable::new(ComponentRef::from(TAXONOMY_ITEM_FALLBACK)),
            |table, item| table.with(item.type_tag.clone(), item.component.clone()),
        )
    }

    /// Append top-level routes to the route table.
    pub fn add_routes(&mut self, routes: impl IntoIterator<Item = Route>) {
        let before = self.routes.len();
        self.routes.extend(routes);
        debug!(added = self.routes.len() - before, "Adding routes");
    }

    /// Route table in the shape consumed by the UI router.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Create and register a polymorphic component named `name`.
    ///
    /// The returned table starts with only `fallback`; add type-specific
    /// handlers through it, or later through [`Self::polymorphic_table_mut`].
    /// Registering an existing name replaces the previous table.
    pub fn polymorphic_component(
        &mut self,
        name: impl Into<String>,
        fallback: impl Into<ComponentRef>,
    ) -> &mut PolymorphicTable {
        let table = PolymorphicTable::new(fallback.into());
        match self.polymorphic.entry(name.into()) {
            Entry::Occupied(mut entry) => {
                debug!(name = %entry.key(), "Replacing polymorphic component");
                entry.insert(table);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!(name = %entry.key(), "Adding polymorphic component");
                entry.insert(table)
            }
        }
    }

    pub fn polymorphic_table(&self, name: &str) -> Option<&PolymorphicTable> {
        self.polymorphic.get(name)
    }

    pub fn polymorphic_table_mut(&mut self, name: &str) -> Option<&mut PolymorphicTable> {
        self.polymorphic.get_mut(name)
    }

    pub fn polymorphic_tables(&self) -> &BTreeMap<String, PolymorphicTable> {
        &self.polymorphic
    }

    pub fn global_menu_items(&self) -> &[MenuItem] {
        &self.global_menu_items
    }

    pub fn workspace_menu_items(&self) -> &[MenuItem] {
        &self.workspace_menu_items
    }

    pub fn resource_types(&self) -> &[ResourceType] {
        &self.resource_types
    }

    pub fn taxonomy_items(&self) -> &[TaxonomyItem] {
        &self.taxonomy_items
    }

    /// Names of the extensions registered so far, in load order.
    pub fn loaded_extensions(&self) -> &[String] {
        &self.loaded
    }

    /// API client handed to extensions and UI code.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
