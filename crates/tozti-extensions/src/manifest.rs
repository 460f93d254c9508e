//! JSON snapshot of a launched registry, consumed by the UI layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tozti_core::{MenuItem, Resource, ResourceType, Route, TaxonomyItem};

use crate::polymorphic::PolymorphicTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub origin: String,
    pub extensions: Vec<String>,
    pub global_menu_items: Vec<MenuItem>,
    pub workspace_menu_items: Vec<MenuItem>,
    pub resource_types: Vec<ResourceType>,
    pub taxonomy_items: Vec<TaxonomyItem>,
    pub taxonomy_item_component: PolymorphicTable,
    pub routes: Vec<Route>,
    pub polymorphic_components: BTreeMap<String, PolymorphicTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub me: Option<Resource>,
}

impl Manifest {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
