use std::fmt;

use serde::{Deserialize, Serialize};

use super::TypeTag;

/// Opaque reference to a UI component, resolved by name by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRef(String);

impl ComponentRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentRef {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ComponentRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Component used to render resources of `type` inside a taxonomy folder view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyItem {
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    pub component: ComponentRef,
}
