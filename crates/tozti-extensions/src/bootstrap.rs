//! Application bootstrap: load extensions, then freeze the registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use tozti_api_client::ApiClient;
use tozti_core::{MenuItem, Resource, ResourceType, Route, TaxonomyItem};
use tracing::{debug, info};

use crate::extension::Extension;
use crate::manifest::Manifest;
use crate::polymorphic::PolymorphicTable;
use crate::registry::ExtensionRegistry;

/// Collects extensions and launches them against a registry, in order.
#[derive(Debug)]
pub struct Bootstrap {
    registry: ExtensionRegistry,
    extensions: Vec<Arc<dyn Extension>>,
}

impl Bootstrap {
    pub fn new(registry: ExtensionRegistry) -> Self {
        Self {
            registry,
            extensions: Vec::new(),
        }
    }

    pub fn extension(mut self, extension: impl Extension + 'static) -> Self {
        self.extensions.push(Arc::new(extension));
        self
    }

    pub fn extensions(mut self, extensions: impl IntoIterator<Item = Arc<dyn Extension>>) -> Self {
        self.extensions.extend(extensions);
        self
    }

    /// Register every extension, then freeze the registry.
    ///
    /// Stops at the first extension whose hook fails.
    pub fn launch(self) -> Result<Extensions> {
        let registry = self.load()?;
        Ok(Extensions::freeze(registry, None))
    }

    /// Like [`Bootstrap::launch`], also fetching the logged-in user.
    ///
    /// An unauthenticated or unreachable backend leaves `me` unset rather
    /// than failing the launch; the client has already logged the failure.
    pub async fn launch_with_session(self) -> Result<Extensions> {
        let registry = self.load()?;
        let me = match registry.api().me().await {
            Ok(doc) => Some(doc.data),
            Err(err) => {
                debug!(error = %err, "No session, launching anonymously");
                None
            }
        };
        Ok(Extensions::freeze(registry, me))
    }

    fn load(mut self) -> Result<ExtensionRegistry> {
        for extension in &self.extensions {
            self.registry.register(extension.as_ref())?;
        }
        info!(
            extensions = self.registry.loaded_extensions().len(),
            routes = self.registry.routes().len(),
            "Extensions loaded"
        );
        Ok(self.registry)
    }
}

/// Frozen registry for the rest of the session.
///
/// Exposes no mutators; clones share the same snapshot.
#[derive(Debug, Clone)]
pub struct Extensions {
    registry: Arc<ExtensionRegistry>,
    me: Option<Arc<Resource>>,
}

impl Extensions {
    fn freeze(registry: ExtensionRegistry, me: Option<Resource>) -> Self {
        Self {
            registry: Arc::new(registry),
            me: me.map(Arc::new),
        }
    }

    /// The logged-in user, when launched with a session.
    pub fn me(&self) -> Option<&Resource> {
        self.me.as_deref()
    }

    pub fn api(&self) -> &ApiClient {
        self.registry.api()
    }

    pub fn global_menu_items(&self) -> &[MenuItem] {
        self.registry.global_menu_items()
    }

    pub fn workspace_menu_items(&self) -> &[MenuItem] {
        self.registry.workspace_menu_items()
    }

    pub fn resource_types(&self) -> &[ResourceType] {
        self.registry.resource_types()
    }

    pub fn taxonomy_items(&self) -> &[TaxonomyItem] {
        self.registry.taxonomy_items()
    }

    pub fn taxonomy_item_component(&self) -> PolymorphicTable {
        self.registry.taxonomy_item_component()
    }

    pub fn routes(&self) -> &[Route] {
        self.registry.routes()
    }

    pub fn polymorphic_table(&self, name: &str) -> Option<&PolymorphicTable> {
        self.registry.polymorphic_table(name)
    }

    pub fn polymorphic_tables(&self) -> &BTreeMap<String, PolymorphicTable> {
        self.registry.polymorphic_tables()
    }

    pub fn loaded_extensions(&self) -> &[String] {
        self.registry.loaded_extensions()
    }

    /// Serializable snapshot for the rendering layer.
    pub fn manifest(&self) -> Manifest {
        Manifest {
            origin: self.api().origin().to_string(),
            extensions: self.loaded_extensions().to_vec(),
            global_menu_items: self.global_menu_items().to_vec(),
            workspace_menu_items: self.workspace_menu_items().to_vec(),
            resource_types: self.resource_types().to_vec(),
            taxonomy_items: self.taxonomy_items().to_vec(),
            taxonomy_item_component: self.taxonomy_item_component(),
            routes: self.routes().to_vec(),
            polymorphic_components: self.polymorphic_tables().clone(),
            me: self.me().cloned(),
        }
    }
}
