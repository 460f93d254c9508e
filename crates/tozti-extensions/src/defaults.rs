//! Core components, menu items and routes shipped with every tozti client.

use serde_json::{json, Map, Value};
use tozti_core::{MenuItem, Route};

pub const LOGIN_VIEW: &str = "login-view";
pub const APP_LAYOUT: &str = "tozti-layout";
pub const DASHBOARD_VIEW: &str = "dashboard-view";
pub const SUMMARY_VIEW: &str = "summary-view";
pub const TAXONOMY_VIEW: &str = "taxonomy-view";

/// Fallback renderer for taxonomy folder entries without a dedicated component
pub const TAXONOMY_ITEM_FALLBACK: &str = "taxonomy-item-generic";

fn icon(name: &str) -> Map<String, Value> {
    let mut props = Map::new();
    props.insert("icon".to_string(), json!(name));
    props
}

pub fn core_menu_items() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Mes groupes", "/g/", icon("nc-multiple-11")),
        MenuItem::new("Paramètres", "/settings", icon("nc-settings-gear-63")),
    ]
}

/// Login page plus the application layout with dashboard, workspace summary
/// and taxonomy browsing as children.
pub fn core_routes() -> Vec<Route> {
    vec![
        Route::new("/login", LOGIN_VIEW),
        Route::new("/", APP_LAYOUT).with_children(vec![
            Route::new("/", DASHBOARD_VIEW),
            Route::new("w/:id", SUMMARY_VIEW),
            Route::new("w/:taxonomy+", TAXONOMY_VIEW).with_props(),
        ]),
    ]
}
