use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where a menu item points: a plain path or a named location with params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteTarget {
    Path(String),
    Location {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        params: Map<String, Value>,
    },
}

impl RouteTarget {
    /// Named route location, e.g. a workspace route expecting an `id` param.
    pub fn named(name: impl Into<String>) -> Self {
        RouteTarget::Location {
            name: Some(name.into()),
            path: None,
            params: Map::new(),
        }
    }
}

impl From<&str> for RouteTarget {
    fn from(path: &str) -> Self {
        RouteTarget::Path(path.to_string())
    }
}

impl From<String> for RouteTarget {
    fn from(path: String) -> Self {
        RouteTarget::Path(path)
    }
}

/// Sidebar menu entry. Props are passed through untouched (icons etc).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub route: RouteTarget,
    #[serde(default)]
    pub props: Map<String, Value>,
}

impl MenuItem {
    pub fn new(
        name: impl Into<String>,
        route: impl Into<RouteTarget>,
        props: Map<String, Value>,
    ) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            props,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_route_serializes_as_string() {
        let item = MenuItem::new("Groups", "/g/", Map::new());
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({ "name": "Groups", "route": "/g/", "props": {} })
        );
    }

    #[test]
    fn structured_location_round_trips_through_json() {
        let raw = json!({
            "name": "Threads",
            "route": { "name": "discussion-threads", "params": { "id": "ws-1" } },
            "props": { "icon": "nc-chat-33" }
        });
        let item: MenuItem = serde_json::from_value(raw.clone()).unwrap();

        match &item.route {
            RouteTarget::Location { name, params, .. } => {
                assert_eq!(name.as_deref(), Some("discussion-threads"));
                assert_eq!(params.get("id"), Some(&json!("ws-1")));
            }
            other => panic!("expected a location, got {:?}", other),
        }
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }
}
