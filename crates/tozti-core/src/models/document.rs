use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Media type used for both `Content-Type` and `Accept` on every request.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Namespaced resource type, e.g. `core/user` or `discussion/thread`.
///
/// Never validated: a tag without a namespace is still a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part before the first `/`, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once('/').map(|(ns, _)| ns)
    }

    /// Part after the first `/`, or the whole tag when there is no namespace.
    pub fn kind(&self) -> &str {
        self.0.split_once('/').map_or(self.0.as_str(), |(_, kind)| kind)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TypeTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Top-level JSON-API document: `{ "data": ..., "meta": ..., "links": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

impl<T> Document<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: None,
            links: None,
        }
    }
}

/// Resource as rendered by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: TypeTag,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub relationships: BTreeMap<String, Relationship>,
    #[serde(default)]
    pub meta: ResourceMeta,
}

impl Resource {
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.get(name)
    }
}

/// Payload for creating a resource (no id, no server-generated meta)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResource {
    #[serde(rename = "type")]
    pub resource_type: TypeTag,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub relationships: Map<String, Value>,
}

impl NewResource {
    pub fn new(resource_type: impl Into<TypeTag>, attributes: Map<String, Value>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes,
            relationships: Map::new(),
        }
    }

    /// Wrap into the `{ "data": ... }` envelope expected by the store.
    pub fn into_document(self) -> Document<NewResource> {
        Document::new(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default)]
    pub data: Value,
}

/// Server-managed metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(
        rename = "last-modified",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceMeta {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.as_deref().and_then(parse_timestamp)
    }

    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        self.last_modified.as_deref().and_then(parse_timestamp)
    }
}

// The store emits either RFC 3339 or naive ISO timestamps (assumed UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// JSON-API error document: `{ "errors": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn type_tag_splits_namespace_and_kind() {
        let tag = TypeTag::from("discussion/thread");
        assert_eq!(tag.namespace(), Some("discussion"));
        assert_eq!(tag.kind(), "thread");

        let bare = TypeTag::from("image");
        assert_eq!(bare.namespace(), None);
        assert_eq!(bare.kind(), "image");
    }

    #[test]
    fn resource_deserializes_store_rendering() {
        let raw = json!({
            "data": {
                "id": "4e8f3a52-9d1c-4c7e-8d7a-3e2b1f0a9c11",
                "type": "core/folder",
                "attributes": { "name": "Projects" },
                "meta": {
                    "created": "2018-03-14T09:26:53.589",
                    "last-modified": "2018-03-15T10:00:00Z"
                },
                "relationships": {
                    "self": { "data": "http://localhost/resources/4e8f3a52-9d1c-4c7e-8d7a-3e2b1f0a9c11" },
                    "children": {
                        "self": "http://localhost/resources/4e8f3a52-9d1c-4c7e-8d7a-3e2b1f0a9c11/children",
                        "data": []
                    }
                }
            }
        });

        let doc: Document<Resource> = serde_json::from_value(raw).unwrap();
        let resource = doc.data;
        assert_eq!(resource.resource_type.as_str(), "core/folder");
        assert_eq!(resource.attribute("name"), Some(&json!("Projects")));

        let children = resource.relationship("children").unwrap();
        assert!(children.self_link.as_deref().unwrap().ends_with("/children"));
        assert_eq!(children.data, json!([]));

        let created = resource.meta.created_at().unwrap();
        assert_eq!((created.year(), created.month(), created.day()), (2018, 3, 14));
        assert_eq!(resource.meta.last_modified_at().unwrap().hour(), 10);
    }

    #[test]
    fn resource_tolerates_missing_optional_sections() {
        let resource: Resource =
            serde_json::from_value(json!({ "id": "42", "type": "image" })).unwrap();
        assert!(resource.attributes.is_empty());
        assert!(resource.relationships.is_empty());
        assert_eq!(resource.meta, ResourceMeta::default());
        assert_eq!(resource.meta.created_at(), None);
    }

    #[test]
    fn new_resource_document_shape() {
        let mut attributes = Map::new();
        attributes.insert("name".to_string(), json!("Inbox"));
        let doc = NewResource::new("core/folder", attributes).into_document();

        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({ "data": { "type": "core/folder", "attributes": { "name": "Inbox" } } })
        );
    }

    #[test]
    fn error_document_keeps_unknown_members() {
        let doc: ErrorDocument = serde_json::from_value(json!({
            "errors": [{ "code": "RESOURCE_NOT_FOUND", "title": "resource not found", "id": "42" }]
        }))
        .unwrap();

        assert_eq!(doc.errors.len(), 1);
        assert_eq!(doc.errors[0].code.as_deref(), Some("RESOURCE_NOT_FOUND"));
        assert_eq!(doc.errors[0].extra.get("id"), Some(&json!("42")));
    }
}
