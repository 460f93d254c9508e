use anyhow::Result;
use mockito::Server;
use serde_json::{json, Map};
use tozti_api_client::ApiClient;
use tozti_core::{ComponentRef, Route, RouteTarget};
use tozti_extensions::{Bootstrap, Extension, ExtensionRegistry, Manifest};

#[derive(Debug)]
struct CalendarExtension;

impl Extension for CalendarExtension {
    fn name(&self) -> &str {
        "calendar"
    }

    fn register(&self, registry: &mut ExtensionRegistry) -> Result<()> {
        registry.add_resource_type("calendar/event", "événement", "m", "calendar-new-event");
        registry.add_taxonomy_item("calendar/event", "calendar-event-item");
        registry.add_workspace_menu_item(
            "Agenda",
            RouteTarget::named("calendar-agenda"),
            Map::new(),
        );
        registry.add_routes(vec![
            Route::new("/calendar/:id", "calendar-agenda").named("calendar-agenda")
        ]);
        Ok(())
    }
}

#[derive(Debug)]
struct ThumbnailExtension;

impl Extension for ThumbnailExtension {
    fn name(&self) -> &str {
        "thumbnails"
    }

    fn register(&self, registry: &mut ExtensionRegistry) -> Result<()> {
        registry
            .polymorphic_component("thumbnail", "generic-thumbnail")
            .insert("calendar/event", ComponentRef::from("event-thumbnail"));
        Ok(())
    }
}

#[derive(Debug)]
struct FailingExtension;

impl Extension for FailingExtension {
    fn name(&self) -> &str {
        "failing"
    }

    fn register(&self, _registry: &mut ExtensionRegistry) -> Result<()> {
        anyhow::bail!("bundle not found")
    }
}

fn api(origin: &str) -> ApiClient {
    ApiClient::new(origin).expect("valid origin")
}

#[test]
fn test_launch_registers_extensions_in_order() {
    let extensions = Bootstrap::new(ExtensionRegistry::with_core_defaults(api(
        "http://localhost:8080",
    )))
    .extension(CalendarExtension)
    .extension(ThumbnailExtension)
    .launch()
    .unwrap();

    assert_eq!(extensions.loaded_extensions(), ["calendar", "thumbnails"]);
    assert!(extensions.me().is_none());

    // core routes come first, extension routes are appended
    let paths: Vec<&str> = extensions.routes().iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/login", "/", "/calendar/:id"]);

    let taxonomy = extensions.taxonomy_item_component();
    assert_eq!(taxonomy.resolve("calendar/event").name(), "calendar-event-item");
    assert_eq!(taxonomy.resolve("core/folder").name(), "taxonomy-item-generic");

    let thumbnail = extensions.polymorphic_table("thumbnail").unwrap();
    assert_eq!(thumbnail.resolve("calendar/event").name(), "event-thumbnail");
    assert_eq!(thumbnail.resolve("discussion/thread").name(), "generic-thumbnail");
}

#[test]
fn test_launch_stops_at_failing_extension() {
    let err = Bootstrap::new(ExtensionRegistry::new(api("http://localhost:8080")))
        .extension(CalendarExtension)
        .extension(FailingExtension)
        .extension(ThumbnailExtension)
        .launch()
        .unwrap_err();

    assert!(err.to_string().contains("failing"));
    assert!(format!("{:#}", err).contains("bundle not found"));
}

#[test]
fn test_frozen_extensions_share_snapshot() {
    let extensions = Bootstrap::new(ExtensionRegistry::new(api("http://localhost:8080")))
        .extension(CalendarExtension)
        .launch()
        .unwrap();
    let clone = extensions.clone();

    assert_eq!(clone.resource_types(), extensions.resource_types());
    assert_eq!(clone.api().origin(), "http://localhost:8080");
}

#[test]
fn test_manifest_json_shape() {
    let extensions = Bootstrap::new(ExtensionRegistry::with_core_defaults(api(
        "http://localhost:8080",
    )))
    .extension(CalendarExtension)
    .extension(ThumbnailExtension)
    .launch()
    .unwrap();

    let manifest = extensions.manifest();
    let value = serde_json::to_value(&manifest).unwrap();

    assert_eq!(value["origin"], json!("http://localhost:8080"));
    assert_eq!(value["extensions"], json!(["calendar", "thumbnails"]));
    assert_eq!(value["globalMenuItems"][0]["name"], json!("Mes groupes"));
    assert_eq!(value["workspaceMenuItems"][0]["name"], json!("Agenda"));
    assert_eq!(
        value["resourceTypes"][0],
        json!({
            "type": "calendar/event",
            "name": "événement",
            "gender": "m",
            "creationForm": "calendar-new-event"
        })
    );
    assert_eq!(
        value["polymorphicComponents"]["thumbnail"]["fallback"],
        json!("generic-thumbnail")
    );
    assert_eq!(
        value["taxonomyItemComponent"]["entries"]["calendar/event"],
        json!("calendar-event-item")
    );
    assert!(value.get("me").is_none());

    let parsed: Manifest = serde_json::from_str(&manifest.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, manifest);
}

#[tokio::test]
async fn test_launch_with_session_fetches_me() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/auth/me")
        .with_status(200)
        .with_header("content-type", "application/vnd.api+json")
        .with_body(
            json!({
                "data": {
                    "id": "8c2d5a8e-5f0e-4c1b-9a3e-2f4b6d7e8f90",
                    "type": "core/user",
                    "attributes": { "name": "Alice", "handle": "alice" },
                    "relationships": {},
                    "meta": {
                        "created": "2018-03-01T10:00:00",
                        "last-modified": "2018-03-02T12:30:00"
                    }
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let extensions = Bootstrap::new(ExtensionRegistry::new(api(&server.url())))
        .extension(CalendarExtension)
        .launch_with_session()
        .await
        .unwrap();

    mock.assert_async().await;
    let me = extensions.me().unwrap();
    assert_eq!(me.resource_type.as_str(), "core/user");
    assert_eq!(me.attribute("handle"), Some(&json!("alice")));

    let manifest = serde_json::to_value(extensions.manifest()).unwrap();
    assert_eq!(manifest["me"]["attributes"]["name"], json!("Alice"));
}

#[tokio::test]
async fn test_launch_with_session_without_login() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/auth/me")
        .with_status(401)
        .with_header("content-type", "application/vnd.api+json")
        .with_body(r#"{"errors":[{"code":"NOT_LOGGED_IN","title":"not logged in"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let extensions = Bootstrap::new(ExtensionRegistry::with_core_defaults(api(&server.url())))
        .launch_with_session()
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(extensions.me().is_none());
    assert_eq!(extensions.routes().len(), 2);
}
