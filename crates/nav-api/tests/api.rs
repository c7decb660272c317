//! HTTP behaviour of the admin API over the in-memory store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use nav_api::{build_router, AppState};
use nav_core::domain::ContentKind;
use nav_infrastructure::{MemoryContent, MemoryStore};
use nav_shared::config::NavigationSettings;
use nav_shared::constants::ADMIN_ACTOR_HEADER;

struct TestApp {
    router: Router,
    store: MemoryStore,
    content: MemoryContent,
    actor: Uuid,
}

fn app_with(store: MemoryStore) -> TestApp {
    let content = MemoryContent::new("");
    let state = AppState::new(
        Arc::new(store.menus()),
        Arc::new(store.items()),
        Arc::new(content.clone()),
        Arc::new(content.clone()),
        &NavigationSettings::default(),
    );
    TestApp {
        router: build_router(state),
        store,
        content,
        actor: Uuid::new_v4(),
    }
}

fn app() -> TestApp {
    app_with(MemoryStore::new())
}

impl TestApp {
    async fn call(&self, method: Method, uri: &str, body: Option<Value>, as_admin: bool) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if as_admin {
            builder = builder.header(ADMIN_ACTOR_HEADER, self.actor.to_string());
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, None, false).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(body), true).await
    }

    async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::PUT, uri, Some(body), true).await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::DELETE, uri, None, true).await
    }

    async fn create_menu(&self, name: &str, location: Option<&str>) -> i64 {
        let (status, body) = self
            .post("/api/v1/menus", json!({ "name": name, "location": location }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }

    async fn create_item(&self, menu_id: i64, title: &str, parent_id: Option<i64>) -> i64 {
        let (status, body) = self
            .post(
                &format!("/api/v1/menus/{menu_id}/items"),
                json!({ "title": title, "url": format!("/{}", title.to_lowercase()), "parent_id": parent_id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn health_and_readiness() {
    let app = app_with(MemoryStore::unprovisioned());
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "NOT_PROVISIONED");

    let (status, _) = app.get("/api/v1/menus").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    app.store.provision();
    let (status, body) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn mutations_require_an_admin_actor() {
    let app = app();
    let (status, body) = app
        .call(Method::POST, "/api/v1/menus", Some(json!({ "name": "Main" })), false)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/v1/menus/1")
        .header(ADMIN_ACTOR_HEADER, "not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn menu_crud_and_location_conflict() {
    let app = app();
    let main = app.create_menu("Main", Some("primary")).await;

    let (status, body) = app
        .post("/api/v1/menus", json!({ "name": "Alt", "location": "primary" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "LOCATION_TAKEN");
    assert_eq!(body["error"]["field"], "location");
    assert!(body["error"]["message"].as_str().unwrap().contains("\"Main\""));

    let (status, body) = app.post("/api/v1/menus", json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "name");

    let (status, body) = app.get(&format!("/api/v1/menus/{main}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "main");
    assert_eq!(body["data"]["created_by"], app.actor.to_string());

    let (status, body) = app
        .put(&format!("/api/v1/menus/{main}"), json!({ "name": "Header", "location": "" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "header");
    assert_eq!(body["data"]["location"], Value::Null);

    // The freed slot can be taken now.
    app.create_menu("Alt", Some("primary")).await;

    let (_, body) = app.get("/api/v1/menus").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = app.delete(&format!("/api/v1/menus/{main}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.get(&format!("/api/v1/menus/{main}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "MENU_NOT_FOUND");
}

#[tokio::test]
async fn malformed_bodies_use_the_error_envelope() {
    let app = app();

    let (status, body) = app
        .post("/api/v1/menus", json!({ "name": "Main", "location": 5 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "location");
    assert!(body["timestamp"].is_string());

    let (status, body) = app
        .put("/api/v1/menus/1/items/reorder", json!({ "items": "all" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "items");

    // not JSON at all
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/menus")
        .header(ADMIN_ACTOR_HEADER, app.actor.to_string())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/menus")
        .header(ADMIN_ACTOR_HEADER, app.actor.to_string())
        .body(Body::from(json!({ "name": "Main" }).to_string()))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);

    let (_, body) = app.get("/api/v1/menus").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn duplicate_names_get_numbered_slugs() {
    let app = app();
    let mut slugs = Vec::new();
    for _ in 0..3 {
        let id = app.create_menu("Main", None).await;
        let (_, body) = app.get(&format!("/api/v1/menus/{id}")).await;
        slugs.push(body["data"]["slug"].as_str().unwrap().to_string());
    }
    assert_eq!(slugs, vec!["main", "main-2", "main-3"]);
}

#[tokio::test]
async fn item_tree_reparenting_and_delete() {
    let app = app();
    let menu = app.create_menu("Main", None).await;
    let a = app.create_item(menu, "A", None).await;
    let b = app.create_item(menu, "B", Some(a)).await;
    let c = app.create_item(menu, "C", Some(b)).await;

    // A under its grandchild C is refused and lands at the root.
    let (status, body) = app
        .put(
            &format!("/api/v1/menus/{menu}/items/{a}"),
            json!({ "title": "A", "url": "/a", "parent_id": c }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["parent_id"], Value::Null);

    let (_, body) = app.get(&format!("/api/v1/menus/{menu}/parent-options?editing={b}")).await;
    let options: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_i64().unwrap())
        .collect();
    assert_eq!(options, vec![a]);

    let (_, body) = app.get(&format!("/api/v1/menus/{menu}/tree")).await;
    let depths: Vec<i64> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["depth"].as_i64().unwrap())
        .collect();
    assert_eq!(depths, vec![0, 1, 2]);

    let (status, _) = app.delete(&format!("/api/v1/menus/{menu}/items/{b}")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.get(&format!("/api/v1/menus/{menu}/items")).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["parent_id"].is_null()));

    let (status, _) = app.delete(&format!("/api/v1/menus/{menu}/items/{b}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_links_are_rejected_with_field_tags() {
    let app = app();
    let menu = app.create_menu("Main", None).await;
    let uri = format!("/api/v1/menus/{menu}/items");

    let (status, body) = app.post(&uri, json!({ "title": "Empty", "link_type": "custom" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_LINK");
    assert_eq!(body["error"]["field"], "url");

    let (status, body) = app
        .post(&uri, json!({ "title": "Gone", "link_type": "page", "link_reference": "99" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "link_reference");

    let (status, body) = app
        .post(&uri, json!({ "title": "Shop", "link_type": "product", "target": "_top" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["fields"].as_array().unwrap().len(), 2);

    let (status, body) = app
        .post(&uri, json!({ "title": "Login", "link_type": "route", "link_reference": "login", "target": "_blank" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["url"], "/login");
    assert_eq!(body["data"]["target"], "blank");
}

#[tokio::test]
async fn location_render_flags_stale_content() {
    let app = app();
    app.content.insert(ContentKind::Page, 5, "about", "About", true);
    let menu = app.create_menu("Main", Some("primary")).await;

    let (status, _) = app
        .post(
            &format!("/api/v1/menus/{menu}/items"),
            json!({ "title": "About", "link_type": "page", "link_reference": "5" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    app.content.set_published(ContentKind::Page, 5, false);
    let (status, body) = app.get("/api/v1/locations/primary").await;
    assert_eq!(status, StatusCode::OK);
    let item = &body["data"]["items"][0];
    assert_eq!(item["url"], "/about");
    assert_eq!(item["link"]["valid"], false);
    assert_eq!(item["link"]["reason"], "unpublished");

    let (status, _) = app.get("/api/v1/locations/footer").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reorder_endpoint() {
    let app = app();
    let menu = app.create_menu("Main", None).await;
    let a = app.create_item(menu, "A", None).await;
    let b = app.create_item(menu, "B", None).await;

    let (status, body) = app
        .put(
            &format!("/api/v1/menus/{menu}/items/reorder"),
            json!({ "items": [
                { "id": b, "parent_id": null, "sort_order": 0 },
                { "id": a, "parent_id": b, "sort_order": 0 },
                { "id": b, "parent_id": a, "sort_order": 0 }
            ] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let items = body["data"].as_array().unwrap();
    let parent_of = |id: i64| {
        items
            .iter()
            .find(|i| i["id"].as_i64() == Some(id))
            .map(|i| i["parent_id"].clone())
            .unwrap()
    };
    assert_eq!(parent_of(a), json!(b));
    assert_eq!(parent_of(b), Value::Null);

    let (status, _) = app
        .put(
            &format!("/api/v1/menus/{menu}/items/reorder"),
            json!({ "items": [{ "id": 999, "parent_id": null, "sort_order": 0 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quick_add_catalog() {
    let app = app();
    app.content.insert(ContentKind::Post, 1, "hello", "Hello", true);
    app.content.insert(ContentKind::Post, 2, "draft", "Draft", false);

    let (status, body) = app.get("/api/v1/catalog/post").await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["url"], "/blog/hello");

    let (status, body) = app.get("/api/v1/catalog/route").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "link_type");
}
