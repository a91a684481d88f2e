//! End-to-end API tests: the real router served on an ephemeral port,
//! driven with reqwest against a temporary data directory.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use tienda_core::core::factory;
use tienda_core::{AppState, Config};
use tienda_server::api::create_router;

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    // Held so the data directory outlives the server.
    _data_dir: tempfile::TempDir,
}

async fn spawn_server() -> TestServer {
    let data_dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.storage.data_dir = data_dir.path().to_path_buf();
    config.auth.token_secret = "integration-test-secret".to_string();
    // minimum bcrypt cost, to keep the tests fast
    config.auth.bcrypt_cost = 4;

    let state: Arc<AppState> = Arc::new(factory::create_app_state(config).await.unwrap());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        _data_dir: data_dir,
    }
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(&json!({"name": name, "email": email, "password": password}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.unwrap()
    }

    async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.unwrap()
    }

    async fn admin_token(&self) -> String {
        let body = self.login("admin@tienda.local", "admin").await;
        body["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_catalog_is_public() {
    let server = spawn_server().await;

    let products: Vec<Value> = server
        .client
        .get(server.url("/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!products.is_empty());

    let one = server
        .client
        .get(server.url("/products/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(one.status(), StatusCode::OK);

    let missing = server
        .client
        .get(server.url("/products/9999"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = missing.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("9999"));

    let categories: Vec<String> = server
        .client
        .get(server.url("/categories"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let mut sorted = categories.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(categories, sorted);
}

#[tokio::test]
async fn test_register_and_login_flow() {
    let server = spawn_server().await;

    let registered = server.register("Carla", "carla@example.com", "s3cret").await;
    assert_eq!(registered["user"]["role"], "customer");
    assert!(registered["user"].get("password").is_none());
    assert!(registered["user"].get("password_hash").is_none());
    assert!(registered["token"].as_str().is_some());

    // Duplicate email is always rejected.
    let duplicate = server
        .client
        .post(server.url("/auth/register"))
        .json(&json!({"name": "Other", "email": "carla@example.com", "password": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

    // Missing required fields are a validation error, same body shape.
    let invalid = server
        .client
        .post(server.url("/auth/register"))
        .json(&json!({"name": "", "email": "x@example.com", "password": "pw"}))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let body: Value = invalid.json().await.unwrap();
    assert!(body["error"].as_str().is_some());

    server.login("carla@example.com", "s3cret").await;

    // Unknown email and wrong password yield the identical message.
    let unknown = server
        .client
        .post(server.url("/auth/login"))
        .json(&json!({"email": "ghost@example.com", "password": "s3cret"}))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_body: Value = unknown.json().await.unwrap();

    let wrong = server
        .client
        .post(server.url("/auth/login"))
        .json(&json!({"email": "carla@example.com", "password": "nope"}))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong_body: Value = wrong.json().await.unwrap();

    assert_eq!(unknown_body["error"], wrong_body["error"]);
}

#[tokio::test]
async fn test_profile_requires_token() {
    let server = spawn_server().await;
    let registered = server.register("Nico", "nico@example.com", "pw123").await;
    let token = registered["token"].as_str().unwrap();

    // No header: 401. Unverifiable token: 403.
    let missing = server
        .client
        .get(server.url("/auth/profile"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = server
        .client
        .get(server.url("/auth/profile"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::FORBIDDEN);

    let profile: Value = server
        .client
        .get(server.url("/auth/profile"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["email"], "nico@example.com");

    let updated: Value = server
        .client
        .put(server.url("/auth/profile"))
        .bearer_auth(token)
        .json(&json!({"phone": "555-0100"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["user"]["phone"], "555-0100");
    assert_eq!(updated["user"]["name"], "Nico");
}

#[tokio::test]
async fn test_order_placement_flow() {
    let server = spawn_server().await;
    let registered = server.register("Ana", "ana@example.com", "pw123").await;
    let token = registered["token"].as_str().unwrap();

    let before: Value = server
        .client
        .get(server.url("/products/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let stock_before = before["stock"].as_u64().unwrap();
    let price = before["price"].as_f64().unwrap();

    let placed = server
        .client
        .post(server.url("/orders"))
        .bearer_auth(token)
        .json(&json!({"items": [{"id": 1, "quantity": 2}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(placed.status(), StatusCode::CREATED);
    let body: Value = placed.json().await.unwrap();
    let order = &body["order"];
    assert_eq!(order["userName"], "Ana");
    assert_eq!(order["total"].as_f64().unwrap(), price * 2.0);
    assert_eq!(order["items"].as_array().unwrap().len(), 1);
    assert_eq!(order["id"], order["items"][0]["id"]);

    let after: Value = server
        .client
        .get(server.url("/products/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after["stock"].as_u64().unwrap(), stock_before - 2);

    // Over-stock order: named product, nothing changes.
    let refused = server
        .client
        .post(server.url("/orders"))
        .bearer_auth(token)
        .json(&json!({"items": [{"id": 1, "quantity": 100000}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(refused.status(), StatusCode::BAD_REQUEST);
    let refused_body: Value = refused.json().await.unwrap();
    assert!(refused_body["error"]
        .as_str()
        .unwrap()
        .contains(before["name"].as_str().unwrap()));

    // Empty cart is rejected.
    let empty = server
        .client
        .post(server.url("/orders"))
        .bearer_auth(token)
        .json(&json!({"items": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    // Order history is enriched with the product name.
    let orders: Vec<Value> = server
        .client
        .get(server.url("/orders/my-orders"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["productName"], before["name"]);
    assert_eq!(orders[0]["quantity"], 2);
}

#[tokio::test]
async fn test_admin_surface() {
    let server = spawn_server().await;
    let admin_token = server.admin_token().await;
    let registered = server.register("Eva", "eva@example.com", "pw123").await;
    let customer_token = registered["token"].as_str().unwrap();
    let customer_id = registered["user"]["id"].as_u64().unwrap();

    // Customers are kept out with 403.
    let refused = server
        .client
        .get(server.url("/sales"))
        .bearer_auth(customer_token)
        .send()
        .await
        .unwrap();
    assert_eq!(refused.status(), StatusCode::FORBIDDEN);

    // Admin can change a price.
    let updated = server
        .client
        .put(server.url("/products/1"))
        .bearer_auth(&admin_token)
        .json(&json!({"price": 99.5}))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let updated_body: Value = updated.json().await.unwrap();
    assert_eq!(updated_body["product"]["price"].as_f64().unwrap(), 99.5);

    let customer_refused = server
        .client
        .put(server.url("/products/1"))
        .bearer_auth(customer_token)
        .json(&json!({"price": 1.0}))
        .send()
        .await
        .unwrap();
    assert_eq!(customer_refused.status(), StatusCode::FORBIDDEN);

    // Sales listing reflects orders as they happen.
    let sales: Vec<Value> = server
        .client
        .get(server.url("/sales"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(sales.is_empty());

    server
        .client
        .post(server.url("/orders"))
        .bearer_auth(customer_token)
        .json(&json!({"items": [{"id": 2, "quantity": 1}]}))
        .send()
        .await
        .unwrap();

    let sales: Vec<Value> = server
        .client
        .get(server.url("/sales"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0]["userId"].as_u64().unwrap(), customer_id);

    // A user with sales cannot be deleted; one without can.
    let refused = server
        .client
        .delete(server.url(&format!("/users/{customer_id}")))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(refused.status(), StatusCode::BAD_REQUEST);

    let fresh = server.register("Tom", "tom@example.com", "pw123").await;
    let fresh_id = fresh["user"]["id"].as_u64().unwrap();
    let deleted = server
        .client
        .delete(server.url(&format!("/users/{fresh_id}")))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    // And the deleted user's token no longer resolves to an account.
    let gone = server
        .client
        .get(server.url("/auth/profile"))
        .bearer_auth(fresh["token"].as_str().unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_root() {
    let server = spawn_server().await;

    let health = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let root: Value = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(root["name"], "tienda");
}
