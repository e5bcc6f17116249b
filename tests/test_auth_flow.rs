//! End-to-end session lifecycle tests for all three identity classes.

mod common;

use common::spawn_app;
use serde_json::json;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn register_then_login_roundtrip() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/register"))
        .json(&json!({
            "name": "Alice",
            "phone": "+919000000001",
            "address": "Margherita",
            "password": "secret-pw",
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    // Registration auto-logs-in.
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    let response = app
        .client
        .post(app.url("/login"))
        .json(&json!({ "phone": "+919000000001", "password": "secret-pw" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["user"]["name"], json!("Alice"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn duplicate_phone_conflicts() {
    let app = spawn_app().await;

    let payload = json!({
        "name": "Alice",
        "phone": "+919000000002",
        "address": "Margherita",
        "password": "secret-pw",
    });
    let first = app
        .client
        .post(app.url("/register"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert!(first.status().is_success());

    let second = app
        .client
        .post(app.url("/register"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 409);
    let body: serde_json::Value = second.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Phone number already registered"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn wrong_password_is_unauthorized() {
    let app = spawn_app().await;

    app.client
        .post(app.url("/register"))
        .json(&json!({
            "name": "Alice",
            "phone": "+919000000003",
            "address": "Margherita",
            "password": "secret-pw",
        }))
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .post(app.url("/login"))
        .json(&json!({ "phone": "+919000000003", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    // Unknown phone fails the same way.
    let response = app
        .client
        .post(app.url("/login"))
        .json(&json!({ "phone": "+910000000000", "password": "secret-pw" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_fields_rejected() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/register"))
        .json(&json!({ "name": "Alice", "phone": "+919000000004" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], json!("Please fill all fields"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn form_encoded_register_works() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/register"))
        .form(&[
            ("name", "Bora"),
            ("phone", "+919000000005"),
            ("address", "Ledo"),
            ("password", "secret-pw"),
        ])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn logout_revokes_the_user_session() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/register"))
        .json(&json!({
            "name": "Alice",
            "phone": "+919000000006",
            "address": "Margherita",
            "password": "secret-pw",
        }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .client
        .get(app.url("/dashboard"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = app
        .client
        .get(app.url("/logout"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = app
        .client
        .get(app.url("/dashboard"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn admin_login_and_wrong_credentials() {
    let app = spawn_app().await;

    let token = app.admin_token().await;
    assert!(!token.is_empty());

    let response = app
        .client
        .post(app.url("/admin/login"))
        .json(&json!({ "username": "admin", "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = app
        .client
        .post(app.url("/admin/login"))
        .json(&json!({ "username": "root", "password": "admin123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn sessions_are_class_independent() {
    let app = spawn_app().await;

    // A user token must not pass the admin gate.
    let response = app
        .client
        .post(app.url("/register"))
        .json(&json!({
            "name": "Alice",
            "phone": "+919000000007",
            "address": "Margherita",
            "password": "secret-pw",
        }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    let user_token = body["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .client
        .post(app.url("/api/words"))
        .bearer_auth(&user_token)
        .json(&json!({
            "tai_khamyang": "မန်း",
            "english": "Water",
            "assamese": "পানী",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    // A seller token must not pass the admin gate either.
    let (_, seller_token) = app
        .seller_token("independent@example.com", "Independent Shop")
        .await;
    let response = app
        .client
        .delete(app.url("/api/words/some-id"))
        .bearer_auth(&seller_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    // And an admin token must not pass the seller gate.
    let admin_token = app.admin_token().await;
    let response = app
        .client
        .get(app.url("/api/seller/products"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}
