//! Marketplace tests: seller registration, ownership-gated product CRUD,
//! and the seller-contact join on the public listing.

mod common;

use common::spawn_app;
use serde_json::json;

async fn add_product(app: &common::TestApp, token: &str, name: &str) -> String {
    let response = app
        .client
        .post(app.url("/api/products/add"))
        .bearer_auth(token)
        .json(&json!({
            "name": name,
            "description": "Handwoven scarf",
            "category": "textiles",
            "price": 20.5,
            "originalPrice": 25.0,
            "sizes": ["M", "L"],
            "images": ["scarf.jpg"],
            "stockQuantity": 3,
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn duplicate_seller_email_conflicts() {
    let app = spawn_app().await;

    let payload = json!({
        "fullName": "Nang",
        "shopName": "Weave Shop",
        "email": "dup@example.com",
        "password": "sellerpass",
        "phone": "+911111111",
        "whatsapp": "911111111",
    });
    let first = app
        .client
        .post(app.url("/api/seller/register"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert!(first.status().is_success());

    let second = app
        .client
        .post(app.url("/api/seller/register"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 409);
    let body: serde_json::Value = second.json().await.unwrap();
    assert_eq!(body["error"], json!("Seller with this email already exists"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn seller_login_rejects_bad_credentials() {
    let app = spawn_app().await;
    app.seller_token("login@example.com", "Login Shop").await;

    let response = app
        .client
        .post(app.url("/api/seller/login"))
        .json(&json!({ "email": "login@example.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], json!("Invalid email or password"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn add_product_requires_seller_session() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/products/add"))
        .json(&json!({
            "name": "Scarf",
            "description": "Handwoven",
            "category": "textiles",
            "price": 20.0,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], json!("Please login first"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn seller_id_is_stamped_from_the_session() {
    let app = spawn_app().await;
    let (seller_id, token) = app.seller_token("stamp@example.com", "Stamp Shop").await;

    // A spoofed seller_id in the body is ignored.
    let response = app
        .client
        .post(app.url("/api/products/add"))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Scarf",
            "description": "Handwoven",
            "category": "textiles",
            "price": 20.0,
            "seller_id": "someone-else",
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: serde_json::Value = app
        .client
        .get(app.url("/api/seller/products"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let products = body["data"]["products"].as_array().unwrap().clone();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["seller_id"], json!(seller_id));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn public_listing_joins_seller_contact() {
    let app = spawn_app().await;
    let (_, token) = app.seller_token("contact@example.com", "Contact Shop").await;
    add_product(&app, &token, "Scarf").await;

    let body: serde_json::Value = app
        .client
        .get(app.url("/api/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], json!(true));
    let products = body["data"]["products"].as_array().unwrap().clone();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], json!("Scarf"));
    assert_eq!(products[0]["status"], json!("active"));
    assert_eq!(
        products[0]["seller_info"]["business_name"],
        json!("Contact Shop")
    );
    assert_eq!(products[0]["seller_info"]["whatsapp"], json!("911111111"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn only_the_owner_may_delete() {
    let app = spawn_app().await;
    let (_, owner_token) = app.seller_token("owner@example.com", "Owner Shop").await;
    let (_, other_token) = app.seller_token("other@example.com", "Other Shop").await;

    let product_id = add_product(&app, &owner_token, "Scarf").await;

    // A different seller is rejected and the product stays listed.
    let response = app
        .client
        .delete(app.url(&format!("/api/products/{}", product_id)))
        .bearer_auth(&other_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let body: serde_json::Value = app
        .client
        .get(app.url("/api/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["products"].as_array().unwrap().len(), 1);

    // The owner succeeds and the listing empties.
    let response = app
        .client
        .delete(app.url(&format!("/api/products/{}", product_id)))
        .bearer_auth(&owner_token)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: serde_json::Value = app
        .client
        .get(app.url("/api/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"]["products"].as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn deleting_an_unknown_product_is_not_found() {
    let app = spawn_app().await;
    let (_, token) = app.seller_token("missing@example.com", "Missing Shop").await;

    let response = app
        .client
        .delete(app.url("/api/products/no-such-id"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], json!("Product not found"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn product_defaults_apply() {
    let app = spawn_app().await;
    let (_, token) = app.seller_token("defaults@example.com", "Defaults Shop").await;

    let response = app
        .client
        .post(app.url("/api/products/add"))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Basket",
            "description": "Bamboo basket",
            "category": "crafts",
            "price": 12.0,
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: serde_json::Value = app
        .client
        .get(app.url("/api/seller/products"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let products = body["data"]["products"].as_array().unwrap().clone();
    assert_eq!(products[0]["original_price"], json!(12.0));
    assert_eq!(products[0]["stock_quantity"], json!(0));
    assert_eq!(products[0]["sizes"], json!([]));
    assert_eq!(products[0]["images"], json!([]));
}
