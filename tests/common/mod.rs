//! Shared test harness: starts the API in-process against the in-memory
//! document backend on an ephemeral port, the same way the server binary
//! wires things up.

use std::sync::Arc;

use khamyang_community::app::bootstrap;
use khamyang_community::{transport, AppConfig, DataStore, MemoryStore, StoreBackend};
use tempfile::TempDir;

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    _upload_dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let upload_dir = tempfile::tempdir().expect("create temp upload dir");
    let config = AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        database_url: "sqlite://unused.db".to_string(),
        store_backend: StoreBackend::Memory,
        upload_dir: upload_dir.path().to_path_buf(),
        admin_username: "admin".to_string(),
        admin_password: "admin123".to_string(),
    };

    let store: Arc<dyn DataStore> = Arc::new(MemoryStore::new());
    bootstrap::run(store.as_ref(), &config)
        .await
        .expect("bootstrap");

    let app_state = transport::http::AppState::new(store, config);
    let router = transport::http::create_router(app_state);

    // Bind to an ephemeral port to avoid conflicts between parallel tests.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        _upload_dir: upload_dir,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Logs in as the seeded admin and returns the session token.
    pub async fn admin_token(&self) -> String {
        let response = self
            .client
            .post(self.url("/admin/login"))
            .json(&serde_json::json!({ "username": "admin", "password": "admin123" }))
            .send()
            .await
            .expect("admin login request");
        assert!(response.status().is_success());
        let body: serde_json::Value = response.json().await.expect("admin login body");
        body["data"]["token"]
            .as_str()
            .expect("admin token in response")
            .to_string()
    }

    /// Registers and logs in a seller, returning `(seller_id, token)`.
    pub async fn seller_token(&self, email: &str, shop_name: &str) -> (String, String) {
        let response = self
            .client
            .post(self.url("/api/seller/register"))
            .json(&serde_json::json!({
                "fullName": "Test Seller",
                "shopName": shop_name,
                "email": email,
                "password": "sellerpass",
                "phone": "+911111111",
                "whatsapp": "911111111",
            }))
            .send()
            .await
            .expect("seller register request");
        assert!(response.status().is_success());

        let response = self
            .client
            .post(self.url("/api/seller/login"))
            .json(&serde_json::json!({ "email": email, "password": "sellerpass" }))
            .send()
            .await
            .expect("seller login request");
        assert!(response.status().is_success());
        let body: serde_json::Value = response.json().await.expect("seller login body");
        let seller_id = body["data"]["seller"]["id"]
            .as_str()
            .expect("seller id in response")
            .to_string();
        let token = body["data"]["token"]
            .as_str()
            .expect("seller token in response")
            .to_string();
        (seller_id, token)
    }
}
