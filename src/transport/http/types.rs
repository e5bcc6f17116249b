//! Request/response DTOs and the shared application state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::app::{AccountService, ContentService, MarketService};
use crate::auth::SessionStore;
use crate::infra::AppConfig;
use crate::storage::DataStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataStore>,
    pub accounts: Arc<AccountService>,
    pub content: Arc<ContentService>,
    pub market: Arc<MarketService>,
    pub sessions: SessionStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>, config: AppConfig) -> Self {
        let sessions = SessionStore::new();
        Self {
            accounts: Arc::new(AccountService::new(store.clone(), sessions.clone())),
            content: Arc::new(ContentService::new(store.clone())),
            market: Arc::new(MarketService::new(store.clone())),
            store,
            sessions,
            config: Arc::new(config),
        }
    }
}

/// The structured envelope every mutating endpoint answers with. List
/// endpoints return bare sequences instead.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}

/// `search`/`sort_by` query parameters shared by the word and song lists.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct ListQuery {
    pub search: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterUserRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginUserRequest {
    pub phone: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct AdminLoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Seller registration body; field names match the storefront client.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerRegisterRequest {
    pub full_name: Option<String>,
    pub shop_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub business_type: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SellerLoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    /// Defaults to `price` when omitted.
    pub original_price: Option<f64>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
}
