//! Marketplace entities: products and the seller contact details that get
//! joined onto public listings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub const PRODUCT_STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Product {
    pub id: String,
    /// Owning seller; stamped from the session at creation, never from input.
    pub seller_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub original_price: f64,
    pub sizes: Vec<String>,
    pub images: Vec<String>,
    pub stock_quantity: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated product fields; `original_price` has already defaulted to
/// `price` when the client omitted it.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub original_price: f64,
    pub sizes: Vec<String>,
    pub images: Vec<String>,
    pub stock_quantity: i64,
}

/// The owning seller's public contact details, attached to each product in
/// the public listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SellerContact {
    pub business_name: String,
    pub phone: String,
    pub whatsapp: String,
}

/// A product enriched with its seller's contact details. Products whose
/// seller record has vanished are listed without the enrichment.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductWithSeller {
    #[serde(flatten)]
    pub product: Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_info: Option<SellerContact>,
}
