//! Marketplace operations.
//!
//! `seller_id` always comes from the authenticated session, never from the
//! request body, so a seller cannot create or delete products on another
//! seller's behalf.

use std::sync::Arc;

use crate::auth::AuthContext;
use crate::domain::model::{NewProduct, Product, ProductWithSeller};
use crate::error::{AppError, AppResult};
use crate::storage::DataStore;

pub struct MarketService {
    store: Arc<dyn DataStore>,
}

impl MarketService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn add_product(&self, ctx: &AuthContext, new: NewProduct) -> AppResult<Product> {
        let seller_id = ctx.require_seller()?;
        self.store.insert_product(seller_id, new).await
    }

    /// Public listing of active products with seller contact details.
    pub async fn list_products(&self) -> AppResult<Vec<ProductWithSeller>> {
        self.store.list_active_products().await
    }

    pub async fn seller_products(&self, ctx: &AuthContext) -> AppResult<Vec<Product>> {
        let seller_id = ctx.require_seller()?;
        self.store.list_seller_products(seller_id).await
    }

    /// Ownership-checked delete: `NotFound` when the product is absent,
    /// `Unauthorized` when it belongs to another seller.
    pub async fn delete_product(&self, ctx: &AuthContext, product_id: &str) -> AppResult<()> {
        let seller_id = ctx.require_seller()?;
        let product = self
            .store
            .get_product(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
        if product.seller_id != seller_id {
            return Err(AppError::unauthorized("Unauthorized"));
        }
        self.store.delete_product(&product.id).await
    }
}
