//! Marketplace endpoints, JSON-only.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;

use crate::auth::AuthContext;
use crate::domain::model::NewProduct;
use crate::error::{AppError, AppResult};
use crate::transport::http::types::{AddProductRequest, ApiResponse, AppState};

#[utoipa::path(
    post,
    path = "/api/products/add",
    request_body = AddProductRequest,
    responses(
        (status = 200, description = "Product added", body = ApiResponse),
        (status = 400, description = "Missing required fields", body = ApiResponse),
        (status = 401, description = "Seller session required", body = ApiResponse)
    )
)]
pub async fn add_product_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    request: Result<Json<AddProductRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse>> {
    ctx.require_seller()?;
    let Json(request) =
        request.map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?;

    let (name, description, category, price) = match (
        request.name,
        request.description,
        request.category,
        request.price,
    ) {
        (Some(name), Some(description), Some(category), Some(price)) if !name.is_empty() => {
            (name, description, category, price)
        }
        _ => return Err(AppError::validation("Missing required fields")),
    };

    let product = state
        .market
        .add_product(
            &ctx,
            NewProduct {
                name,
                description,
                category,
                price,
                original_price: request.original_price.unwrap_or(price),
                sizes: request.sizes,
                images: request.images,
                stock_quantity: request.stock_quantity.unwrap_or(0),
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(json!({
        "message": "Product added successfully",
        "id": product.id,
    }))))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses((status = 200, description = "Active products with seller contact details", body = ApiResponse))
)]
pub async fn get_products_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse>> {
    let products = state.market.list_products().await?;
    let products = serde_json::to_value(products).map_err(|e| AppError::Internal(e.into()))?;
    Ok(Json(ApiResponse::ok(json!({ "products": products }))))
}

#[utoipa::path(
    get,
    path = "/api/seller/products",
    responses(
        (status = 200, description = "The authenticated seller's products", body = ApiResponse),
        (status = 401, description = "Seller session required", body = ApiResponse)
    )
)]
pub async fn get_seller_products_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> AppResult<Json<ApiResponse>> {
    let products = state.market.seller_products(&ctx).await?;
    let products = serde_json::to_value(products).map_err(|e| AppError::Internal(e.into()))?;
    Ok(Json(ApiResponse::ok(json!({ "products": products }))))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse),
        (status = 401, description = "Not the owning seller", body = ApiResponse),
        (status = 404, description = "Unknown product id", body = ApiResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse>> {
    state.market.delete_product(&ctx, &id).await?;
    Ok(Json(ApiResponse::ok(
        json!({ "message": "Product deleted successfully" }),
    )))
}
