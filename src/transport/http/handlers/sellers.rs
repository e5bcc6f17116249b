//! Seller session lifecycle, JSON in/out.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;

use crate::app::SellerRegistration;
use crate::auth::Role;
use crate::domain::model::SellerProfile;
use crate::error::{AppError, AppResult};
use crate::transport::http::handlers::accounts::logout_role;
use crate::transport::http::types::{
    ApiResponse, AppState, SellerLoginRequest, SellerRegisterRequest,
};

#[utoipa::path(
    post,
    path = "/api/seller/register",
    request_body = SellerRegisterRequest,
    responses(
        (status = 200, description = "Seller registered", body = ApiResponse),
        (status = 400, description = "Missing fields", body = ApiResponse),
        (status = 409, description = "Email already registered", body = ApiResponse)
    )
)]
pub async fn seller_register_handler(
    State(state): State<AppState>,
    request: Result<Json<SellerRegisterRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse>> {
    let Json(request) =
        request.map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?;

    let registration = match (
        request.full_name,
        request.shop_name,
        request.email,
        request.password,
        request.phone,
        request.whatsapp,
    ) {
        (Some(full_name), Some(shop_name), Some(email), Some(password), Some(phone), Some(whatsapp))
            if !email.is_empty() && !password.is_empty() =>
        {
            SellerRegistration {
                full_name,
                business_name: shop_name,
                email,
                password,
                phone,
                whatsapp,
                address: request.address.unwrap_or_default(),
                business_type: request
                    .business_type
                    .unwrap_or_else(|| "retail".to_string()),
            }
        }
        _ => return Err(AppError::validation("Missing required fields")),
    };

    let seller = state.accounts.register_seller(registration).await?;
    Ok(Json(ApiResponse::ok(json!({
        "message": "Seller registered successfully",
        "seller_id": seller.id,
    }))))
}

#[utoipa::path(
    post,
    path = "/api/seller/login",
    request_body = SellerLoginRequest,
    responses(
        (status = 200, description = "Seller logged in", body = ApiResponse),
        (status = 401, description = "Invalid email or password", body = ApiResponse)
    )
)]
pub async fn seller_login_handler(
    State(state): State<AppState>,
    request: Result<Json<SellerLoginRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse>> {
    let Json(request) =
        request.map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?;
    let email = request
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::validation("Missing required fields"))?;
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("Missing required fields"))?;

    let (seller, token) = state.accounts.login_seller(&email, &password).await?;
    let profile = SellerProfile::from(&seller);
    Ok(Json(ApiResponse::ok(json!({
        "token": token,
        "seller": profile,
    }))))
}

#[utoipa::path(
    post,
    path = "/api/seller/logout",
    responses((status = 200, description = "Seller session revoked", body = ApiResponse))
)]
pub async fn seller_logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ApiResponse> {
    logout_role(&state, &headers, Role::Seller).await
}
