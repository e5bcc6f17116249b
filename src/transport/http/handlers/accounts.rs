//! User and admin session lifecycle handlers.
//!
//! The credential routes accept JSON or urlencoded-form bodies through
//! [`JsonOrForm`]; a successful login answers with the session token the
//! client passes back as `Authorization: Bearer <token>`.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;

use crate::auth::{AuthContext, Role};
use crate::error::{AppError, AppResult};
use crate::transport::http::extract::{bearer_token, JsonOrForm};
use crate::transport::http::types::{
    AdminLoginRequest, ApiResponse, AppState, LoginUserRequest, RegisterUserRequest,
};

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "Registered and logged in", body = ApiResponse),
        (status = 400, description = "Missing fields", body = ApiResponse),
        (status = 409, description = "Phone already registered", body = ApiResponse)
    )
)]
pub async fn register_user_handler(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<RegisterUserRequest>,
) -> AppResult<Json<ApiResponse>> {
    let (name, phone, address, password) = match (
        request.name,
        request.phone,
        request.address,
        request.password,
    ) {
        (Some(n), Some(p), Some(a), Some(pw))
            if !n.is_empty() && !p.is_empty() && !a.is_empty() && !pw.is_empty() =>
        {
            (n, p, a, pw)
        }
        _ => return Err(AppError::validation("Please fill all fields")),
    };

    let (user, token) = state
        .accounts
        .register_user(&name, &phone, &address, &password)
        .await?;
    Ok(Json(ApiResponse::ok(json!({
        "token": token,
        "user": { "id": user.id, "name": user.name },
    }))))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginUserRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse),
        (status = 401, description = "Invalid credentials", body = ApiResponse)
    )
)]
pub async fn login_user_handler(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<LoginUserRequest>,
) -> AppResult<Json<ApiResponse>> {
    let phone = request
        .phone
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("Please fill all fields"))?;
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("Please fill all fields"))?;

    let (user, token) = state.accounts.login_user(&phone, &password).await?;
    Ok(Json(ApiResponse::ok(json!({
        "token": token,
        "user": { "id": user.id, "name": user.name },
    }))))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "The authenticated user's session profile", body = ApiResponse),
        (status = 401, description = "User session required", body = ApiResponse)
    )
)]
pub async fn dashboard_handler(ctx: AuthContext) -> AppResult<Json<ApiResponse>> {
    let user_id = ctx.require_user()?.to_string();
    let name = ctx
        .identity
        .as_ref()
        .map(|identity| identity.display_name.clone())
        .unwrap_or_default();
    Ok(Json(ApiResponse::ok(json!({
        "user": { "id": user_id, "name": name },
    }))))
}

#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 200, description = "User session revoked", body = ApiResponse))
)]
pub async fn logout_user_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ApiResponse> {
    logout_role(&state, &headers, Role::User).await
}

#[utoipa::path(
    post,
    path = "/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin logged in", body = ApiResponse),
        (status = 401, description = "Invalid credentials", body = ApiResponse),
        (status = 404, description = "Admin account not seeded", body = ApiResponse)
    )
)]
pub async fn admin_login_handler(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<AdminLoginRequest>,
) -> AppResult<Json<ApiResponse>> {
    let username = request
        .username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::validation("Please fill all fields"))?;
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("Please fill all fields"))?;

    let token = state.accounts.login_admin(&username, &password).await?;
    Ok(Json(ApiResponse::ok(json!({ "token": token }))))
}

#[utoipa::path(
    get,
    path = "/admin/logout",
    responses((status = 200, description = "Admin session revoked", body = ApiResponse))
)]
pub async fn admin_logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ApiResponse> {
    logout_role(&state, &headers, Role::Admin).await
}

/// Revokes the presented token only when it belongs to the expected
/// identity class, so `GET /logout` cannot tear down an admin session.
/// Always answers success; logout is idempotent.
pub async fn logout_role(state: &AppState, headers: &HeaderMap, role: Role) -> Json<ApiResponse> {
    if let Some(token) = bearer_token(headers) {
        if let Some(identity) = state.sessions.resolve(&token).await {
            if identity.role == role {
                state.accounts.logout(&token).await;
            }
        }
    }
    Json(ApiResponse::ok(json!({ "message": "You have been logged out" })))
}
