//! Dictionary endpoints. Listing is public; mutations are admin-gated and
//! accept JSON or multipart bodies (multipart carries the optional audio).

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::json;

use crate::auth::AuthContext;
use crate::domain::model::{ContentQuery, Word};
use crate::error::AppResult;
use crate::infra::uploads::save_audio;
use crate::transport::http::extract::ContentPayload;
use crate::transport::http::types::{ApiResponse, AppState, ListQuery};

#[utoipa::path(
    get,
    path = "/api/words",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring over all three text fields"),
        ("sort_by" = Option<String>, Query, description = "tai_khamyang (default), english or assamese")
    ),
    responses((status = 200, description = "Matching words", body = Vec<Word>))
)]
pub async fn get_words_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Word>>> {
    let words = state
        .content
        .list_words(ContentQuery {
            search: query.search,
            sort_by: query.sort_by,
        })
        .await?;
    Ok(Json(words))
}

#[utoipa::path(
    post,
    path = "/api/words",
    responses(
        (status = 200, description = "Word created", body = ApiResponse),
        (status = 400, description = "Missing required fields", body = ApiResponse),
        (status = 401, description = "Admin session required", body = ApiResponse)
    )
)]
pub async fn add_word_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    payload: ContentPayload,
) -> AppResult<Json<ApiResponse>> {
    ctx.require_admin()?;
    let fields = payload.word_fields()?;
    let audio_path = match payload.audio {
        Some(upload) => {
            Some(save_audio(&state.config.upload_dir, &upload.filename, upload.bytes).await?)
        }
        None => None,
    };
    let id = state.content.create_word(&ctx, fields, audio_path).await?;
    Ok(Json(ApiResponse::ok(json!({ "id": id }))))
}

#[utoipa::path(
    put,
    path = "/api/words/{id}",
    params(("id" = String, Path, description = "Word id")),
    responses(
        (status = 200, description = "Word updated", body = ApiResponse),
        (status = 400, description = "Missing required fields", body = ApiResponse),
        (status = 401, description = "Admin session required", body = ApiResponse),
        (status = 404, description = "Unknown word id", body = ApiResponse)
    )
)]
pub async fn update_word_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
    payload: ContentPayload,
) -> AppResult<Json<ApiResponse>> {
    ctx.require_admin()?;
    let fields = payload.word_fields()?;
    let audio_path = match payload.audio {
        Some(upload) => {
            Some(save_audio(&state.config.upload_dir, &upload.filename, upload.bytes).await?)
        }
        None => None,
    };
    state
        .content
        .update_word(&ctx, &id, fields, audio_path)
        .await?;
    Ok(Json(ApiResponse::ok(
        json!({ "message": "Word updated successfully" }),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/words/{id}",
    params(("id" = String, Path, description = "Word id")),
    responses(
        (status = 200, description = "Word deleted (no-op for unknown ids)", body = ApiResponse),
        (status = 401, description = "Admin session required", body = ApiResponse)
    )
)]
pub async fn delete_word_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse>> {
    ctx.require_admin()?;
    state.content.delete_word(&ctx, &id).await?;
    Ok(Json(ApiResponse::ok_empty()))
}
