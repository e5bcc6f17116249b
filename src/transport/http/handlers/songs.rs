//! Song archive endpoints; same shape as the dictionary, title-only
//! validation.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::json;

use crate::auth::AuthContext;
use crate::domain::model::{ContentQuery, Song};
use crate::error::AppResult;
use crate::infra::uploads::save_audio;
use crate::transport::http::extract::ContentPayload;
use crate::transport::http::types::{ApiResponse, AppState, ListQuery};

#[utoipa::path(
    get,
    path = "/api/songs",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring over title and description"),
        ("sort_by" = Option<String>, Query, description = "title (default) or description")
    ),
    responses((status = 200, description = "Matching songs", body = Vec<Song>))
)]
pub async fn get_songs_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Song>>> {
    let songs = state
        .content
        .list_songs(ContentQuery {
            search: query.search,
            sort_by: query.sort_by,
        })
        .await?;
    Ok(Json(songs))
}

#[utoipa::path(
    post,
    path = "/api/songs",
    responses(
        (status = 200, description = "Song created", body = ApiResponse),
        (status = 400, description = "Title is required", body = ApiResponse),
        (status = 401, description = "Admin session required", body = ApiResponse)
    )
)]
pub async fn add_song_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    payload: ContentPayload,
) -> AppResult<Json<ApiResponse>> {
    ctx.require_admin()?;
    let fields = payload.song_fields()?;
    let file_path = match payload.audio {
        Some(upload) => {
            Some(save_audio(&state.config.upload_dir, &upload.filename, upload.bytes).await?)
        }
        None => None,
    };
    let id = state.content.create_song(&ctx, fields, file_path).await?;
    Ok(Json(ApiResponse::ok(json!({ "id": id }))))
}

#[utoipa::path(
    put,
    path = "/api/songs/{id}",
    params(("id" = String, Path, description = "Song id")),
    responses(
        (status = 200, description = "Song updated", body = ApiResponse),
        (status = 400, description = "Title is required", body = ApiResponse),
        (status = 401, description = "Admin session required", body = ApiResponse),
        (status = 404, description = "Unknown song id", body = ApiResponse)
    )
)]
pub async fn update_song_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
    payload: ContentPayload,
) -> AppResult<Json<ApiResponse>> {
    ctx.require_admin()?;
    let fields = payload.song_fields()?;
    let file_path = match payload.audio {
        Some(upload) => {
            Some(save_audio(&state.config.upload_dir, &upload.filename, upload.bytes).await?)
        }
        None => None,
    };
    state
        .content
        .update_song(&ctx, &id, fields, file_path)
        .await?;
    Ok(Json(ApiResponse::ok(
        json!({ "message": "Song updated successfully" }),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/songs/{id}",
    params(("id" = String, Path, description = "Song id")),
    responses(
        (status = 200, description = "Song deleted (no-op for unknown ids)", body = ApiResponse),
        (status = 401, description = "Admin session required", body = ApiResponse)
    )
)]
pub async fn delete_song_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse>> {
    ctx.require_admin()?;
    state.content.delete_song(&ctx, &id).await?;
    Ok(Json(ApiResponse::ok_empty()))
}
