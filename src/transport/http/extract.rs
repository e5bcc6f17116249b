//! Custom extractors: the per-request auth context and the normalized body
//! parsers that decouple transport format from the handlers.

use std::collections::HashMap;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::auth::AuthContext;
use crate::domain::model::{SongFields, WordFields};
use crate::error::AppError;
use crate::transport::http::types::AppState;

/// Pulls the bearer token out of the Authorization header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// Resolves the bearer token against the session store. A missing or
/// unknown token yields an anonymous context; the gate checks decide
/// whether that is acceptable per route.
#[async_trait]
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(&parts.headers) {
            Some(token) => Ok(state
                .sessions
                .resolve(&token)
                .await
                .map(AuthContext::authenticated)
                .unwrap_or_default()),
            None => Ok(AuthContext::anonymous()),
        }
    }
}

/// Accepts either a JSON or an urlencoded-form body and deserializes both
/// into the same struct, so browser form posts and API clients hit one
/// code path.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if content_type(req.headers()).starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(format!("Invalid form body: {e}")))?;
            Ok(Self(value))
        }
    }
}

pub struct AudioUpload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Normalized word/song mutation body: a flat map of text fields plus an
/// optional audio upload, parsed from either JSON or multipart form data.
pub struct ContentPayload {
    pub fields: HashMap<String, String>,
    pub audio: Option<AudioUpload>,
}

#[async_trait]
impl<S> FromRequest<S> for ContentPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(req.headers());
        if content_type.starts_with("application/json") {
            let Json(object) = Json::<serde_json::Map<String, JsonValue>>::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?;
            let mut fields = HashMap::new();
            for (key, value) in object {
                match value {
                    JsonValue::String(s) => {
                        fields.insert(key, s);
                    }
                    JsonValue::Null => {}
                    other => {
                        fields.insert(key, other.to_string());
                    }
                }
            }
            Ok(Self {
                fields,
                audio: None,
            })
        } else if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?;
            let mut fields = HashMap::new();
            let mut audio = None;
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::validation(format!("Invalid multipart field: {e}")))?
            {
                let name = field.name().unwrap_or_default().to_string();
                let filename = field.file_name().map(|f| f.to_string());
                if name == "audio" {
                    match filename {
                        Some(filename) if !filename.is_empty() => {
                            let bytes = field.bytes().await.map_err(|e| {
                                AppError::validation(format!("Failed to read audio upload: {e}"))
                            })?;
                            audio = Some(AudioUpload { filename, bytes });
                        }
                        // An empty file input posts an empty part; ignore it.
                        _ => {}
                    }
                } else {
                    let value = field.text().await.map_err(|e| {
                        AppError::validation(format!("Invalid multipart field: {e}"))
                    })?;
                    fields.insert(name, value);
                }
            }
            Ok(Self { fields, audio })
        } else {
            Err(AppError::validation(
                "expected a JSON or multipart/form-data body",
            ))
        }
    }
}

impl ContentPayload {
    fn field(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// All three dictionary fields are required.
    pub fn word_fields(&self) -> Result<WordFields, AppError> {
        match (
            self.field("tai_khamyang"),
            self.field("english"),
            self.field("assamese"),
        ) {
            (Some(tai_khamyang), Some(english), Some(assamese)) => Ok(WordFields {
                tai_khamyang,
                english,
                assamese,
            }),
            _ => Err(AppError::validation("Missing required fields")),
        }
    }

    /// Title is required; description is optional.
    pub fn song_fields(&self) -> Result<SongFields, AppError> {
        let title = self
            .field("title")
            .ok_or_else(|| AppError::validation("Title is required"))?;
        Ok(SongFields {
            title,
            description: self.field("description"),
        })
    }
}

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase()
}
