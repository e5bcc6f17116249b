//! Dictionary and song archive operations.
//!
//! Listing is public; every mutation runs through the admin gate on the
//! per-request [`AuthContext`] before touching the store.

use std::sync::Arc;

use crate::auth::AuthContext;
use crate::domain::model::{ContentQuery, Song, SongFields, Word, WordFields};
use crate::error::AppResult;
use crate::storage::DataStore;

pub struct ContentService {
    store: Arc<dyn DataStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn list_words(&self, query: ContentQuery) -> AppResult<Vec<Word>> {
        self.store.list_words(&query).await
    }

    pub async fn create_word(
        &self,
        ctx: &AuthContext,
        fields: WordFields,
        audio_path: Option<String>,
    ) -> AppResult<String> {
        ctx.require_admin()?;
        self.store.insert_word(fields, audio_path).await
    }

    pub async fn update_word(
        &self,
        ctx: &AuthContext,
        id: &str,
        fields: WordFields,
        audio_path: Option<String>,
    ) -> AppResult<()> {
        ctx.require_admin()?;
        self.store.update_word(id, fields, audio_path).await
    }

    pub async fn delete_word(&self, ctx: &AuthContext, id: &str) -> AppResult<()> {
        ctx.require_admin()?;
        self.store.delete_word(id).await
    }

    pub async fn list_songs(&self, query: ContentQuery) -> AppResult<Vec<Song>> {
        self.store.list_songs(&query).await
    }

    pub async fn create_song(
        &self,
        ctx: &AuthContext,
        fields: SongFields,
        file_path: Option<String>,
    ) -> AppResult<String> {
        ctx.require_admin()?;
        self.store.insert_song(fields, file_path).await
    }

    pub async fn update_song(
        &self,
        ctx: &AuthContext,
        id: &str,
        fields: SongFields,
        file_path: Option<String>,
    ) -> AppResult<()> {
        ctx.require_admin()?;
        self.store.update_song(id, fields, file_path).await
    }

    pub async fn delete_song(&self, ctx: &AuthContext, id: &str) -> AppResult<()> {
        ctx.require_admin()?;
        self.store.delete_song(id).await
    }
}
