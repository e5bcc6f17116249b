//! The storage interface both backends implement.
//!
//! Callers (the service layer) depend only on this trait; the SQLite and
//! in-memory document backends are interchangeable behind it. The stores
//! are pure CRUD: session-gate and ownership checks live a layer above,
//! uniqueness of login keys lives here because the store owns the data.

use async_trait::async_trait;

use crate::domain::model::{
    AdminAccount, ContentQuery, NewProduct, NewSeller, NewUser, Product, ProductWithSeller,
    Seller, Song, SongFields, User, Word, WordFields,
};
use crate::error::AppResult;

#[async_trait]
pub trait DataStore: Send + Sync {
    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> AppResult<()>;

    // --- Credential store ---

    /// Persists a new user. Fails with `Conflict` when the phone is taken.
    async fn create_user(&self, new: NewUser) -> AppResult<User>;
    async fn find_user_by_phone(&self, phone: &str) -> AppResult<Option<User>>;

    /// Persists a new seller. Fails with `Conflict` when the email is taken.
    async fn create_seller(&self, new: NewSeller) -> AppResult<Seller>;
    async fn find_seller_by_email(&self, email: &str) -> AppResult<Option<Seller>>;
    async fn get_seller(&self, id: &str) -> AppResult<Option<Seller>>;
    async fn has_sellers(&self) -> AppResult<bool>;

    async fn admin_account(&self) -> AppResult<Option<AdminAccount>>;
    /// Creates the admin account only if none exists (idempotent bootstrap).
    async fn seed_admin(&self, account: AdminAccount) -> AppResult<()>;

    // --- Content store ---

    async fn list_words(&self, query: &ContentQuery) -> AppResult<Vec<Word>>;
    async fn insert_word(&self, fields: WordFields, audio_path: Option<String>)
        -> AppResult<String>;
    /// Replaces the text fields; the audio reference is replaced only when
    /// `audio_path` is `Some`, otherwise preserved. `NotFound` on unknown id.
    async fn update_word(
        &self,
        id: &str,
        fields: WordFields,
        audio_path: Option<String>,
    ) -> AppResult<()>;
    /// Deleting an unknown id is a success no-op.
    async fn delete_word(&self, id: &str) -> AppResult<()>;

    async fn list_songs(&self, query: &ContentQuery) -> AppResult<Vec<Song>>;
    async fn insert_song(&self, fields: SongFields, file_path: Option<String>)
        -> AppResult<String>;
    async fn update_song(
        &self,
        id: &str,
        fields: SongFields,
        file_path: Option<String>,
    ) -> AppResult<()>;
    async fn delete_song(&self, id: &str) -> AppResult<()>;

    // --- Marketplace store ---

    async fn insert_product(&self, seller_id: &str, new: NewProduct) -> AppResult<Product>;
    /// Active products joined with the owning seller's public contact details.
    async fn list_active_products(&self) -> AppResult<Vec<ProductWithSeller>>;
    async fn list_seller_products(&self, seller_id: &str) -> AppResult<Vec<Product>>;
    async fn get_product(&self, id: &str) -> AppResult<Option<Product>>;
    async fn delete_product(&self, id: &str) -> AppResult<()>;
}
