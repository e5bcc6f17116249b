//! In-process document-store backend.
//!
//! Keyed maps of UUID-identified documents behind a `tokio::sync::RwLock`,
//! mirroring the document-database shape of the deployment this service
//! replaces. Also the backend the integration tests run against.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::model::content::{
    matches_search, resolve_sort_field, SONG_SORT_FIELDS, WORD_SORT_FIELDS,
};
use crate::domain::model::market::PRODUCT_STATUS_ACTIVE;
use crate::domain::model::{
    AdminAccount, ContentQuery, NewProduct, NewSeller, NewUser, Product, ProductWithSeller,
    Seller, SellerContact, Song, SongFields, User, Word, WordFields,
};
use crate::error::{AppError, AppResult};
use crate::storage::DataStore;

#[derive(Default)]
struct Collections {
    users: HashMap<String, User>,
    sellers: HashMap<String, Seller>,
    admin: Option<AdminAccount>,
    words: HashMap<String, Word>,
    songs: HashMap<String, Song>,
    products: HashMap<String, Product>,
}

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn create_user(&self, new: NewUser) -> AppResult<User> {
        let mut state = self.collections.write().await;
        if state.users.values().any(|u| u.phone == new.phone) {
            return Err(AppError::Conflict(
                "Phone number already registered".to_string(),
            ));
        }
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            phone: new.phone,
            address: new.address,
            password_hash: new.password_hash,
            registered_at: Utc::now(),
        };
        state.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_user_by_phone(&self, phone: &str) -> AppResult<Option<User>> {
        let state = self.collections.read().await;
        Ok(state.users.values().find(|u| u.phone == phone).cloned())
    }

    async fn create_seller(&self, new: NewSeller) -> AppResult<Seller> {
        let mut state = self.collections.write().await;
        if state.sellers.values().any(|s| s.email == new.email) {
            return Err(AppError::Conflict(
                "Seller with this email already exists".to_string(),
            ));
        }
        let seller = Seller {
            id: Uuid::new_v4().to_string(),
            full_name: new.full_name,
            business_name: new.business_name,
            email: new.email,
            password_hash: new.password_hash,
            phone: new.phone,
            whatsapp: new.whatsapp,
            address: new.address,
            business_type: new.business_type,
            status: "active".to_string(),
            created_at: Utc::now(),
        };
        state.sellers.insert(seller.id.clone(), seller.clone());
        Ok(seller)
    }

    async fn find_seller_by_email(&self, email: &str) -> AppResult<Option<Seller>> {
        let state = self.collections.read().await;
        Ok(state.sellers.values().find(|s| s.email == email).cloned())
    }

    async fn get_seller(&self, id: &str) -> AppResult<Option<Seller>> {
        Ok(self.collections.read().await.sellers.get(id).cloned())
    }

    async fn has_sellers(&self) -> AppResult<bool> {
        Ok(!self.collections.read().await.sellers.is_empty())
    }

    async fn admin_account(&self) -> AppResult<Option<AdminAccount>> {
        Ok(self.collections.read().await.admin.clone())
    }

    async fn seed_admin(&self, account: AdminAccount) -> AppResult<()> {
        let mut state = self.collections.write().await;
        if state.admin.is_none() {
            state.admin = Some(account);
        }
        Ok(())
    }

    async fn list_words(&self, query: &ContentQuery) -> AppResult<Vec<Word>> {
        let state = self.collections.read().await;
        let term = query.search.as_deref().unwrap_or("");
        let sort = resolve_sort_field(query.sort_by.as_deref(), WORD_SORT_FIELDS);
        let mut words: Vec<Word> = state
            .words
            .values()
            .filter(|w| matches_search(&w.searchable_fields(), term))
            .cloned()
            .collect();
        words.sort_by_key(|w| w.sort_key(sort));
        Ok(words)
    }

    async fn insert_word(
        &self,
        fields: WordFields,
        audio_path: Option<String>,
    ) -> AppResult<String> {
        let mut state = self.collections.write().await;
        let word = Word {
            id: Uuid::new_v4().to_string(),
            tai_khamyang: fields.tai_khamyang,
            english: fields.english,
            assamese: fields.assamese,
            audio_path,
        };
        let id = word.id.clone();
        state.words.insert(id.clone(), word);
        Ok(id)
    }

    async fn update_word(
        &self,
        id: &str,
        fields: WordFields,
        audio_path: Option<String>,
    ) -> AppResult<()> {
        let mut state = self.collections.write().await;
        let word = state
            .words
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Word not found".to_string()))?;
        word.tai_khamyang = fields.tai_khamyang;
        word.english = fields.english;
        word.assamese = fields.assamese;
        if audio_path.is_some() {
            word.audio_path = audio_path;
        }
        Ok(())
    }

    async fn delete_word(&self, id: &str) -> AppResult<()> {
        self.collections.write().await.words.remove(id);
        Ok(())
    }

    async fn list_songs(&self, query: &ContentQuery) -> AppResult<Vec<Song>> {
        let state = self.collections.read().await;
        let term = query.search.as_deref().unwrap_or("");
        let sort = resolve_sort_field(query.sort_by.as_deref(), SONG_SORT_FIELDS);
        let mut songs: Vec<Song> = state
            .songs
            .values()
            .filter(|s| matches_search(&s.searchable_fields(), term))
            .cloned()
            .collect();
        songs.sort_by_key(|s| s.sort_key(sort));
        Ok(songs)
    }

    async fn insert_song(
        &self,
        fields: SongFields,
        file_path: Option<String>,
    ) -> AppResult<String> {
        let mut state = self.collections.write().await;
        let song = Song {
            id: Uuid::new_v4().to_string(),
            title: fields.title,
            description: fields.description,
            file_path,
        };
        let id = song.id.clone();
        state.songs.insert(id.clone(), song);
        Ok(id)
    }

    async fn update_song(
        &self,
        id: &str,
        fields: SongFields,
        file_path: Option<String>,
    ) -> AppResult<()> {
        let mut state = self.collections.write().await;
        let song = state
            .songs
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Song not found".to_string()))?;
        song.title = fields.title;
        song.description = fields.description;
        if file_path.is_some() {
            song.file_path = file_path;
        }
        Ok(())
    }

    async fn delete_song(&self, id: &str) -> AppResult<()> {
        self.collections.write().await.songs.remove(id);
        Ok(())
    }

    async fn insert_product(&self, seller_id: &str, new: NewProduct) -> AppResult<Product> {
        let mut state = self.collections.write().await;
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            seller_id: seller_id.to_string(),
            name: new.name,
            description: new.description,
            category: new.category,
            price: new.price,
            original_price: new.original_price,
            sizes: new.sizes,
            images: new.images,
            stock_quantity: new.stock_quantity,
            status: PRODUCT_STATUS_ACTIVE.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn list_active_products(&self) -> AppResult<Vec<ProductWithSeller>> {
        let state = self.collections.read().await;
        let mut listed: Vec<ProductWithSeller> = state
            .products
            .values()
            .filter(|p| p.status == PRODUCT_STATUS_ACTIVE)
            .map(|p| ProductWithSeller {
                product: p.clone(),
                seller_info: state.sellers.get(&p.seller_id).map(|s| SellerContact {
                    business_name: s.business_name.clone(),
                    phone: s.phone.clone(),
                    whatsapp: s.whatsapp.clone(),
                }),
            })
            .collect();
        listed.sort_by(|a, b| a.product.created_at.cmp(&b.product.created_at));
        Ok(listed)
    }

    async fn list_seller_products(&self, seller_id: &str) -> AppResult<Vec<Product>> {
        let state = self.collections.read().await;
        let mut products: Vec<Product> = state
            .products
            .values()
            .filter(|p| p.seller_id == seller_id)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(products)
    }

    async fn get_product(&self, id: &str) -> AppResult<Option<Product>> {
        Ok(self.collections.read().await.products.get(id).cloned())
    }

    async fn delete_product(&self, id: &str) -> AppResult<()> {
        self.collections.write().await.products.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_fields(t: &str, e: &str, a: &str) -> WordFields {
        WordFields {
            tai_khamyang: t.to_string(),
            english: e.to_string(),
            assamese: a.to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_phone_conflicts() {
        let store = MemoryStore::new();
        let new = NewUser {
            name: "Alice".into(),
            phone: "+911234".into(),
            address: "Somewhere".into(),
            password_hash: "$argon2id$fake".into(),
        };
        store.create_user(new.clone()).await.unwrap();
        let err = store.create_user(new).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn word_search_and_sort_fallback() {
        let store = MemoryStore::new();
        store
            .insert_word(word_fields("မန်း", "Water", "পানী"), None)
            .await
            .unwrap();
        store
            .insert_word(word_fields("ကမ်", "Gold", "সোণ"), None)
            .await
            .unwrap();

        let hits = store
            .list_words(&ContentQuery {
                search: Some("water".into()),
                sort_by: None,
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].english, "Water");

        let none = store
            .list_words(&ContentQuery {
                search: Some("fire".into()),
                sort_by: None,
            })
            .await
            .unwrap();
        assert!(none.is_empty());

        // Unrecognized sort field falls back to the default deterministically.
        let all = store
            .list_words(&ContentQuery {
                search: None,
                sort_by: Some("drop table".into()),
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].tai_khamyang, "ကမ်");
    }

    #[tokio::test]
    async fn update_preserves_audio_when_not_replaced() {
        let store = MemoryStore::new();
        let id = store
            .insert_word(word_fields("မန်း", "Water", "পানী"), Some("water.mp3".into()))
            .await
            .unwrap();

        store
            .update_word(&id, word_fields("မန်း", "Water (n.)", "পানী"), None)
            .await
            .unwrap();
        let words = store.list_words(&ContentQuery::default()).await.unwrap();
        assert_eq!(words[0].audio_path.as_deref(), Some("water.mp3"));

        store
            .update_word(
                &id,
                word_fields("မန်း", "Water (n.)", "পানী"),
                Some("water2.mp3".into()),
            )
            .await
            .unwrap();
        let words = store.list_words(&ContentQuery::default()).await.unwrap();
        assert_eq!(words[0].audio_path.as_deref(), Some("water2.mp3"));
    }

    #[tokio::test]
    async fn delete_unknown_word_is_a_noop() {
        let store = MemoryStore::new();
        store.delete_word("missing").await.unwrap();
    }

    #[tokio::test]
    async fn active_listing_joins_seller_contact() {
        let store = MemoryStore::new();
        let seller = store
            .create_seller(NewSeller {
                full_name: "Nang".into(),
                business_name: "Weave Shop".into(),
                email: "nang@example.com".into(),
                password_hash: "$argon2id$fake".into(),
                phone: "+919876".into(),
                whatsapp: "919876".into(),
                address: "".into(),
                business_type: "retail".into(),
            })
            .await
            .unwrap();
        store
            .insert_product(
                &seller.id,
                NewProduct {
                    name: "Scarf".into(),
                    description: "Handwoven".into(),
                    category: "textiles".into(),
                    price: 20.0,
                    original_price: 25.0,
                    sizes: vec![],
                    images: vec![],
                    stock_quantity: 3,
                },
            )
            .await
            .unwrap();

        let listed = store.list_active_products().await.unwrap();
        assert_eq!(listed.len(), 1);
        let contact = listed[0].seller_info.as_ref().unwrap();
        assert_eq!(contact.business_name, "Weave Shop");
        assert_eq!(contact.whatsapp, "919876");
    }
}
