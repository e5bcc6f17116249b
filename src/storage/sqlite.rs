//! SQLite backend.
//!
//! Schema is ensured with `CREATE TABLE IF NOT EXISTS` at connect time.
//! Search runs as `LIKE` over lowercased columns; the ORDER BY column is
//! always taken from the per-kind allow-list, never from raw client input.
//! Timestamps are stored as RFC3339 text.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use uuid::Uuid;

use crate::domain::model::content::{resolve_sort_field, SONG_SORT_FIELDS, WORD_SORT_FIELDS};
use crate::domain::model::market::PRODUCT_STATUS_ACTIVE;
use crate::domain::model::{
    AdminAccount, ContentQuery, NewProduct, NewSeller, NewUser, Product, ProductWithSeller,
    Seller, SellerContact, Song, SongFields, User, Word, WordFields,
};
use crate::error::{AppError, AppResult};
use crate::storage::DataStore;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        phone TEXT NOT NULL UNIQUE,
        address TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        registered_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS admin (
        username TEXT PRIMARY KEY,
        password_hash TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS sellers (
        id TEXT PRIMARY KEY,
        full_name TEXT NOT NULL,
        business_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        phone TEXT NOT NULL,
        whatsapp TEXT NOT NULL,
        address TEXT NOT NULL DEFAULT '',
        business_type TEXT NOT NULL DEFAULT 'retail',
        status TEXT NOT NULL DEFAULT 'active',
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS products (
        id TEXT PRIMARY KEY,
        seller_id TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        category TEXT NOT NULL,
        price REAL NOT NULL,
        original_price REAL NOT NULL,
        sizes TEXT NOT NULL DEFAULT '[]',
        images TEXT NOT NULL DEFAULT '[]',
        stock_quantity INTEGER NOT NULL DEFAULT 0,
        status TEXT NOT NULL DEFAULT 'active',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS words (
        id TEXT PRIMARY KEY,
        tai_khamyang TEXT NOT NULL,
        english TEXT NOT NULL,
        assamese TEXT NOT NULL,
        audio_path TEXT
    )",
    "CREATE TABLE IF NOT EXISTS songs (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        file_path TEXT
    )",
];

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects to `database_url` (creating the file if missing) and
    /// ensures the schema.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid stored timestamp: {e}")))
}

fn parse_string_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<User> {
    let registered_at: String = row.try_get("registered_at")?;
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        password_hash: row.try_get("password_hash")?,
        registered_at: parse_timestamp(&registered_at)?,
    })
}

fn seller_from_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<Seller> {
    let created_at: String = row.try_get("created_at")?;
    Ok(Seller {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
        business_name: row.try_get("business_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        phone: row.try_get("phone")?,
        whatsapp: row.try_get("whatsapp")?,
        address: row.try_get("address")?,
        business_type: row.try_get("business_type")?,
        status: row.try_get("status")?,
        created_at: parse_timestamp(&created_at)?,
    })
}

fn product_from_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<Product> {
    let sizes: String = row.try_get("sizes")?;
    let images: String = row.try_get("images")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    Ok(Product {
        id: row.try_get("id")?,
        seller_id: row.try_get("seller_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        price: row.try_get("price")?,
        original_price: row.try_get("original_price")?,
        sizes: parse_string_list(&sizes),
        images: parse_string_list(&images),
        stock_quantity: row.try_get("stock_quantity")?,
        status: row.try_get("status")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn word_from_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<Word> {
    Ok(Word {
        id: row.try_get("id")?,
        tai_khamyang: row.try_get("tai_khamyang")?,
        english: row.try_get("english")?,
        assamese: row.try_get("assamese")?,
        audio_path: row.try_get("audio_path")?,
    })
}

fn song_from_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<Song> {
    Ok(Song {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        file_path: row.try_get("file_path")?,
    })
}

#[async_trait]
impl DataStore for SqliteStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, new: NewUser) -> AppResult<User> {
        if self.find_user_by_phone(&new.phone).await?.is_some() {
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
        sqlx::query(
            "INSERT INTO users (id, name, phone, address, password_hash, registered_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(&user.password_hash)
        .bind(user.registered_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_phone(&self, phone: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE phone = ? LIMIT 1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn create_seller(&self, new: NewSeller) -> AppResult<Seller> {
        if self.find_seller_by_email(&new.email).await?.is_some() {
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
        sqlx::query(
            "INSERT INTO sellers (id, full_name, business_name, email, password_hash,
                                  phone, whatsapp, address, business_type, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&seller.id)
        .bind(&seller.full_name)
        .bind(&seller.business_name)
        .bind(&seller.email)
        .bind(&seller.password_hash)
        .bind(&seller.phone)
        .bind(&seller.whatsapp)
        .bind(&seller.address)
        .bind(&seller.business_type)
        .bind(&seller.status)
        .bind(seller.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(seller)
    }

    async fn find_seller_by_email(&self, email: &str) -> AppResult<Option<Seller>> {
        let row = sqlx::query("SELECT * FROM sellers WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(seller_from_row).transpose()
    }

    async fn get_seller(&self, id: &str) -> AppResult<Option<Seller>> {
        let row = sqlx::query("SELECT * FROM sellers WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(seller_from_row).transpose()
    }

    async fn has_sellers(&self) -> AppResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM sellers")
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.try_get("n")?;
        Ok(n > 0)
    }

    async fn admin_account(&self) -> AppResult<Option<AdminAccount>> {
        let row = sqlx::query("SELECT username, password_hash FROM admin LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(AdminAccount {
                username: row.try_get("username")?,
                password_hash: row.try_get("password_hash")?,
            })),
            None => Ok(None),
        }
    }

    async fn seed_admin(&self, account: AdminAccount) -> AppResult<()> {
        if self.admin_account().await?.is_some() {
            return Ok(());
        }
        sqlx::query("INSERT INTO admin (username, password_hash) VALUES (?, ?)")
            .bind(&account.username)
            .bind(&account.password_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_words(&self, query: &ContentQuery) -> AppResult<Vec<Word>> {
        let sort = resolve_sort_field(query.sort_by.as_deref(), WORD_SORT_FIELDS);
        let term = query.search.as_deref().unwrap_or("");
        let rows = if term.is_empty() {
            sqlx::query(&format!(
                "SELECT * FROM words ORDER BY LOWER({sort}) ASC"
            ))
            .fetch_all(&self.pool)
            .await?
        } else {
            let pattern = format!("%{}%", term.to_lowercase());
            sqlx::query(&format!(
                "SELECT * FROM words
                 WHERE LOWER(tai_khamyang) LIKE ?
                    OR LOWER(english) LIKE ?
                    OR LOWER(assamese) LIKE ?
                 ORDER BY LOWER({sort}) ASC"
            ))
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?
        };
        rows.iter().map(word_from_row).collect()
    }

    async fn insert_word(
        &self,
        fields: WordFields,
        audio_path: Option<String>,
    ) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO words (id, tai_khamyang, english, assamese, audio_path)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&fields.tai_khamyang)
        .bind(&fields.english)
        .bind(&fields.assamese)
        .bind(&audio_path)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_word(
        &self,
        id: &str,
        fields: WordFields,
        audio_path: Option<String>,
    ) -> AppResult<()> {
        let result = match audio_path {
            Some(audio) => {
                sqlx::query(
                    "UPDATE words SET tai_khamyang = ?, english = ?, assamese = ?, audio_path = ?
                     WHERE id = ?",
                )
                .bind(&fields.tai_khamyang)
                .bind(&fields.english)
                .bind(&fields.assamese)
                .bind(&audio)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "UPDATE words SET tai_khamyang = ?, english = ?, assamese = ? WHERE id = ?",
                )
                .bind(&fields.tai_khamyang)
                .bind(&fields.english)
                .bind(&fields.assamese)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
        };
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Word not found".to_string()));
        }
        Ok(())
    }

    async fn delete_word(&self, id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM words WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_songs(&self, query: &ContentQuery) -> AppResult<Vec<Song>> {
        let sort = resolve_sort_field(query.sort_by.as_deref(), SONG_SORT_FIELDS);
        let term = query.search.as_deref().unwrap_or("");
        let rows = if term.is_empty() {
            sqlx::query(&format!(
                "SELECT * FROM songs ORDER BY LOWER({sort}) ASC"
            ))
            .fetch_all(&self.pool)
            .await?
        } else {
            let pattern = format!("%{}%", term.to_lowercase());
            sqlx::query(&format!(
                "SELECT * FROM songs
                 WHERE LOWER(title) LIKE ?
                    OR LOWER(COALESCE(description, '')) LIKE ?
                 ORDER BY LOWER({sort}) ASC"
            ))
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?
        };
        rows.iter().map(song_from_row).collect()
    }

    async fn insert_song(
        &self,
        fields: SongFields,
        file_path: Option<String>,
    ) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO songs (id, title, description, file_path) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&file_path)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update_song(
        &self,
        id: &str,
        fields: SongFields,
        file_path: Option<String>,
    ) -> AppResult<()> {
        let result = match file_path {
            Some(file) => {
                sqlx::query(
                    "UPDATE songs SET title = ?, description = ?, file_path = ? WHERE id = ?",
                )
                .bind(&fields.title)
                .bind(&fields.description)
                .bind(&file)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
            None => {
                sqlx::query("UPDATE songs SET title = ?, description = ? WHERE id = ?")
                    .bind(&fields.title)
                    .bind(&fields.description)
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
        };
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Song not found".to_string()));
        }
        Ok(())
    }

    async fn delete_song(&self, id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_product(&self, seller_id: &str, new: NewProduct) -> AppResult<Product> {
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
        sqlx::query(
            "INSERT INTO products (id, seller_id, name, description, category, price,
                                   original_price, sizes, images, stock_quantity, status,
                                   created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.id)
        .bind(&product.seller_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.original_price)
        .bind(serde_json::to_string(&product.sizes).unwrap_or_else(|_| "[]".to_string()))
        .bind(serde_json::to_string(&product.images).unwrap_or_else(|_| "[]".to_string()))
        .bind(product.stock_quantity)
        .bind(&product.status)
        .bind(product.created_at.to_rfc3339())
        .bind(product.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(product)
    }

    async fn list_active_products(&self) -> AppResult<Vec<ProductWithSeller>> {
        let rows = sqlx::query(
            "SELECT p.*,
                    s.business_name AS seller_business_name,
                    s.phone AS seller_phone,
                    s.whatsapp AS seller_whatsapp
             FROM products p
             LEFT JOIN sellers s ON s.id = p.seller_id
             WHERE p.status = ?
             ORDER BY p.created_at ASC",
        )
        .bind(PRODUCT_STATUS_ACTIVE)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let product = product_from_row(row)?;
                let business_name: Option<String> = row.try_get("seller_business_name")?;
                let seller_info = match business_name {
                    Some(business_name) => Some(SellerContact {
                        business_name,
                        phone: row.try_get("seller_phone")?,
                        whatsapp: row.try_get("seller_whatsapp")?,
                    }),
                    None => None,
                };
                Ok(ProductWithSeller {
                    product,
                    seller_info,
                })
            })
            .collect()
    }

    async fn list_seller_products(&self, seller_id: &str) -> AppResult<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT * FROM products WHERE seller_id = ? ORDER BY created_at ASC",
        )
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(product_from_row).collect()
    }

    async fn get_product(&self, id: &str) -> AppResult<Option<Product>> {
        let row = sqlx::query("SELECT * FROM products WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn delete_product(&self, id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
