//! Account entities: end users, sellers, and the single admin account.
//!
//! Password hashes are stored, never plaintext; the hash fields are skipped
//! on serialization so they cannot leak through any JSON surface.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique across users; the login key.
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

/// Registration input after validation, hash already computed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Seller {
    pub id: String,
    pub full_name: String,
    pub business_name: String,
    /// Unique across sellers; the login key.
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub business_type: String,
    /// `active` or `inactive`.
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSeller {
    pub full_name: String,
    pub business_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub business_type: String,
}

/// The public subset of a seller returned by the login endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SellerProfile {
    pub id: String,
    pub business_name: String,
    pub email: String,
}

impl From<&Seller> for SellerProfile {
    fn from(seller: &Seller) -> Self {
        Self {
            id: seller.id.clone(),
            business_name: seller.business_name.clone(),
            email: seller.email.clone(),
        }
    }
}

/// The single seeded admin account.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    pub password_hash: String,
}
