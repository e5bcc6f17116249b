//! Credential operations for the three identity classes.
//!
//! Registration and login run against the store; a success establishes a
//! session for exactly that identity class. Lookup-miss and hash-mismatch
//! deliberately produce the same message so login probes cannot tell which
//! part failed.

use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{SessionIdentity, SessionStore};
use crate::domain::model::{NewSeller, NewUser, Seller, User};
use crate::error::{AppError, AppResult};
use crate::storage::DataStore;

/// Seller registration input after transport normalization.
#[derive(Debug, Clone)]
pub struct SellerRegistration {
    pub full_name: String,
    pub business_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub business_type: String,
}

pub struct AccountService {
    store: Arc<dyn DataStore>,
    sessions: SessionStore,
}

impl AccountService {
    pub fn new(store: Arc<dyn DataStore>, sessions: SessionStore) -> Self {
        Self { store, sessions }
    }

    /// Registers a user and logs them straight in; returns the user with
    /// the freshly issued session token.
    pub async fn register_user(
        &self,
        name: &str,
        phone: &str,
        address: &str,
        password: &str,
    ) -> AppResult<(User, String)> {
        let user = self
            .store
            .create_user(NewUser {
                name: name.to_string(),
                phone: phone.to_string(),
                address: address.to_string(),
                password_hash: hash_password(password)?,
            })
            .await?;
        let token = self
            .sessions
            .issue(SessionIdentity::user(&user.id, &user.name))
            .await;
        Ok((user, token))
    }

    pub async fn login_user(&self, phone: &str, password: &str) -> AppResult<(User, String)> {
        let user = self
            .store
            .find_user_by_phone(phone)
            .await?
            .filter(|u| verify_password(password, &u.password_hash))
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;
        let token = self
            .sessions
            .issue(SessionIdentity::user(&user.id, &user.name))
            .await;
        Ok((user, token))
    }

    pub async fn register_seller(&self, registration: SellerRegistration) -> AppResult<Seller> {
        self.store
            .create_seller(NewSeller {
                full_name: registration.full_name,
                business_name: registration.business_name,
                email: registration.email,
                password_hash: hash_password(&registration.password)?,
                phone: registration.phone,
                whatsapp: registration.whatsapp,
                address: registration.address,
                business_type: registration.business_type,
            })
            .await
    }

    pub async fn login_seller(&self, email: &str, password: &str) -> AppResult<(Seller, String)> {
        let seller = self
            .store
            .find_seller_by_email(email)
            .await?
            .filter(|s| verify_password(password, &s.password_hash))
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;
        let token = self
            .sessions
            .issue(SessionIdentity::seller(&seller.id, &seller.business_name))
            .await;
        Ok((seller, token))
    }

    /// Authenticates against the single seeded admin account; both the
    /// username and the password must match.
    pub async fn login_admin(&self, username: &str, password: &str) -> AppResult<String> {
        let account = self
            .store
            .admin_account()
            .await?
            .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;
        if account.username != username || !verify_password(password, &account.password_hash) {
            return Err(AppError::unauthorized("Invalid credentials"));
        }
        Ok(self
            .sessions
            .issue(SessionIdentity::admin(account.username))
            .await)
    }

    /// Revokes the presented token. Logout is idempotent; revoking an
    /// unknown token is not an error.
    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.revoke(token).await
    }
}
