//! Authentication and the session gate.
//!
//! Three identity classes (user, seller, admin) with mutually independent
//! sessions: one token maps to exactly one identity, and holding a user
//! session grants no seller or admin capability. The per-request
//! [`AuthContext`] is resolved from the bearer token and passed explicitly
//! into every gated operation; there is no ambient session state.

pub mod password;
pub mod session;

pub use session::SessionStore;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Seller,
    Admin,
}

/// Server-side record that a client has authenticated as one identity class.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub role: Role,
    pub identity_id: String,
    pub display_name: String,
}

impl SessionIdentity {
    pub fn user(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            identity_id: id.into(),
            display_name: name.into(),
        }
    }

    pub fn seller(id: impl Into<String>, business_name: impl Into<String>) -> Self {
        Self {
            role: Role::Seller,
            identity_id: id.into(),
            display_name: business_name.into(),
        }
    }

    pub fn admin(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            role: Role::Admin,
            identity_id: username.clone(),
            display_name: username,
        }
    }
}

/// Per-request authentication context. `None` means the request carried no
/// (valid) session token.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub identity: Option<SessionIdentity>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn authenticated(identity: SessionIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    fn require(&self, role: Role, message: &str) -> AppResult<&SessionIdentity> {
        match &self.identity {
            Some(identity) if identity.role == role => Ok(identity),
            _ => Err(AppError::unauthorized(message)),
        }
    }

    pub fn require_admin(&self) -> AppResult<&SessionIdentity> {
        self.require(Role::Admin, "Unauthorized")
    }

    /// Returns the authenticated seller's id.
    pub fn require_seller(&self) -> AppResult<&str> {
        self.require(Role::Seller, "Please login first")
            .map(|identity| identity.identity_id.as_str())
    }

    pub fn require_user(&self) -> AppResult<&str> {
        self.require(Role::User, "Please login first")
            .map(|identity| identity.identity_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_are_mutually_independent() {
        let seller = AuthContext::authenticated(SessionIdentity::seller("s1", "Shop"));
        assert!(seller.require_seller().is_ok());
        assert!(seller.require_admin().is_err());
        assert!(seller.require_user().is_err());

        let admin = AuthContext::authenticated(SessionIdentity::admin("admin"));
        assert!(admin.require_admin().is_ok());
        assert!(admin.require_seller().is_err());
    }

    #[test]
    fn anonymous_fails_every_gate() {
        let ctx = AuthContext::anonymous();
        assert!(ctx.require_user().is_err());
        assert!(ctx.require_seller().is_err());
        assert!(ctx.require_admin().is_err());
    }
}
