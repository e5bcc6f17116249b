pub mod app;
pub mod auth;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{AccountService, ContentService, MarketService};
pub use auth::{AuthContext, Role, SessionStore};
pub use error::{AppError, AppResult};
pub use infra::{AppConfig, StoreBackend};
pub use storage::{DataStore, MemoryStore, SqliteStore};
