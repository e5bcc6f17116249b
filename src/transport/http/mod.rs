pub mod extract;
pub mod router;
pub mod types;

pub mod handlers {
    pub mod accounts;
    pub mod health;
    pub mod products;
    pub mod sellers;
    pub mod songs;
    pub mod words;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
