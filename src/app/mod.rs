pub mod accounts;
pub mod bootstrap;
pub mod content;
pub mod market;

pub use accounts::{AccountService, SellerRegistration};
pub use content::ContentService;
pub use market::MarketService;
