pub mod config;
pub mod uploads;

pub use config::{AppConfig, StoreBackend};
