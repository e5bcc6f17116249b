//! Startup seeding: upload directory, the single admin account, and a demo
//! seller when the seller collection is empty.

use tracing::{info, warn};

use crate::auth::password::hash_password;
use crate::domain::model::{AdminAccount, NewSeller};
use crate::infra::AppConfig;
use crate::storage::DataStore;

pub async fn run(store: &dyn DataStore, config: &AppConfig) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    // Admin seeding is idempotent: the store only inserts when absent.
    store
        .seed_admin(AdminAccount {
            username: config.admin_username.clone(),
            password_hash: hash_password(&config.admin_password)?,
        })
        .await?;
    info!("admin account ensured");

    if !store.has_sellers().await? {
        match store
            .create_seller(NewSeller {
                full_name: "Demo Seller".to_string(),
                business_name: "traditional Shop".to_string(),
                email: "khamyang@gmail.com".to_string(),
                password_hash: hash_password("khamyang123")?,
                phone: "+919876543210".to_string(),
                whatsapp: "919876543210".to_string(),
                address: "Demo Address".to_string(),
                business_type: "retail".to_string(),
            })
            .await
        {
            Ok(seller) => info!(seller_id = %seller.id, "demo seller seeded"),
            Err(e) => warn!(error = %e, "demo seller seeding failed"),
        }
    }

    Ok(())
}
