//! `zoomer check-limit` – enforce the storage cap if it is exceeded.

use anyhow::Result;
use zoomer_core::capacity;
use zoomer_core::config::Settings;
use zoomer_core::store::ZoomDb;

pub async fn run_check_limit(db: &ZoomDb, settings: &Settings) -> Result<()> {
    if capacity::check_and_enforce_limit(db, settings).await? {
        println!("Storage limit exceeded; purge performed.");
    } else {
        println!(
            "Within storage limit ({} of {} records).",
            db.count().await?,
            settings.storage_limit
        );
    }
    Ok(())
}
