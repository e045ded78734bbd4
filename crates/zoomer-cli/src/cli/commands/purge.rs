//! `zoomer purge` – evict the configured percentage of oldest records.

use anyhow::Result;
use zoomer_core::capacity;
use zoomer_core::config::Settings;
use zoomer_core::store::ZoomDb;

pub async fn run_purge(db: &ZoomDb, settings: &Settings) -> Result<()> {
    let removed = capacity::purge_oldest_entries(db, settings.purge_percentage).await?;
    println!(
        "Purged {removed} records ({}% of the store)",
        settings.purge_percentage
    );
    Ok(())
}
