//! `zoomer set <url> <zoom>` – store a zoom preference.

use anyhow::Result;
use zoomer_core::capacity;
use zoomer_core::config::Settings;
use zoomer_core::store::{ZoomDb, ZoomEntry};
use zoomer_core::url_parts::UrlParts;

pub async fn run_set(db: &ZoomDb, settings: &Settings, url: &str, zoom: f64) -> Result<()> {
    if zoom <= 0.0 {
        anyhow::bail!("zoom factor must be positive, got {zoom}");
    }
    let parts = UrlParts::parse(url)?;
    let entry = ZoomEntry::from_parts(&parts, settings.component_mask(), zoom);
    let id = db.upsert(&entry).await?;
    println!("Stored zoom {:.0}% as record {id}", zoom * 100.0);

    // CLI writes are synchronous end-to-end, so enforce the cap in line
    // rather than via the deferred service task.
    if capacity::check_and_enforce_limit(db, settings).await? {
        println!("Storage limit exceeded; purged oldest entries.");
    }
    Ok(())
}
