//! `zoomer list` – show all stored zoom preferences.

use anyhow::Result;
use zoomer_core::store::ZoomDb;

pub async fn run_list(db: &ZoomDb) -> Result<()> {
    let records = db.list_all().await?;
    if records.is_empty() {
        println!("No zoom preferences stored.");
        return Ok(());
    }

    println!("{:<6} {:<6} {:<7} URL", "ID", "MASK", "ZOOM");
    for r in records {
        println!(
            "{:<6} {:<6} {:<7} {}{}{}{}",
            r.id,
            r.component_mask.bits(),
            format!("{:.0}%", r.zoom_level * 100.0),
            r.host,
            r.path,
            r.query,
            r.fragment
        );
    }
    Ok(())
}
