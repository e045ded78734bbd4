//! `zoomer clear` – delete every stored record.

use anyhow::Result;
use zoomer_core::store::ZoomDb;

pub async fn run_clear(db: &ZoomDb) -> Result<()> {
    let removed = db.clear().await?;
    println!("Removed {removed} records");
    Ok(())
}
