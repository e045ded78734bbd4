//! `zoomer remove <id>` – delete a single record.

use anyhow::Result;
use zoomer_core::store::ZoomDb;

pub async fn run_remove(db: &ZoomDb, id: i64) -> Result<()> {
    db.remove(id).await?;
    println!("Removed record {id}");
    Ok(())
}
