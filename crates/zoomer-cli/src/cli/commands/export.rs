//! `zoomer export <path>` – write all records as JSON.

use anyhow::{Context, Result};
use std::path::Path;
use zoomer_core::store::ZoomDb;
use zoomer_core::transfer;

pub async fn run_export(db: &ZoomDb, path: &Path) -> Result<()> {
    let json = transfer::export_json(db).await?;
    tokio::fs::write(path, &json)
        .await
        .with_context(|| format!("write export: {}", path.display()))?;
    println!("Exported {} bytes to {}", json.len(), path.display());
    Ok(())
}
