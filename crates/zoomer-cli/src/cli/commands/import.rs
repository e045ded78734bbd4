//! `zoomer import <path>` – load records from a JSON export.

use anyhow::{Context, Result};
use std::path::Path;
use zoomer_core::store::ZoomDb;
use zoomer_core::transfer;

pub async fn run_import(db: &ZoomDb, path: &Path) -> Result<()> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read import: {}", path.display()))?;
    let imported = transfer::import_json(db, &json).await?;
    println!("Imported {imported} records from {}", path.display());
    Ok(())
}
