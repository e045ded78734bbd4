//! `zoomer metrics` – database usage summary.

use anyhow::Result;
use zoomer_core::capacity;
use zoomer_core::store::ZoomDb;

pub async fn run_metrics(db: &ZoomDb) -> Result<()> {
    let m = capacity::metrics(db).await?;
    println!("Total entries:       {}", m.total_entries);
    println!("Unique hosts:        {}", m.unique_hosts);
    println!("Used in last 7 days: {}", m.recent_entries);
    println!("Estimated size:      {}", m.readable_size());
    Ok(())
}
