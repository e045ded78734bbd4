//! `zoomer lookup <url>` – resolve the best-matching stored zoom.

use anyhow::Result;
use zoomer_core::matcher::find_best_match;
use zoomer_core::specificity::specificity_score;
use zoomer_core::store::ZoomDb;
use zoomer_core::url_parts::UrlParts;

pub async fn run_lookup(db: &ZoomDb, url: &str) -> Result<()> {
    let parts = UrlParts::parse(url)?;
    let candidates = db.find_by_host(&parts.host).await?;

    match find_best_match(&parts, &candidates) {
        Some(record) => {
            println!(
                "{:.0}% (record {}, specificity {})",
                record.zoom_level * 100.0,
                record.id,
                specificity_score(record)
            );
            db.touch(record.id).await?;
        }
        None => println!("No stored zoom for {url}"),
    }
    Ok(())
}
