//! `zoomer reset <url>` – remove the preference that matches a URL.

use anyhow::Result;
use zoomer_core::matcher::find_best_match;
use zoomer_core::store::ZoomDb;
use zoomer_core::url_parts::UrlParts;

pub async fn run_reset(db: &ZoomDb, url: &str) -> Result<()> {
    let parts = UrlParts::parse(url)?;
    let candidates = db.find_by_host(&parts.host).await?;

    match find_best_match(&parts, &candidates) {
        Some(record) => {
            let id = record.id;
            db.remove(id).await?;
            println!("Removed record {id}");
        }
        None => println!("No stored zoom for {url}"),
    }
    Ok(())
}
