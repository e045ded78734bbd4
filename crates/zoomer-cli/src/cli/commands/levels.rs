//! `zoomer levels <url>` – diagnostic view of a URL's match levels.

use anyhow::Result;
use zoomer_core::specificity::specificity_levels;
use zoomer_core::url_parts::UrlParts;

pub fn run_levels(url: &str) -> Result<()> {
    let parts = UrlParts::parse(url)?;
    println!("Host:     {}", parts.host);
    println!("Path:     {}", parts.path);
    let query = if parts.query.is_empty() { "-" } else { parts.query.as_str() };
    let fragment = if parts.fragment.is_empty() { "-" } else { parts.fragment.as_str() };
    println!("Query:    {query}");
    println!("Fragment: {fragment}");
    println!();

    for (i, level) in specificity_levels(&parts).iter().enumerate() {
        println!(
            "{}. [mask {}] {:<30} {}",
            i + 1,
            level.mask.bits(),
            level.label,
            level.url
        );
    }
    Ok(())
}
