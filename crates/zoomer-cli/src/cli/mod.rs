//! CLI for the Zoomer zoom preference store.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zoomer_core::config::Settings;
use zoomer_core::store::ZoomDb;

use commands::{
    run_check_limit, run_clear, run_export, run_import, run_levels, run_list, run_lookup,
    run_metrics, run_purge, run_remove, run_reset, run_set,
};

/// Top-level CLI for the Zoomer zoom preference store.
#[derive(Debug, Parser)]
#[command(name = "zoomer")]
#[command(about = "Zoomer: per-URL zoom preference resolver and store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve the best-matching stored zoom for a URL.
    Lookup {
        /// Absolute http(s) URL.
        url: String,
    },

    /// Store a zoom preference for a URL under the current settings.
    Set {
        /// Absolute http(s) URL.
        url: String,
        /// Zoom factor, e.g. 1.5 for 150%.
        zoom: f64,
    },

    /// Remove the stored preference that currently matches a URL.
    Reset {
        /// Absolute http(s) URL.
        url: String,
    },

    /// List all stored zoom preferences.
    List,

    /// Remove a single record by its ID.
    Remove {
        /// Record identifier.
        id: i64,
    },

    /// Remove every stored record.
    Clear,

    /// Show database metrics (counts, recent use, estimated size).
    Metrics,

    /// Purge the configured percentage of oldest records now.
    Purge,

    /// Check the storage limit and purge if it is exceeded.
    CheckLimit,

    /// Export all records as JSON to a file.
    Export {
        /// Destination file path.
        path: PathBuf,
    },

    /// Import records from a JSON export file.
    Import {
        /// Source file path.
        path: PathBuf,
    },

    /// Show the specificity levels a URL can match at (diagnostic).
    Levels {
        /// Absolute http(s) URL.
        url: String,
    },
}

impl CliCommand {
    pub async fn run_from_args(settings: Settings) -> Result<()> {
        let cli = Cli::parse();
        tracing::debug!("loaded settings: {:?}", settings);
        let db = ZoomDb::open_default().await?;

        match cli.command {
            CliCommand::Lookup { url } => run_lookup(&db, &url).await?,
            CliCommand::Set { url, zoom } => run_set(&db, &settings, &url, zoom).await?,
            CliCommand::Reset { url } => run_reset(&db, &url).await?,
            CliCommand::List => run_list(&db).await?,
            CliCommand::Remove { id } => run_remove(&db, id).await?,
            CliCommand::Clear => run_clear(&db).await?,
            CliCommand::Metrics => run_metrics(&db).await?,
            CliCommand::Purge => run_purge(&db, &settings).await?,
            CliCommand::CheckLimit => run_check_limit(&db, &settings).await?,
            CliCommand::Export { path } => run_export(&db, &path).await?,
            CliCommand::Import { path } => run_import(&db, &path).await?,
            CliCommand::Levels { url } => run_levels(&url)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
