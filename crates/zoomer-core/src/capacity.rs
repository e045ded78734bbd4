//! Storage capacity enforcement and database metrics.
//!
//! The store is bounded by `storage_limit`; once exceeded, the configured
//! percentage of least-recently-touched records is evicted. Enforcement is
//! triggered after writes via a deferred task (see `service`), so the write
//! path never waits on a purge.

use crate::config::Settings;
use crate::store::{StoreError, ZoomDb};

/// Window for the "recently used" metric, in days.
const RECENT_WINDOW_DAYS: i64 = 7;

/// Aggregate database metrics for the UI/CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbMetrics {
    pub total_entries: u64,
    pub unique_hosts: u64,
    /// Entries touched within the last seven days.
    pub recent_entries: u64,
    pub estimated_bytes: u64,
}

impl DbMetrics {
    /// Human-readable form of the estimated footprint.
    pub fn readable_size(&self) -> String {
        human_readable_size(self.estimated_bytes)
    }
}

pub fn human_readable_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Collect the metrics summary.
pub async fn metrics(db: &ZoomDb) -> Result<DbMetrics, StoreError> {
    let cutoff = unix_now_ms() - RECENT_WINDOW_DAYS * 24 * 60 * 60 * 1000;
    Ok(DbMetrics {
        total_entries: db.count().await?,
        unique_hosts: db.count_distinct_hosts().await?,
        recent_entries: db.count_touched_since(cutoff).await?,
        estimated_bytes: db.estimated_size().await?,
    })
}

/// Evict the oldest `ceil(count * percentage / 100)` records (at least one
/// when the store is non-empty). Returns how many were actually deleted,
/// which can be fewer than requested if the store shrank concurrently.
///
/// Rejects a percentage outside 1..=100 before any I/O.
pub async fn purge_oldest_entries(db: &ZoomDb, percentage: u32) -> Result<u64, StoreError> {
    if percentage == 0 || percentage > 100 {
        return Err(StoreError::ConstraintViolation(format!(
            "purge percentage must be between 1 and 100, got {percentage}"
        )));
    }

    let total = db.count().await?;
    if total == 0 {
        return Ok(0);
    }

    let requested = (total * percentage as u64).div_ceil(100).max(1);
    tracing::debug!("purging {requested} of {total} entries ({percentage}%)");

    let oldest = db.find_oldest(requested).await?;
    let mut deleted = 0u64;
    for record in oldest {
        match db.remove(record.id).await {
            Ok(()) => deleted += 1,
            // Already gone: another writer got there first.
            Err(StoreError::RecordNotFound(_)) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(deleted)
}

/// Purge when the record count exceeds the configured limit. Returns whether
/// a purge was performed.
pub async fn check_and_enforce_limit(db: &ZoomDb, settings: &Settings) -> Result<bool, StoreError> {
    let count = db.count().await?;
    if count <= settings.storage_limit {
        return Ok(false);
    }

    tracing::info!(
        "storage limit exceeded: {count} > {}, purging {}%",
        settings.storage_limit,
        settings.purge_percentage
    );
    let purged = purge_oldest_entries(db, settings.purge_percentage).await?;
    tracing::info!("purged {purged} entries");
    Ok(true)
}

fn unix_now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
