//! Record read operations: host-scoped lookup, listing, counts, metrics input.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::super::db::ZoomDb;
use super::super::error::StoreError;
use super::super::types::{RecordId, ZoomRecord};
use crate::specificity::ComponentMask;

fn record_from_row(row: &SqliteRow) -> ZoomRecord {
    let mask: i64 = row.get("component_mask");
    ZoomRecord {
        id: row.get("id"),
        host: row.get("host"),
        path: row.get("path"),
        query: row.get("query"),
        fragment: row.get("fragment"),
        component_mask: ComponentMask::from_bits(mask as u8),
        zoom_level: row.get("zoom_level"),
        timestamp: row.get("timestamp"),
    }
}

const SELECT_COLUMNS: &str =
    "id, host, path, query, fragment, component_mask, zoom_level, timestamp";

impl ZoomDb {
    /// All records stored for a host. Ordered by id so iteration order is
    /// stable regardless of how the index scan returns rows.
    pub async fn find_by_host(&self, host: &str) -> Result<Vec<ZoomRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM zoom_records WHERE host = ?1 ORDER BY id ASC"
        ))
        .bind(host)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    /// Fetch a single record by id.
    pub async fn get(&self, id: RecordId) -> Result<Option<ZoomRecord>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM zoom_records WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(record_from_row))
    }

    /// List every record, grouped by host then id for stable output.
    pub async fn list_all(&self) -> Result<Vec<ZoomRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM zoom_records ORDER BY host ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    /// Total number of stored records.
    pub async fn count(&self) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM zoom_records")
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.get("n");
        Ok(n as u64)
    }

    /// The `n` least-recently-touched records, oldest first. Id breaks
    /// timestamp ties so eviction order is deterministic.
    pub async fn find_oldest(&self, n: u64) -> Result<Vec<ZoomRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM zoom_records ORDER BY timestamp ASC, id ASC LIMIT ?1"
        ))
        .bind(n as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    /// Number of records touched at or after `cutoff_ms`.
    pub async fn count_touched_since(&self, cutoff_ms: i64) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM zoom_records WHERE timestamp >= ?1")
            .bind(cutoff_ms)
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.get("n");
        Ok(n as u64)
    }

    /// Number of distinct hosts with at least one record.
    pub async fn count_distinct_hosts(&self) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(DISTINCT host) AS n FROM zoom_records")
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.get("n");
        Ok(n as u64)
    }

    /// Rough storage footprint: serialized-JSON length of each record,
    /// doubled to account for index and page overhead.
    pub async fn estimated_size(&self) -> Result<u64, StoreError> {
        let records = self.list_all().await?;
        let mut total = 0u64;
        for record in &records {
            total += serde_json::to_string(record)?.len() as u64 * 2;
        }
        Ok(total)
    }
}
