//! Record write operations: upsert, touch, remove, clear.

use sqlx::Row;

use super::super::db::{unix_timestamp_ms, ZoomDb};
use super::super::error::StoreError;
use super::super::types::{RecordId, ZoomEntry};

impl ZoomDb {
    /// Insert a zoom preference, or update the existing record for the same
    /// `(host, component_mask, path, query, fragment)` tuple.
    ///
    /// The find-then-write sequence runs inside one transaction so two
    /// concurrent upserts for the same tuple cannot both insert. Returns the
    /// id of the row that now holds the preference.
    pub async fn upsert(&self, entry: &ZoomEntry) -> Result<RecordId, StoreError> {
        let now = unix_timestamp_ms();
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query(
            r#"
            SELECT id FROM zoom_records
            WHERE host = ?1
              AND component_mask = ?2
              AND path = ?3
              AND query = ?4
              AND fragment = ?5
            LIMIT 1
            "#,
        )
        .bind(&entry.host)
        .bind(entry.component_mask.bits() as i64)
        .bind(&entry.path)
        .bind(&entry.query)
        .bind(&entry.fragment)
        .fetch_optional(&mut *tx)
        .await?;

        let id = match existing {
            Some(row) => {
                let id: i64 = row.get("id");
                sqlx::query(
                    r#"
                    UPDATE zoom_records
                    SET zoom_level = ?1,
                        timestamp = ?2
                    WHERE id = ?3
                    "#,
                )
                .bind(entry.zoom_level)
                .bind(now)
                .bind(id)
                .execute(&mut *tx)
                .await?;
                id
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO zoom_records (
                        host, path, query, fragment,
                        component_mask, zoom_level, timestamp
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                )
                .bind(&entry.host)
                .bind(&entry.path)
                .bind(&entry.query)
                .bind(&entry.fragment)
                .bind(entry.component_mask.bits() as i64)
                .bind(entry.zoom_level)
                .bind(now)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid()
            }
        };

        tx.commit().await?;
        Ok(id)
    }

    /// Refresh a record's timestamp (mark as accessed).
    pub async fn touch(&self, id: RecordId) -> Result<(), StoreError> {
        let now = unix_timestamp_ms();
        let result = sqlx::query(
            r#"
            UPDATE zoom_records
            SET timestamp = ?1
            WHERE id = ?2
            "#,
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RecordNotFound(id));
        }
        Ok(())
    }

    /// Permanently remove a record.
    pub async fn remove(&self, id: RecordId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM zoom_records WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RecordNotFound(id));
        }
        Ok(())
    }

    /// Remove every record. Returns the number deleted.
    pub async fn clear(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM zoom_records")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
