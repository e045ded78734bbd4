//! Export/import of the stored record list as JSON.
//!
//! The export is the plain serialized record array. Import strips ids and
//! timestamps (the store assigns fresh ones) and routes every entry through
//! `upsert`, so re-importing an export never duplicates tuples.

use crate::store::{StoreError, ZoomDb, ZoomEntry};

/// Serialize every stored record to a pretty-printed JSON array.
pub async fn export_json(db: &ZoomDb) -> Result<String, StoreError> {
    let records = db.list_all().await?;
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Import records from a JSON array. Unknown fields (id, timestamp) are
/// ignored. Returns the number of entries written.
pub async fn import_json(db: &ZoomDb, json: &str) -> Result<u64, StoreError> {
    let entries: Vec<ZoomEntry> = serde_json::from_str(json)?;
    let mut imported = 0u64;
    for entry in &entries {
        db.upsert(entry).await?;
        imported += 1;
    }
    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specificity::ComponentMask;
    use crate::store::open_memory;

    fn entry(host: &str, path: &str, zoom: f64) -> ZoomEntry {
        ZoomEntry {
            host: host.to_string(),
            path: path.to_string(),
            query: String::new(),
            fragment: String::new(),
            component_mask: ComponentMask::from_bits(1),
            zoom_level: zoom,
        }
    }

    #[tokio::test]
    async fn export_then_import_restores_records() {
        let db = open_memory().await.unwrap();
        db.upsert(&entry("a.com", "/x", 1.2)).await.unwrap();
        db.upsert(&entry("b.com", "/y", 1.5)).await.unwrap();

        let json = export_json(&db).await.unwrap();
        // Field names stay camelCase for compatibility with old export files.
        assert!(json.contains("\"componentMask\""));
        assert!(json.contains("\"zoomLevel\""));

        let fresh = open_memory().await.unwrap();
        let imported = import_json(&fresh, &json).await.unwrap();
        assert_eq!(imported, 2);

        let records = fresh.list_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].host, "a.com");
        assert_eq!(records[1].host, "b.com");
    }

    #[tokio::test]
    async fn import_deduplicates_existing_tuples() {
        let db = open_memory().await.unwrap();
        db.upsert(&entry("a.com", "/x", 1.2)).await.unwrap();

        let json = export_json(&db).await.unwrap();
        let imported = import_json(&db, &json).await.unwrap();
        assert_eq!(imported, 1);
        // Same tuple went through upsert: still one record.
        assert_eq!(db.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn import_rejects_malformed_json() {
        let db = open_memory().await.unwrap();
        assert!(matches!(
            import_json(&db, "{not json").await,
            Err(StoreError::Serialize(_))
        ));
        assert_eq!(db.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn import_accepts_records_without_id_or_timestamp() {
        let db = open_memory().await.unwrap();
        let json = r#"[{
            "host": "a.com",
            "path": "/p",
            "query": "?q=1",
            "fragment": "",
            "componentMask": 3,
            "zoomLevel": 1.75
        }]"#;
        assert_eq!(import_json(&db, json).await.unwrap(), 1);
        let records = db.find_by_host("a.com").await.unwrap();
        assert_eq!(records[0].component_mask.bits(), 3);
        assert!((records[0].zoom_level - 1.75).abs() < f64::EPSILON);
        assert!(records[0].timestamp > 0);
    }
}
