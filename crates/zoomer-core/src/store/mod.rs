//! Persistent zoom-record store (SQLite via sqlx).
//!
//! Records are keyed by the normalized `(host, path, query, fragment,
//! component_mask)` tuple, indexed by host for lookups and by timestamp for
//! LRU-style eviction. Connection and migration live in `db`; record CRUD in
//! `records`.

mod db;
mod error;
mod records;
mod types;

pub use db::ZoomDb;
#[cfg(test)]
pub(crate) use db::open_memory;
pub use error::StoreError;
pub use types::{RecordId, ZoomEntry, ZoomRecord};
