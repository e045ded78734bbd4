//! Types stored in and read from the zoom database.

use serde::{Deserialize, Serialize};

use crate::specificity::ComponentMask;
use crate::url_parts::UrlParts;

/// Record identifier, assigned by the store on insert.
pub type RecordId = i64;

/// Persisted zoom preference.
///
/// The serialized field names are camelCase so export files stay compatible
/// with the record shape the popup/options pages exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomRecord {
    pub id: RecordId,
    /// Lowercase normalized authority.
    pub host: String,
    /// Normalized path (leading `/`, no trailing slash except root).
    pub path: String,
    /// Includes leading `?`, or empty.
    pub query: String,
    /// Includes leading `#`, or empty.
    pub fragment: String,
    /// Which components were significant when the record was written.
    pub component_mask: ComponentMask,
    /// Zoom multiplier, e.g. 1.5 for 150%.
    pub zoom_level: f64,
    /// Last read-hit or write, Unix milliseconds.
    pub timestamp: i64,
}

/// Input to `upsert`: everything except the store-assigned id and timestamp.
///
/// Deserialization ignores unknown fields, so a full exported record (id and
/// timestamp included) imports cleanly with both stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomEntry {
    pub host: String,
    pub path: String,
    pub query: String,
    pub fragment: String,
    pub component_mask: ComponentMask,
    pub zoom_level: f64,
}

impl ZoomEntry {
    /// Build an entry from normalized URL parts and the mask in effect.
    pub fn from_parts(parts: &UrlParts, mask: ComponentMask, zoom_level: f64) -> Self {
        Self {
            host: parts.host.clone(),
            path: parts.path.clone(),
            query: parts.query.clone(),
            fragment: parts.fragment.clone(),
            component_mask: mask,
            zoom_level,
        }
    }
}
