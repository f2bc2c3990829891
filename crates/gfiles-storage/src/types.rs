//! CDN storage entry types.

use serde::{Deserialize, Serialize};

/// One entry of a CDN directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnEntry {
    /// Entry name within its directory.
    pub name: String,
    /// Full path within the storage zone.
    pub path: String,
    /// Size in bytes (0 for directories).
    pub size_bytes: u64,
    /// Whether the entry is a directory.
    pub is_directory: bool,
    /// Last modification timestamp as reported by the zone.
    pub last_changed: Option<String>,
}

/// Raw listing entry as returned by the storage zone API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawEntry {
    #[serde(rename = "ObjectName")]
    pub object_name: String,
    #[serde(rename = "Path", default)]
    pub path: String,
    #[serde(rename = "Length", default)]
    pub length: u64,
    #[serde(rename = "IsDirectory", default)]
    pub is_directory: bool,
    #[serde(rename = "LastChanged", default)]
    pub last_changed: Option<String>,
}

impl From<RawEntry> for CdnEntry {
    fn from(raw: RawEntry) -> Self {
        let path = if raw.path.is_empty() {
            raw.object_name.clone()
        } else {
            format!("{}{}", raw.path, raw.object_name)
        };
        Self {
            name: raw.object_name,
            path,
            size_bytes: raw.length,
            is_directory: raw.is_directory,
            last_changed: raw.last_changed,
        }
    }
}
