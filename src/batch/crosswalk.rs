//! Manual-fix crosswalk for zoning strings
//!
//! Some codes in the city's layer are malformed beyond what the parser
//! tolerates, or parse to the wrong thing. A crosswalk is a curated JSON array
//! of [`ZoningColumns`] rows keyed by `ZONE_CMPLT`; batch runs use those rows
//! verbatim instead of parser output.
//!
//! ```json
//! [
//!   {"ZONE_CMPLT": "(T)(Q)C2-1-CDO", "Q": true, "T": true, "zone_class": "C2",
//!    "height_district": "1", "overlay": ["CDO"]}
//! ]
//! ```

use super::ZoningColumns;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Crosswalk {
    entries: HashMap<String, ZoningColumns>,
}

impl Crosswalk {
    /// Index rows by their trimmed `ZONE_CMPLT`. Later rows win on duplicates.
    pub fn from_rows(rows: impl IntoIterator<Item = ZoningColumns>) -> Self {
        let mut entries = HashMap::new();
        for row in rows {
            let key = row.zone_cmplt.trim().to_string();
            if entries.insert(key, row).is_some() {
                warn!("duplicate crosswalk entry; keeping the last one");
            }
        }
        Self { entries }
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let rows: Vec<ZoningColumns> = serde_json::from_str(json)?;
        Ok(Self::from_rows(rows))
    }

    /// Load a crosswalk file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json).map_err(|err| Error::Crosswalk {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn get(&self, code: &str) -> Option<&ZoningColumns> {
        self.entries.get(code.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
