// src/license/map.rs

//! The license correction table
//!
//! Maps raw license strings onto approved identifiers. The table starts
//! from the built-in translations, can be overlaid from a JSON file saved
//! by a previous run, and grows during a run as unknown licenses are
//! resolved. Keys are stored normalized (trimmed, lower-cased) so repeat
//! encounters of whitespace/case variants hit the same entry.

use crate::error::{Error, Result};
use crate::license::builtin::BUILTIN_LICENSES;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Persistent raw-string → approved-identifier mapping
#[derive(Debug, Clone)]
pub struct LicenseMap {
    entries: BTreeMap<String, String>,
    dirty: bool,
}

/// Normalize a raw license string into its lookup key
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl LicenseMap {
    /// Create a map seeded with the built-in translations
    pub fn builtin() -> Self {
        let entries = BUILTIN_LICENSES
            .iter()
            .map(|(raw, id)| (raw.to_string(), id.to_string()))
            .collect();
        Self {
            entries,
            dirty: false,
        }
    }

    /// Create an empty map (tests and tooling)
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            dirty: false,
        }
    }

    /// Overlay entries from a JSON file saved by a previous run
    ///
    /// Missing file is not an error: the first run starts from built-ins
    /// alone. Entries in the file win over built-ins.
    pub fn load_overlay(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            debug!("No license map at {}, using built-ins", path.display());
            return Ok(());
        }

        let data = fs::read_to_string(path)?;
        let overlay: BTreeMap<String, String> = serde_json::from_str(&data)
            .map_err(|e| Error::LicenseMap(format!("Invalid file {}: {e}", path.display())))?;

        let count = overlay.len();
        for (raw, id) in overlay {
            self.entries.insert(normalize_key(&raw), id);
        }
        info!("Loaded {} license mappings from {}", count, path.display());
        Ok(())
    }

    /// Look up the approved identifier for a raw license string
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.entries.get(&normalize_key(raw)).map(String::as_str)
    }

    /// Record a mapping learned during this run
    pub fn insert(&mut self, raw: &str, identifier: &str) {
        self.entries
            .insert(normalize_key(raw), identifier.to_string());
        self.dirty = true;
    }

    /// Whether the run added entries beyond what was loaded
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize the full table to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| Error::LicenseMap(format!("Failed to serialize: {e}")))?;
        fs::write(path, data)?;
        info!("Wrote {} license mappings to {}", self.entries.len(), path.display());
        Ok(())
    }
}
