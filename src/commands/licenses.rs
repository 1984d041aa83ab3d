// src/commands/licenses.rs
//! License map inspection command

use anyhow::Result;
use pyoe::license::LicenseMap;
use std::path::Path;
use tracing::info;

/// Print the effective license map (built-ins plus optional overlay)
pub fn cmd_licenses(overlay: Option<&Path>) -> Result<()> {
    let mut map = LicenseMap::builtin();
    if let Some(path) = overlay {
        map.load_overlay(path)?;
    }
    info!("License map holds {} entries", map.len());

    println!("Known license mappings:");
    for (raw, id) in map.iter() {
        println!("  {:50} -> {}", raw, id);
    }
    Ok(())
}
