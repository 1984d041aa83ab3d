// src/manifest.rs

//! Requirements manifest parsing
//!
//! Reads a pip-style requirements file into root requirement specs.
//! Editable installs and local paths cannot be resolved against an index,
//! so those lines are skipped with a warning rather than failing the run.

use crate::error::Result;
use crate::resolver::RequirementSpec;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Parse a requirements file into root requirement specs, in file order
pub fn parse_file(path: &Path) -> Result<Vec<RequirementSpec>> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

fn parse_str(content: &str) -> Result<Vec<RequirementSpec>> {
    let mut roots = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with("-e") || line.starts_with('.') {
            warn!("Skipping requirement line: {}", line);
            continue;
        }

        roots.push(RequirementSpec::parse(line)?);
    }

    Ok(roots)
}
