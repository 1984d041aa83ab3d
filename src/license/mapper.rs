// src/license/mapper.rs

//! License normalization
//!
//! Maps each resolved node's raw license string onto an approved
//! identifier. A hit in the table returns immediately; a miss is handed
//! to the configured `UnknownLicenseResolver`, and whatever it answers is
//! stored so the identical raw string never asks twice.

use crate::error::{Error, Result};
use crate::license::map::LicenseMap;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Fallback policy for license strings with no known mapping
///
/// One method: produce an approved identifier for a raw string. The
/// mapper stores the answer, so implementations are consulted at most
/// once per distinct raw string.
pub trait UnknownLicenseResolver {
    fn resolve(&mut self, raw: &str) -> Result<String>;
}

/// Blocks on stdin for an operator-supplied identifier
///
/// No validation against the approved vocabulary is performed; the
/// operator is trusted. An unattended run stalls here indefinitely, so
/// non-interactive invocations should pick one of the other policies.
#[derive(Debug, Default)]
pub struct PromptResolver;

impl UnknownLicenseResolver for PromptResolver {
    fn resolve(&mut self, raw: &str) -> Result<String> {
        println!("Failed to translate license: {}", raw);
        print!("Please enter a valid license name: ");
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}

/// Answers every unknown license with a fixed identifier
#[derive(Debug)]
pub struct DefaultResolver {
    identifier: String,
}

impl DefaultResolver {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
        }
    }
}

impl UnknownLicenseResolver for DefaultResolver {
    fn resolve(&mut self, _raw: &str) -> Result<String> {
        Ok(self.identifier.clone())
    }
}

/// Fails the run on the first unknown license
///
/// For unattended runs that must not guess.
#[derive(Debug, Default)]
pub struct FailFast;

impl UnknownLicenseResolver for FailFast {
    fn resolve(&mut self, raw: &str) -> Result<String> {
        Err(Error::LicenseUnmapped(raw.to_string()))
    }
}

/// Maps raw license strings onto approved identifiers
///
/// Owns the mutable table for the duration of a run; the caller loads and
/// persists it at session boundaries.
pub struct LicenseMapper {
    map: LicenseMap,
    fallback: Box<dyn UnknownLicenseResolver>,
}

impl LicenseMapper {
    pub fn new(map: LicenseMap, fallback: Box<dyn UnknownLicenseResolver>) -> Self {
        Self { map, fallback }
    }

    /// Map a raw license string to its approved identifier
    ///
    /// Idempotent: the second call with the same raw string (whitespace
    /// and case variants included) returns the stored identifier without
    /// consulting the fallback.
    pub fn map_license(&mut self, raw: &str) -> Result<String> {
        if let Some(id) = self.map.get(raw) {
            debug!("license '{}' -> {}", raw, id);
            return Ok(id.to_string());
        }

        let id = self.fallback.resolve(raw)?;
        self.map.insert(raw, &id);
        Ok(id)
    }

    /// Hand the table back for persistence
    pub fn into_map(self) -> LicenseMap {
        self.map
    }
}
