// src/error.rs

//! Error types for pyoe
//!
//! Resolution failures abort the whole run: a skipped dependency would
//! silently produce an incomplete recipe set, so there is no per-branch
//! recovery and no retry logic anywhere.

use thiserror::Error;

/// Errors that can occur while resolving packages and generating recipes
#[derive(Error, Debug)]
pub enum Error {
    /// The index has no project under this name
    #[error("Package '{name}' not found on the index")]
    PackageNotFound { name: String },

    /// The project exists but not at the requested version
    #[error("Version {version} of '{name}' not found on the index")]
    VersionNotFound { name: String, version: String },

    /// The release has no source distribution to build from
    #[error("No sdist available for {name} {version}")]
    NoSdist { name: String, version: String },

    /// Unmapped license under a non-interactive policy
    #[error("No mapping for license '{0}' and prompting is disabled")]
    LicenseUnmapped(String),

    /// Malformed requirement specifier or version text
    #[error("Invalid requirement specifier: {0}")]
    Spec(String),

    /// Index transport or deserialization failure
    #[error("Index error: {0}")]
    Index(String),

    /// Downloaded sdist does not match the digests published by the index
    #[error("{algorithm} checksum mismatch for {name} sdist")]
    DigestMismatch {
        name: String,
        algorithm: &'static str,
    },

    /// Sdist unpack or inspection failure
    #[error("Archive error: {0}")]
    Archive(String),

    /// License map file could not be read or written
    #[error("License map error: {0}")]
    LicenseMap(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
