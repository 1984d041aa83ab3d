// src/lib.rs

//! pyoe — BitBake recipes from PyPI metadata
//!
//! Resolves a package (or a requirements manifest) into its full
//! transitive runtime dependency closure against a package index, maps
//! each package's free-text license onto the identifiers OpenEmbedded's
//! licensing policy accepts, and emits one BitBake recipe per package
//! plus a `PREFERRED_VERSION` pin file.
//!
//! # Architecture
//!
//! - Resolution is an explicit breadth-first worklist over a pluggable
//!   `MetadataSource`; each distinct package name is fetched exactly once
//!   and pinned to the version seen first, which makes cyclic dependency
//!   graphs terminate naturally
//! - Extras (`requests[security]`) become synthetic packagegroup recipes
//! - License mapping consults a persistent correction table and falls
//!   back to a pluggable policy (prompt, fixed default, or fail fast)
//! - Sdists are downloaded, verified against the index digests, and
//!   inspected for the license file `LIC_FILES_CHKSUM` points at

pub mod archive;
mod error;
pub mod index;
pub mod license;
pub mod manifest;
pub mod progress;
pub mod recipe;
pub mod resolver;
pub mod version;

pub use error::{Error, Result};
pub use index::{IndexClient, DEFAULT_INDEX_URL};
pub use license::{LicenseMap, LicenseMapper};
pub use progress::{ResolveProgress, SilentProgress, TreeProgress};
pub use recipe::{Emitter, PythonVariant};
pub use resolver::{MetadataSource, PackageRecord, RequirementSpec, ResolvedNode, Resolver};
pub use version::{PyVersion, VersionConstraint};
