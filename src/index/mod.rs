// src/index/mod.rs

//! Package index access
//!
//! The HTTP client fetches project documents and source archives; the
//! `MetadataSource` implementation adapts a document into the record the
//! resolver consumes.

mod client;
mod metadata;

pub use client::{IndexClient, DEFAULT_INDEX_URL};
pub use metadata::{Digests, ProjectDocument, ProjectInfo, ReleaseFile};

use crate::error::{Error, Result};
use crate::resolver::{MetadataSource, PackageRecord, RequirementSpec, SourceInfo};
use crate::version::PyVersion;
use tracing::warn;

impl MetadataSource for IndexClient {
    fn fetch(&self, name: &str, pinned: Option<&PyVersion>) -> Result<PackageRecord> {
        let document = self.fetch_project(name, pinned)?;
        record_from_document(document)
    }
}

/// Adapt a project document into a resolver record
///
/// A release without a source distribution cannot produce a recipe, so
/// it fails the run here. Malformed requires_dist entries are logged and
/// skipped rather than failing; index metadata contains them in the wild
/// and one bad specifier should not sink an otherwise resolvable graph.
fn record_from_document(document: ProjectDocument) -> Result<PackageRecord> {
    let source = document.sdist().map(|f| SourceInfo {
        url: f.url.clone(),
        md5: f.digests.md5.clone(),
        sha256: f.digests.sha256.clone(),
    });

    let info = document.info;
    let version = PyVersion::parse(&info.version)
        .map_err(|_| Error::Index(format!("Index returned empty version for '{}'", info.name)))?;

    let source = source.ok_or_else(|| Error::NoSdist {
        name: info.name.clone(),
        version: version.to_string(),
    })?;

    let mut requires = Vec::new();
    for line in info.requires_dist.unwrap_or_default() {
        match RequirementSpec::parse(&line) {
            Ok(spec) => requires.push(spec),
            Err(_) => warn!("{}: skipping unparseable requirement '{}'", info.name, line),
        }
    }

    Ok(PackageRecord {
        name: info.name,
        version,
        license_raw: info.license.unwrap_or_default(),
        summary: info.summary.unwrap_or_default(),
        homepage: info.home_page.unwrap_or_default(),
        author: info.author.unwrap_or_default(),
        author_email: info.author_email.unwrap_or_default(),
        requires,
        source: Some(source),
    })
}
