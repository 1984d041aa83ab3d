// src/resolver/node.rs

//! Resolved package nodes
//!
//! A `ResolvedNode` is a package pinned to one version, created the first
//! time its name is encountered during a resolution run and never mutated
//! afterwards. Synthetic extras nodes (`is_extra_group`) represent
//! `<package>[<extra>]` packagegroups and carry no source archive.

use crate::resolver::spec::{normalize_name, RequirementSpec};
use crate::version::PyVersion;
use std::collections::BTreeMap;

/// Source distribution info published by the index for one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    /// Download URL for the sdist archive
    pub url: String,
    /// MD5 digest published by the index, if any
    pub md5: Option<String>,
    /// SHA-256 digest published by the index, if any
    pub sha256: Option<String>,
}

/// A single package pinned to one version
#[derive(Debug, Clone)]
pub struct ResolvedNode {
    /// Package name (for extras groups: `<base>-<extra>`)
    pub name: String,
    /// Version pinned on first encounter
    pub version: PyVersion,
    /// License string exactly as the index published it
    pub license_raw: String,
    /// One-line description
    pub summary: String,
    /// Project homepage
    pub homepage: String,
    /// Author name
    pub author: String,
    /// Author e-mail
    pub author_email: String,
    /// Runtime requirements, declaration order
    pub requirements: Vec<RequirementSpec>,
    /// Extra name → the additional requirements that extra pulls in
    pub extras_declared: BTreeMap<String, Vec<RequirementSpec>>,
    /// Source distribution, absent for extras groups
    pub source: Option<SourceInfo>,
    /// Whether this is a generated extras packagegroup
    pub is_extra_group: bool,
}

impl ResolvedNode {
    /// Normalized identity key for this node's name
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Build the synthetic node for `<base>[<extra>]`
    ///
    /// The group depends on the base package and on every member of the
    /// extra; it inherits the base's descriptive metadata but owns no
    /// license or source archive.
    pub fn extra_group(base: &ResolvedNode, extra: &str, members: &[RequirementSpec]) -> Self {
        let mut requirements = Vec::with_capacity(members.len() + 1);
        requirements.push(RequirementSpec::new(&base.name));
        requirements.extend(members.iter().cloned());

        Self {
            name: format!("{}-{}", base.name, extra),
            version: base.version.clone(),
            license_raw: String::new(),
            summary: base.summary.clone(),
            homepage: base.homepage.clone(),
            author: base.author.clone(),
            author_email: base.author_email.clone(),
            requirements,
            extras_declared: BTreeMap::new(),
            source: None,
            is_extra_group: true,
        }
    }
}
