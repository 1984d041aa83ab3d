// src/resolver/spec.rs

//! Requirement specifiers
//!
//! Parses the PEP 508-style dependency declarations that appear on the
//! command line, in requirements manifests, and in a project's
//! requires_dist metadata. Only the parts that drive resolution are kept:
//! name, requested extras, version constraint, and the `extra == "..."`
//! environment marker that gates a dependency behind a parent extra.

use crate::error::{Error, Result};
use crate::version::VersionConstraint;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A requested package: one edge in the dependency graph
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementSpec {
    /// Package name as written on the edge
    pub name: String,
    /// Version constraint, if the edge carries one
    pub constraint: Option<VersionConstraint>,
    /// Extras requested on this edge (`requests[security]` → ["security"])
    pub extras: Vec<String>,
    /// Parent extra that activates this edge (`; extra == "secure"`)
    pub extra_marker: Option<String>,
}

fn spec_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)\s*(?:\[([^\]]*)\])?\s*(.*)$")
            .expect("specifier pattern is valid")
    })
}

fn extra_marker_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"extra\s*==\s*['"]([^'"]+)['"]"#).expect("marker pattern is valid")
    })
}

impl RequirementSpec {
    /// Construct a spec for a bare name with no constraint
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            constraint: None,
            extras: Vec::new(),
            extra_marker: None,
        }
    }

    /// Parse a requirement specifier
    ///
    /// Accepted shapes:
    /// - `requests`
    /// - `requests==2.8.1`
    /// - `requests[security,socks]>=2.8`
    /// - `requests (>=2.8.1)` (older metadata parenthesizes constraints)
    /// - `pyOpenSSL>=0.14; extra == 'secure'`
    /// - `idna; python_version < "3"` (non-extra markers are ignored)
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let (head, marker) = match input.split_once(';') {
            Some((h, m)) => (h.trim(), Some(m.trim())),
            None => (input, None),
        };

        let caps = spec_pattern()
            .captures(head)
            .filter(|c| !c[1].is_empty())
            .ok_or_else(|| Error::Spec(input.to_string()))?;

        let name = caps[1].to_string();

        let extras: Vec<String> = caps
            .get(2)
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        // Constraint text may be parenthesized
        let mut constraint_text = caps.get(3).map(|m| m.as_str().trim()).unwrap_or_default();
        if constraint_text.starts_with('(') && constraint_text.ends_with(')') {
            constraint_text = constraint_text[1..constraint_text.len() - 1].trim();
        }

        let constraint = if constraint_text.is_empty() {
            None
        } else {
            Some(
                VersionConstraint::parse(constraint_text)
                    .map_err(|_| Error::Spec(input.to_string()))?,
            )
        };

        let extra_marker = marker
            .and_then(|m| extra_marker_pattern().captures(m))
            .map(|c| c[1].to_string());

        Ok(Self {
            name,
            constraint,
            extras,
            extra_marker,
        })
    }

    /// Normalized identity key (PEP 503): lower-case with runs of `-`, `_`,
    /// `.` collapsed to a single `-`
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }
}

impl fmt::Display for RequirementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.extras.is_empty() {
            write!(f, "[{}]", self.extras.join(","))?;
        }
        if let Some(ref c) = self.constraint {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Normalize a package name into its index identity
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !last_was_sep {
                out.push('-');
            }
            last_was_sep = true;
        } else {
            out.extend(c.to_lowercase());
            last_was_sep = false;
        }
    }
    out
}
