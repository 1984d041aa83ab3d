// src/progress.rs

//! Resolution progress reporting
//!
//! The resolver reports each package it visits through this trait so the
//! CLI can render the familiar indented tree while tests and library
//! callers stay quiet.

use crate::version::PyVersion;

/// Receives one callback per package visited during resolution
pub trait ResolveProgress {
    /// A package is about to be fetched
    ///
    /// `requested` is the version pinned by the edge that reached it, if
    /// any; `extra` is set when the visit comes from expanding an extra;
    /// `depth` is the worklist depth of the edge.
    fn package(
        &mut self,
        name: &str,
        extra: Option<&str>,
        requested: Option<&PyVersion>,
        depth: usize,
    );
}

/// No-op progress for scripted and test usage
#[derive(Debug, Default)]
pub struct SilentProgress;

impl ResolveProgress for SilentProgress {
    fn package(&mut self, _: &str, _: Option<&str>, _: Option<&PyVersion>, _: usize) {}
}

/// Prints an indented dependency tree to stdout
///
/// ```text
///   requests
///   |-- chardet
///   |---- pyOpenSSL[security]==0.14
/// ```
#[derive(Debug, Default)]
pub struct TreeProgress;

impl ResolveProgress for TreeProgress {
    fn package(
        &mut self,
        name: &str,
        extra: Option<&str>,
        requested: Option<&PyVersion>,
        depth: usize,
    ) {
        let indent = if depth > 0 {
            format!("|{} ", "-".repeat(depth * 2))
        } else {
            String::new()
        };
        let extra_str = extra.map(|e| format!("[{}]", e)).unwrap_or_default();
        let version_str = requested.map(|v| format!("=={}", v)).unwrap_or_default();
        println!("  {}{}{}{}", indent, name, extra_str, version_str);
    }
}
