// src/resolver/mod.rs

//! Dependency resolution
//!
//! Walks declared requirements transitively over a pluggable metadata
//! source, producing a deduplicated, declaration-ordered list of resolved
//! nodes including synthetic extras packagegroups.

mod engine;
mod node;
mod spec;

pub use engine::{MetadataSource, PackageRecord, Resolver};
pub use node::{ResolvedNode, SourceInfo};
pub use spec::{normalize_name, RequirementSpec};
