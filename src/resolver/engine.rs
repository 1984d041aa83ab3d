// src/resolver/engine.rs

//! Transitive dependency resolution
//!
//! Walks a package's declared requirements breadth-first with an explicit
//! worklist, deduplicating by normalized name. Each distinct name costs
//! exactly one metadata fetch; the version resolved on first encounter
//! wins, and constraints attached to later edges to the same name are
//! ignored rather than intersected. Cycles therefore terminate naturally.
//!
//! Extras are expanded into synthetic packagegroup nodes. The resolver
//! tracks which extras have already been expanded per name so that a
//! repeat encounter with a new extra set expands only the delta.

use crate::error::Result;
use crate::progress::ResolveProgress;
use crate::resolver::node::{ResolvedNode, SourceInfo};
use crate::resolver::spec::RequirementSpec;
use crate::version::PyVersion;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use tracing::{debug, warn};

/// Metadata record for one package at one resolved version
///
/// This is what the resolver needs from the index: identity, license,
/// descriptive fields for the recipe, the declared requirements in
/// declaration order (extra-marked entries included), and the sdist.
#[derive(Debug, Clone)]
pub struct PackageRecord {
    pub name: String,
    pub version: PyVersion,
    pub license_raw: String,
    pub summary: String,
    pub homepage: String,
    pub author: String,
    pub author_email: String,
    pub requires: Vec<RequirementSpec>,
    pub source: Option<SourceInfo>,
}

/// Upstream metadata source
///
/// `pinned` is the exact version to fetch when the reaching edge pins one;
/// `None` means whatever the index considers latest. Implementations fail
/// with `Error::PackageNotFound` / `Error::VersionNotFound` when the index
/// cannot produce a record.
pub trait MetadataSource {
    fn fetch(&self, name: &str, pinned: Option<&PyVersion>) -> Result<PackageRecord>;
}

/// One pending edge on the worklist
#[derive(Debug)]
struct WorkItem {
    spec: RequirementSpec,
    depth: usize,
    via_extra: Option<String>,
}

/// Per-name resolution state, scoped to one run
#[derive(Debug)]
struct VisitedEntry {
    node_index: usize,
    expanded_extras: BTreeSet<String>,
}

/// Transitive dependency resolver
pub struct Resolver<'a> {
    source: &'a dyn MetadataSource,
    include_extras: bool,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over the given metadata source
    pub fn new(source: &'a dyn MetadataSource, include_extras: bool) -> Self {
        Self {
            source,
            include_extras,
        }
    }

    /// Resolve the transitive closure of `roots`
    ///
    /// Output order is a declaration-order breadth-first traversal: a
    /// package appears before any package first reached through it, and a
    /// node's dependencies are enqueued in the order the metadata declares
    /// them. Each distinct normalized name appears at most once; synthetic
    /// extras groups follow their base node.
    pub fn resolve(
        &self,
        roots: &[RequirementSpec],
        progress: &mut dyn ResolveProgress,
    ) -> Result<Vec<ResolvedNode>> {
        let mut output: Vec<ResolvedNode> = Vec::new();
        let mut visited: HashMap<String, VisitedEntry> = HashMap::new();
        let mut queue: VecDeque<WorkItem> = roots
            .iter()
            .map(|spec| WorkItem {
                spec: spec.clone(),
                depth: 0,
                via_extra: None,
            })
            .collect();

        while let Some(item) = queue.pop_front() {
            let key = item.spec.key();

            if visited.contains_key(&key) {
                debug!("{} already resolved, skipping fetch", item.spec.name);
                // A repeat edge may still carry extras the first encounter
                // did not expand.
                if self.include_extras && !item.spec.extras.is_empty() {
                    let requested: BTreeSet<String> = item.spec.extras.iter().cloned().collect();
                    self.expand_extras(
                        &key,
                        requested,
                        item.depth,
                        &mut output,
                        &mut visited,
                        &mut queue,
                    );
                }
                continue;
            }

            let pinned = item
                .spec
                .constraint
                .as_ref()
                .and_then(|c| c.pin_candidate())
                .cloned();
            progress.package(
                &item.spec.name,
                item.via_extra.as_deref(),
                pinned.as_ref(),
                item.depth,
            );

            let record = self.source.fetch(&item.spec.name, pinned.as_ref())?;
            debug!("resolved {} to version {}", record.name, record.version);

            let node_index = output.len();
            output.push(build_node(record));
            visited.insert(
                key.clone(),
                VisitedEntry {
                    node_index,
                    expanded_extras: BTreeSet::new(),
                },
            );

            for req in output[node_index].requirements.clone() {
                queue.push_back(WorkItem {
                    spec: req,
                    depth: item.depth + 1,
                    via_extra: None,
                });
            }

            if self.include_extras {
                let mut wanted: BTreeSet<String> =
                    output[node_index].extras_declared.keys().cloned().collect();
                wanted.extend(item.spec.extras.iter().cloned());
                self.expand_extras(&key, wanted, item.depth, &mut output, &mut visited, &mut queue);
            }
        }

        Ok(output)
    }

    /// Expand the not-yet-expanded subset of `extras` for a visited name
    ///
    /// Members are enqueued before the group node is appended, so the
    /// group follows its base in the output while the members resolve in
    /// worklist order behind it.
    fn expand_extras(
        &self,
        key: &str,
        extras: BTreeSet<String>,
        depth: usize,
        output: &mut Vec<ResolvedNode>,
        visited: &mut HashMap<String, VisitedEntry>,
        queue: &mut VecDeque<WorkItem>,
    ) {
        for extra in extras {
            let entry = visited.get_mut(key).expect("extras expand on visited name");
            if !entry.expanded_extras.insert(extra.clone()) {
                continue;
            }
            let base_index = entry.node_index;

            let Some(members) = output[base_index].extras_declared.get(&extra).cloned() else {
                warn!("extra '{}' is not declared by {}", extra, output[base_index].name);
                continue;
            };

            for member in &members {
                queue.push_back(WorkItem {
                    spec: member.clone(),
                    depth: depth + 1,
                    via_extra: Some(extra.clone()),
                });
            }

            let group = ResolvedNode::extra_group(&output[base_index], &extra, &members);
            output.push(group);
        }
    }
}

/// Turn an index record into a resolved node
///
/// Requirements are partitioned on their `extra == "..."` marker: unmarked
/// entries are the node's runtime requirements, marked entries are grouped
/// under the extra that activates them (with the marker cleared, since the
/// map key now carries it). Without extras expansion the marked entries
/// still populate `extras_declared` but nothing enqueues them.
fn build_node(record: PackageRecord) -> ResolvedNode {
    let mut requirements = Vec::new();
    let mut extras_declared: BTreeMap<String, Vec<RequirementSpec>> = BTreeMap::new();

    for req in record.requires {
        match req.extra_marker.clone() {
            None => requirements.push(req),
            Some(extra) => {
                let mut member = req;
                member.extra_marker = None;
                extras_declared.entry(extra).or_default().push(member);
            }
        }
    }

    ResolvedNode {
        name: record.name,
        version: record.version,
        license_raw: record.license_raw,
        summary: record.summary,
        homepage: record.homepage,
        author: record.author,
        author_email: record.author_email,
        requirements,
        extras_declared,
        source: record.source,
        is_extra_group: false,
    }
}
