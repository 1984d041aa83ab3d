// tests/resolution.rs

//! Integration tests for transitive dependency resolution
//!
//! These drive the resolver against an in-memory metadata source, the
//! same seam the real index client plugs into.

use pyoe::progress::SilentProgress;
use pyoe::resolver::{
    normalize_name, MetadataSource, PackageRecord, RequirementSpec, Resolver, SourceInfo,
};
use pyoe::version::PyVersion;
use pyoe::Error;
use std::cell::RefCell;
use std::collections::HashMap;

/// One package the stub index knows about
struct StubPackage {
    version: &'static str,
    license: &'static str,
    requires: Vec<&'static str>,
}

/// In-memory metadata source with a fetch counter per name
struct StubSource {
    packages: HashMap<String, StubPackage>,
    fetches: RefCell<HashMap<String, usize>>,
}

impl StubSource {
    fn new() -> Self {
        Self {
            packages: HashMap::new(),
            fetches: RefCell::new(HashMap::new()),
        }
    }

    fn package(mut self, name: &str, version: &'static str, requires: &[&'static str]) -> Self {
        self.packages.insert(
            normalize_name(name),
            StubPackage {
                version,
                license: "MIT License",
                requires: requires.to_vec(),
            },
        );
        self
    }

    fn fetch_count(&self, name: &str) -> usize {
        self.fetches
            .borrow()
            .get(&normalize_name(name))
            .copied()
            .unwrap_or(0)
    }
}

impl MetadataSource for StubSource {
    fn fetch(&self, name: &str, pinned: Option<&PyVersion>) -> pyoe::Result<PackageRecord> {
        let key = normalize_name(name);
        *self.fetches.borrow_mut().entry(key.clone()).or_insert(0) += 1;

        let pkg = self
            .packages
            .get(&key)
            .ok_or_else(|| Error::PackageNotFound {
                name: name.to_string(),
            })?;

        // The index serves exactly the pinned release when one is asked for
        let version = match pinned {
            Some(v) => v.clone(),
            None => PyVersion::parse(pkg.version)?,
        };

        let requires = pkg
            .requires
            .iter()
            .map(|line| RequirementSpec::parse(line))
            .collect::<pyoe::Result<Vec<_>>>()?;

        Ok(PackageRecord {
            name: name.to_string(),
            version: version.clone(),
            license_raw: pkg.license.to_string(),
            summary: format!("{name} summary"),
            homepage: "https://example.com".to_string(),
            author: "Stub Author".to_string(),
            author_email: "stub@example.com".to_string(),
            requires,
            source: Some(SourceInfo {
                url: format!("https://files/{name}-{version}.tar.gz"),
                md5: None,
                sha256: None,
            }),
        })
    }
}

fn names(nodes: &[pyoe::ResolvedNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

fn roots(specs: &[&str]) -> Vec<RequirementSpec> {
    specs
        .iter()
        .map(|s| RequirementSpec::parse(s).unwrap())
        .collect()
}

#[test]
fn cyclic_graph_terminates_with_each_package_once() {
    let source = StubSource::new()
        .package("a", "1.0", &["b"])
        .package("b", "1.0", &["a"]);

    let resolver = Resolver::new(&source, false);
    let nodes = resolver.resolve(&roots(&["a"]), &mut SilentProgress).unwrap();

    assert_eq!(names(&nodes), vec!["a", "b"]);
    assert_eq!(source.fetch_count("a"), 1);
    assert_eq!(source.fetch_count("b"), 1);
}

#[test]
fn self_dependency_terminates() {
    let source = StubSource::new().package("loop", "0.1", &["loop"]);

    let resolver = Resolver::new(&source, false);
    let nodes = resolver
        .resolve(&roots(&["loop"]), &mut SilentProgress)
        .unwrap();

    assert_eq!(names(&nodes), vec!["loop"]);
}

#[test]
fn duplicate_edges_resolve_once_with_first_seen_version() {
    // a pins b==1.0; c reaches b again with ==2.0, which is ignored
    let source = StubSource::new()
        .package("a", "1.0", &["b==1.0", "c"])
        .package("b", "9.9", &[])
        .package("c", "1.0", &["b==2.0"]);

    let resolver = Resolver::new(&source, false);
    let nodes = resolver.resolve(&roots(&["a"]), &mut SilentProgress).unwrap();

    assert_eq!(names(&nodes), vec!["a", "b", "c"]);
    let b = &nodes[1];
    assert_eq!(b.version.as_str(), "1.0");
    assert_eq!(source.fetch_count("b"), 1);
}

#[test]
fn name_normalization_deduplicates_spelling_variants() {
    let source = StubSource::new()
        .package("a", "1.0", &["Flask_Login", "flask-login"])
        .package("flask-login", "0.6", &[]);

    let resolver = Resolver::new(&source, false);
    let nodes = resolver.resolve(&roots(&["a"]), &mut SilentProgress).unwrap();

    assert_eq!(nodes.len(), 2);
    assert_eq!(source.fetch_count("flask-login"), 1);
}

#[test]
fn output_is_breadth_first_in_declaration_order() {
    // a -> [b, c], b -> [c]: c must come from a's declaration, not b's
    let source = StubSource::new()
        .package("a", "1.0", &["b", "c"])
        .package("b", "1.0", &["c"])
        .package("c", "1.0", &[]);

    let resolver = Resolver::new(&source, false);
    let nodes = resolver.resolve(&roots(&["a"]), &mut SilentProgress).unwrap();

    assert_eq!(names(&nodes), vec!["a", "b", "c"]);
}

#[test]
fn extras_expand_into_group_nodes() {
    let source = StubSource::new()
        .package("a", "1.0", &["d; extra == 'secure'"])
        .package("d", "2.0", &[]);

    let resolver = Resolver::new(&source, true);
    let nodes = resolver.resolve(&roots(&["a"]), &mut SilentProgress).unwrap();

    assert_eq!(names(&nodes), vec!["a", "a-secure", "d"]);

    let group = &nodes[1];
    assert!(group.is_extra_group);
    assert!(group.source.is_none());
    let dep_names: Vec<&str> = group.requirements.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(dep_names, vec!["a", "d"]);
    // The group pins the base version
    assert_eq!(group.version.as_str(), "1.0");
}

#[test]
fn extras_are_ignored_without_the_flag() {
    let source = StubSource::new()
        .package("a", "1.0", &["d; extra == 'secure'"])
        .package("d", "2.0", &[]);

    let resolver = Resolver::new(&source, false);
    let nodes = resolver.resolve(&roots(&["a"]), &mut SilentProgress).unwrap();

    assert_eq!(names(&nodes), vec!["a"]);
    assert_eq!(source.fetch_count("d"), 0);
    // Declared extras are still recorded on the node
    assert!(nodes[0].extras_declared.contains_key("secure"));
}

#[test]
fn repeat_extra_edges_expand_only_once() {
    // b is reached with [cli] twice; the group must not be emitted twice
    let source = StubSource::new()
        .package("a", "1.0", &["b[cli]", "c"])
        .package("b", "1.0", &["e; extra == 'cli'"])
        .package("c", "1.0", &["b[cli]"])
        .package("e", "1.0", &[]);

    let resolver = Resolver::new(&source, true);
    let nodes = resolver.resolve(&roots(&["a"]), &mut SilentProgress).unwrap();

    let group_count = nodes.iter().filter(|n| n.name == "b-cli").count();
    assert_eq!(group_count, 1);
    assert_eq!(source.fetch_count("b"), 1);
    assert_eq!(source.fetch_count("e"), 1);
}

#[test]
fn unknown_extra_on_edge_is_tolerated() {
    let source = StubSource::new()
        .package("a", "1.0", &["b[nosuch]"])
        .package("b", "1.0", &[]);

    let resolver = Resolver::new(&source, true);
    let nodes = resolver.resolve(&roots(&["a"]), &mut SilentProgress).unwrap();

    assert_eq!(names(&nodes), vec!["a", "b"]);
}

#[test]
fn missing_package_aborts_the_run() {
    let source = StubSource::new().package("a", "1.0", &["ghost"]);

    let resolver = Resolver::new(&source, false);
    let err = resolver
        .resolve(&roots(&["a"]), &mut SilentProgress)
        .unwrap_err();

    assert!(matches!(err, Error::PackageNotFound { name } if name == "ghost"));
}

#[test]
fn pinned_root_version_is_requested_from_the_source() {
    let source = StubSource::new().package("requests", "2.99", &[]);

    let resolver = Resolver::new(&source, false);
    let nodes = resolver
        .resolve(&roots(&["requests==2.8.1"]), &mut SilentProgress)
        .unwrap();

    assert_eq!(nodes[0].version.as_str(), "2.8.1");
}

#[test]
fn requests_closure_end_to_end() {
    let source = StubSource::new()
        .package("requests", "2.8.1", &["chardet", "idna", "urllib3", "certifi"])
        .package("chardet", "3.0.4", &[])
        .package("idna", "2.8", &[])
        .package("urllib3", "1.25", &[])
        .package("certifi", "2019.3.9", &[]);

    let resolver = Resolver::new(&source, false);
    let nodes = resolver
        .resolve(&roots(&["requests"]), &mut SilentProgress)
        .unwrap();

    assert_eq!(
        names(&nodes),
        vec!["requests", "chardet", "idna", "urllib3", "certifi"]
    );
    for name in ["requests", "chardet", "idna", "urllib3", "certifi"] {
        assert_eq!(source.fetch_count(name), 1);
    }
}
