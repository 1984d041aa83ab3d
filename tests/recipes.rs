// tests/recipes.rs

//! Integration tests for recipe emission
//!
//! Resolve against a stub source, map licenses, and write the recipe
//! artifacts into a temp directory, then check what landed on disk.

use pyoe::license::{DefaultResolver, LicenseMap, LicenseMapper};
use pyoe::progress::SilentProgress;
use pyoe::recipe::{Emitter, PythonVariant};
use pyoe::resolver::{MetadataSource, PackageRecord, RequirementSpec, Resolver, SourceInfo};
use pyoe::version::PyVersion;
use std::collections::HashMap;

struct StubSource {
    packages: HashMap<String, (&'static str, &'static str, Vec<&'static str>)>,
}

impl StubSource {
    fn new() -> Self {
        Self {
            packages: HashMap::new(),
        }
    }

    fn package(
        mut self,
        name: &str,
        version: &'static str,
        license: &'static str,
        requires: &[&'static str],
    ) -> Self {
        self.packages
            .insert(name.to_string(), (version, license, requires.to_vec()));
        self
    }
}

impl MetadataSource for StubSource {
    fn fetch(&self, name: &str, pinned: Option<&PyVersion>) -> pyoe::Result<PackageRecord> {
        let (version, license, requires) =
            self.packages
                .get(name)
                .ok_or_else(|| pyoe::Error::PackageNotFound {
                    name: name.to_string(),
                })?;

        let version = match pinned {
            Some(v) => v.clone(),
            None => PyVersion::parse(version)?,
        };

        Ok(PackageRecord {
            name: name.to_string(),
            version: version.clone(),
            license_raw: license.to_string(),
            summary: format!("{name} summary"),
            homepage: format!("https://example.com/{name}"),
            author: "Stub Author".to_string(),
            author_email: "stub@example.com".to_string(),
            requires: requires
                .iter()
                .map(|line| RequirementSpec::parse(line))
                .collect::<pyoe::Result<Vec<_>>>()?,
            source: Some(SourceInfo {
                url: format!("https://files/{name}-{version}.tar.gz"),
                md5: Some("11".to_string()),
                sha256: Some("22".to_string()),
            }),
        })
    }
}

#[test]
fn full_run_writes_recipes_pins_and_license_map() {
    let source = StubSource::new()
        .package("requests", "2.8.1", "Apache 2.0", &["chardet", "idna"])
        .package("chardet", "3.0.4", "LGPL", &[])
        .package("idna", "2.8", "Undetermined Custom License", &[]);

    let resolver = Resolver::new(&source, false);
    let nodes = resolver
        .resolve(&[RequirementSpec::new("requests")], &mut SilentProgress)
        .unwrap();

    let outdir = tempfile::tempdir().unwrap();
    let emitter = Emitter::new(outdir.path(), PythonVariant::Python);
    let mut mapper = LicenseMapper::new(
        LicenseMap::builtin(),
        Box::new(DefaultResolver::new("CLOSED")),
    );

    for node in &nodes {
        let license = mapper.map_license(&node.license_raw).unwrap();
        emitter.emit(node, Some(&license), None).unwrap();
    }
    emitter.write_preferred_versions(&nodes).unwrap();

    let map = mapper.into_map();
    let map_path = outdir.path().join("licenses.json");
    map.save(&map_path).unwrap();

    // One recipe per node
    for basename in [
        "python-requests_2.8.1.bb",
        "python-chardet_3.0.4.bb",
        "python-idna_2.8.bb",
    ] {
        assert!(outdir.path().join(basename).is_file(), "missing {basename}");
    }

    let requests = std::fs::read_to_string(outdir.path().join("python-requests_2.8.1.bb")).unwrap();
    assert!(requests.contains("LICENSE = \"Apache-2.0\""));
    assert!(requests.contains("RDEPENDS_${PN} = \"python-chardet python-idna\""));
    assert!(requests.contains("SRC_URI = \"https://files/requests-2.8.1.tar.gz\""));
    assert!(requests.contains("inherit setuptools\n"));

    // The unknown license fell back to the default and was recorded
    let idna = std::fs::read_to_string(outdir.path().join("python-idna_2.8.bb")).unwrap();
    assert!(idna.contains("LICENSE = \"CLOSED\""));

    let saved = std::fs::read_to_string(&map_path).unwrap();
    assert!(saved.contains("undetermined custom license"));
    assert!(saved.contains("CLOSED"));

    // Every node appears exactly once in the pin file
    let pins =
        std::fs::read_to_string(outdir.path().join("python-versions.inc")).unwrap();
    let lines: Vec<&str> = pins.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "PREFERRED_VERSION_python-requests = \"2.8.1\"");
    assert!(lines.contains(&"PREFERRED_VERSION_python-chardet = \"3.0.4\""));
    assert!(lines.contains(&"PREFERRED_VERSION_python-idna = \"2.8\""));
}

#[test]
fn extras_run_emits_packagegroup_recipe() {
    let source = StubSource::new()
        .package(
            "requests",
            "2.8.1",
            "Apache 2.0",
            &["chardet", "pyOpenSSL; extra == 'security'"],
        )
        .package("chardet", "3.0.4", "LGPL", &[])
        .package("pyOpenSSL", "19.0", "Apache 2.0", &[]);

    let resolver = Resolver::new(&source, true);
    let nodes = resolver
        .resolve(&[RequirementSpec::new("requests")], &mut SilentProgress)
        .unwrap();

    let outdir = tempfile::tempdir().unwrap();
    let emitter = Emitter::new(outdir.path(), PythonVariant::Python3);
    let mut mapper = LicenseMapper::new(
        LicenseMap::builtin(),
        Box::new(DefaultResolver::new("CLOSED")),
    );

    for node in &nodes {
        let license = if node.is_extra_group {
            None
        } else {
            Some(mapper.map_license(&node.license_raw).unwrap())
        };
        emitter.emit(node, license.as_deref(), None).unwrap();
    }
    emitter.write_preferred_versions(&nodes).unwrap();

    let group_path = outdir.path().join("python3-requests-security_2.8.1.bb");
    assert!(group_path.is_file());
    let group = std::fs::read_to_string(group_path).unwrap();
    assert!(group.contains("inherit packagegroup"));
    assert!(group.contains("RDEPENDS_${PN} = \"python3-requests python3-pyopenssl\""));

    // The group node pins the base version in the include file too
    let pins =
        std::fs::read_to_string(outdir.path().join("python3-versions.inc")).unwrap();
    assert!(
        pins.contains("PREFERRED_VERSION_python3-requests-security = \"2.8.1\"")
    );
}
