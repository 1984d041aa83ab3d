// src/index/metadata.rs

//! Package index metadata data structures
//!
//! Types for the JSON project document served by the index
//! (`/pypi/<name>/json` and `/pypi/<name>/<version>/json`). Only the
//! fields the recipe generator consumes are modeled; everything else in
//! the document is ignored during deserialization.

use serde::Deserialize;

/// The project document for one package at one version
#[derive(Debug, Deserialize)]
pub struct ProjectDocument {
    pub info: ProjectInfo,
    /// Release files for the resolved version
    #[serde(default)]
    pub urls: Vec<ReleaseFile>,
}

/// The `info` block of a project document
#[derive(Debug, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub home_page: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    /// Declared requirement specifiers, declaration order
    #[serde(default)]
    pub requires_dist: Option<Vec<String>>,
}

/// One downloadable file of a release
#[derive(Debug, Deserialize)]
pub struct ReleaseFile {
    pub packagetype: String,
    pub url: String,
    #[serde(default)]
    pub digests: Digests,
}

/// Checksums the index publishes for a release file
#[derive(Debug, Default, Deserialize)]
pub struct Digests {
    #[serde(default)]
    pub md5: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

impl ProjectDocument {
    /// The source distribution for this release, if one was published
    pub fn sdist(&self) -> Option<&ReleaseFile> {
        self.urls.iter().find(|f| f.packagetype == "sdist")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_document() {
        let doc: ProjectDocument = serde_json::from_str(
            r#"{
                "info": {"name": "chardet", "version": "3.0.4"},
                "urls": [
                    {"packagetype": "bdist_wheel", "url": "https://files/ch.whl"},
                    {
                        "packagetype": "sdist",
                        "url": "https://files/chardet-3.0.4.tar.gz",
                        "digests": {"md5": "abc", "sha256": "def"}
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.info.name, "chardet");
        assert_eq!(doc.info.version, "3.0.4");
        let sdist = doc.sdist().unwrap();
        assert!(sdist.url.ends_with(".tar.gz"));
        assert_eq!(sdist.digests.sha256.as_deref(), Some("def"));
    }

    #[test]
    fn test_missing_urls_means_no_sdist() {
        let doc: ProjectDocument =
            serde_json::from_str(r#"{"info": {"name": "x", "version": "1.0"}}"#).unwrap();
        assert!(doc.sdist().is_none());
    }
}
