// src/recipe/emitter.rs

//! Recipe rendering and writing
//!
//! One `.bb` file per resolved node: setuptools recipes for real
//! distributions, packagegroup recipes for synthetic extras nodes, plus
//! the `PREFERRED_VERSION` include file that pins every resolved version
//! for the build.

use crate::archive::SdistLayout;
use crate::error::{Error, Result};
use crate::resolver::ResolvedNode;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Which Python the recipes target
///
/// Drives the recipe name prefix, the `PREFERRED_VERSION` variable names,
/// and whether `setuptools` or `setuptools3` is inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PythonVariant {
    #[default]
    Python,
    Python3,
}

impl PythonVariant {
    /// Recipe name prefix ("python" or "python3")
    pub fn prefix(&self) -> &'static str {
        match self {
            PythonVariant::Python => "python",
            PythonVariant::Python3 => "python3",
        }
    }

    /// The setuptools bbclass to inherit
    pub fn setuptools_class(&self) -> &'static str {
        match self {
            PythonVariant::Python => "setuptools",
            PythonVariant::Python3 => "setuptools3",
        }
    }
}

impl FromStr for PythonVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "python" => Ok(PythonVariant::Python),
            "python3" => Ok(PythonVariant::Python3),
            other => Err(Error::Spec(format!("Unknown python variant '{other}'"))),
        }
    }
}

/// Normalize a package name for use in a recipe file name
pub fn bb_name(name: &str) -> String {
    name.to_lowercase().replace(['_', '.'], "-")
}

/// Writes recipe artifacts into an output directory
pub struct Emitter {
    outdir: PathBuf,
    variant: PythonVariant,
}

impl Emitter {
    pub fn new(outdir: &Path, variant: PythonVariant) -> Self {
        Self {
            outdir: outdir.to_path_buf(),
            variant,
        }
    }

    /// Recipe file name for a node: `<variant>-<bbname>_<version>.bb`
    pub fn recipe_basename(&self, node: &ResolvedNode) -> String {
        format!(
            "{}-{}_{}.bb",
            self.variant.prefix(),
            bb_name(&node.name),
            node.version
        )
    }

    /// Write the recipe for one node, returning its path
    ///
    /// `license` is the approved identifier (absent for extras groups,
    /// which carry no license of their own). `layout` is the unpacked
    /// sdist inspection; without it the checksum line is omitted and `S`
    /// falls back to the conventional `<name>-<version>` directory.
    pub fn emit(
        &self,
        node: &ResolvedNode,
        license: Option<&str>,
        layout: Option<&SdistLayout>,
    ) -> Result<PathBuf> {
        let path = self.outdir.join(self.recipe_basename(node));

        let content = if node.is_extra_group {
            self.render_group(node)
        } else {
            self.render_package(node, license.unwrap_or_default(), layout)
        };

        fs::write(&path, content)?;
        info!("Wrote recipe {}", path.display());
        Ok(path)
    }

    fn render_package(
        &self,
        node: &ResolvedNode,
        license: &str,
        layout: Option<&SdistLayout>,
    ) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "SUMMARY = \"{}\"", node.summary);
        let _ = writeln!(out, "HOMEPAGE = \"{}\"", node.homepage);
        let _ = writeln!(out, "AUTHOR = \"{} <{}>\"", node.author, node.author_email);
        let _ = writeln!(out, "LICENSE = \"{}\"", license);
        if let Some(layout) = layout {
            let _ = writeln!(
                out,
                "LIC_FILES_CHKSUM = \"file://{};md5={}\"",
                layout.license_file, layout.license_md5
            );
        }
        let _ = writeln!(out);

        if let Some(source) = &node.source {
            let _ = writeln!(out, "SRC_URI = \"{}\"", source.url);
            if let Some(md5) = &source.md5 {
                let _ = writeln!(out, "SRC_URI[md5sum] = \"{}\"", md5);
            }
            if let Some(sha256) = &source.sha256 {
                let _ = writeln!(out, "SRC_URI[sha256sum] = \"{}\"", sha256);
            }
            let _ = writeln!(out);
        }

        let src_dir = layout.map(|l| l.src_dir.clone()).unwrap_or_else(|| {
            format!("{}-{}", node.name, node.version)
        });
        let _ = writeln!(out, "S = \"${{WORKDIR}}/{}\"", src_dir);
        let _ = writeln!(out);

        let _ = writeln!(out, "RDEPENDS_${{PN}} = \"{}\"", self.rdepends(node));
        let _ = writeln!(out);
        let _ = writeln!(out, "inherit {}", self.variant.setuptools_class());

        out
    }

    fn render_group(&self, node: &ResolvedNode) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "SUMMARY = \"{}\"", node.summary);
        let _ = writeln!(out, "HOMEPAGE = \"{}\"", node.homepage);
        let _ = writeln!(out, "AUTHOR = \"{} <{}>\"", node.author, node.author_email);
        let _ = writeln!(out);
        let _ = writeln!(out, "RDEPENDS_${{PN}} = \"{}\"", self.rdepends(node));
        let _ = writeln!(out);
        let _ = writeln!(out, "inherit packagegroup");

        out
    }

    fn rdepends(&self, node: &ResolvedNode) -> String {
        node.requirements
            .iter()
            .map(|req| format!("{}-{}", self.variant.prefix(), bb_name(&req.name)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Path of the preferred-versions include file
    pub fn versions_file_path(&self) -> PathBuf {
        self.outdir
            .join(format!("{}-versions.inc", self.variant.prefix()))
    }

    /// Write one `PREFERRED_VERSION` line per resolved node
    pub fn write_preferred_versions(&self, nodes: &[ResolvedNode]) -> Result<PathBuf> {
        let mut out = String::new();
        for node in nodes {
            let _ = writeln!(
                out,
                "PREFERRED_VERSION_{}-{} = \"{}\"",
                self.variant.prefix(),
                bb_name(&node.name),
                node.version
            );
        }

        let path = self.versions_file_path();
        fs::write(&path, out)?;
        info!("Wrote preferred versions {}", path.display());
        Ok(path)
    }
}
