// src/commands/generate.rs
//! Recipe generation command

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pyoe::archive::{self, SdistLayout};
use pyoe::license::{
    DefaultResolver, FailFast, LicenseMap, LicenseMapper, PromptResolver, UnknownLicenseResolver,
};
use pyoe::resolver::SourceInfo;
use pyoe::{
    Emitter, IndexClient, PythonVariant, RequirementSpec, ResolvedNode, Resolver, TreeProgress,
    VersionConstraint,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

/// Options for `pyoe generate`
pub struct GenerateOpts {
    pub package: Option<String>,
    pub version: Option<String>,
    pub requirements: Option<PathBuf>,
    pub extras: bool,
    pub outdir: PathBuf,
    pub python: String,
    pub licenses: bool,
    pub default_license: Option<String>,
    pub license_map: Option<PathBuf>,
    pub non_interactive: bool,
    pub index_url: String,
    pub skip_archives: bool,
}

/// Resolve the dependency closure and write recipe artifacts
pub fn cmd_generate(opts: GenerateOpts) -> Result<()> {
    let variant: PythonVariant = opts.python.parse()?;
    let base = Url::parse(&opts.index_url).context("Invalid index URL")?;
    let client = IndexClient::new(base)?;

    let roots = gather_roots(&opts)?;

    println!("Gathering info:");
    let resolver = Resolver::new(&client, opts.extras);
    let nodes = resolver.resolve(&roots, &mut TreeProgress)?;
    info!("Resolved {} packages", nodes.len());

    fs::create_dir_all(&opts.outdir)?;

    let map_path = opts
        .license_map
        .clone()
        .unwrap_or_else(|| opts.outdir.join("licenses.json"));
    let mut mapper = build_mapper(&opts, &map_path)?;

    let emitter = Emitter::new(&opts.outdir, variant);
    let download_dir = tempfile::tempdir()?;

    println!("Generating recipes:");
    for node in &nodes {
        let license = if node.is_extra_group {
            None
        } else {
            Some(mapper.map_license(&node.license_raw)?)
        };

        let layout = match &node.source {
            Some(source) if !opts.skip_archives => {
                Some(fetch_layout(&client, node, source, download_dir.path())?)
            }
            _ => None,
        };

        emitter.emit(node, license.as_deref(), layout.as_ref())?;
        println!("  {}", emitter.recipe_basename(node));
    }

    let versions_path = emitter.write_preferred_versions(&nodes)?;

    let map = mapper.into_map();
    println!();
    if map.is_dirty() && (opts.licenses || opts.license_map.is_some()) {
        map.save(&map_path)?;
        println!("License mappings are available in: {}", map_path.display());
    }
    println!(
        "PREFERRED_VERSIONS are available in: {}",
        versions_path.display()
    );

    Ok(())
}

/// Root requirement specs from the manifest or the single-package flags
fn gather_roots(opts: &GenerateOpts) -> Result<Vec<RequirementSpec>> {
    if let Some(path) = &opts.requirements {
        let roots = pyoe::manifest::parse_file(path)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if roots.is_empty() {
            bail!("No requirements found in {}", path.display());
        }
        return Ok(roots);
    }

    if let Some(name) = &opts.package {
        let mut spec = RequirementSpec::new(name);
        if let Some(version) = &opts.version {
            spec.constraint = Some(VersionConstraint::parse(&format!("=={version}"))?);
        }
        return Ok(vec![spec]);
    }

    bail!("No packages provided: pass --package or --requirements");
}

fn build_mapper(opts: &GenerateOpts, map_path: &Path) -> Result<LicenseMapper> {
    let mut map = LicenseMap::builtin();
    map.load_overlay(map_path)?;

    let fallback: Box<dyn UnknownLicenseResolver> = if let Some(id) = &opts.default_license {
        Box::new(DefaultResolver::new(id))
    } else if opts.non_interactive {
        Box::new(FailFast)
    } else {
        Box::new(PromptResolver)
    };

    Ok(LicenseMapper::new(map, fallback))
}

/// Download, verify, and inspect one node's sdist
fn fetch_layout(
    client: &IndexClient,
    node: &ResolvedNode,
    source: &SourceInfo,
    download_dir: &Path,
) -> Result<SdistLayout> {
    let file_name = source
        .url
        .rsplit('/')
        .next()
        .filter(|n| !n.is_empty())
        .unwrap_or("sdist.tar.gz");
    let dest = download_dir.join(file_name);

    let bar = download_bar(&node.name);
    client.download_sdist(&source.url, &dest, Some(&bar))?;
    bar.finish_and_clear();

    archive::verify_digests(&dest, &node.name, source)?;
    let layout = archive::inspect_sdist(&dest)?;
    fs::remove_file(&dest)?;

    Ok(layout)
}

fn download_bar(name: &str) -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("  {msg} {bytes}/{total_bytes} [{bar:30}]")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(name.to_string());
    bar
}
