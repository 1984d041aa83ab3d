// src/archive.rs

//! Source archive handling
//!
//! Downloads land as sdist tarballs; this module verifies them against
//! the digests the index published, unpacks them, and finds the license
//! file BitBake's `LIC_FILES_CHKSUM` needs to point at.

use crate::error::{Error, Result};
use crate::resolver::SourceInfo;
use flate2::read::GzDecoder;
use md5::Md5;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tar::Archive;
use tracing::debug;

/// What recipe generation needs to know about an unpacked sdist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdistLayout {
    /// Top-level directory inside the archive (BitBake's `S`)
    pub src_dir: String,
    /// License file name relative to `src_dir`
    pub license_file: String,
    /// MD5 of the license file
    pub license_md5: String,
}

/// Verify a downloaded archive against the index digests
///
/// Any digest the index published must match; a mismatch aborts the run
/// rather than bake a poisoned checksum into a recipe.
pub fn verify_digests(path: &Path, name: &str, source: &SourceInfo) -> Result<()> {
    let (md5_hex, sha256_hex) = file_digests(path)?;

    if let Some(expected) = &source.md5 {
        if !expected.eq_ignore_ascii_case(&md5_hex) {
            return Err(Error::DigestMismatch {
                name: name.to_string(),
                algorithm: "MD5",
            });
        }
    }
    if let Some(expected) = &source.sha256 {
        if !expected.eq_ignore_ascii_case(&sha256_hex) {
            return Err(Error::DigestMismatch {
                name: name.to_string(),
                algorithm: "SHA-256",
            });
        }
    }

    debug!("digests verified for {}", path.display());
    Ok(())
}

/// Unpack an sdist and locate its license file
///
/// Only tarballs are handled (`.tar.gz`, `.tgz`, plain `.tar`); the
/// archive is extracted into a temporary directory that is removed when
/// inspection finishes. The license file is the first top-level entry
/// whose name contains "license" or "copying", falling back to
/// `setup.py` (its header names the license when no file ships one).
pub fn inspect_sdist(path: &Path) -> Result<SdistLayout> {
    let tmp = tempfile::tempdir()?;
    unpack(path, tmp.path())?;

    let src_dir = single_top_level_dir(tmp.path())?;
    let src_path = tmp.path().join(&src_dir);

    let license_file = find_license_file(&src_path)?;
    let license_path = src_path.join(&license_file);
    if !license_path.is_file() {
        return Err(Error::Archive(format!(
            "No license file or setup.py in {}",
            path.display()
        )));
    }

    let (license_md5, _) = file_digests(&license_path)?;

    Ok(SdistLayout {
        src_dir,
        license_file,
        license_md5,
    })
}

fn unpack(archive: &Path, dest: &Path) -> Result<()> {
    let file_name = archive
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let file = File::open(archive)?;

    if file_name.ends_with(".tar.gz") || file_name.ends_with(".tgz") {
        Archive::new(GzDecoder::new(file))
            .unpack(dest)
            .map_err(|e| Error::Archive(format!("Failed to unpack {file_name}: {e}")))?;
    } else if file_name.ends_with(".tar") {
        Archive::new(file)
            .unpack(dest)
            .map_err(|e| Error::Archive(format!("Failed to unpack {file_name}: {e}")))?;
    } else {
        return Err(Error::Archive(format!(
            "Unsupported archive format: {file_name}"
        )));
    }

    Ok(())
}

/// The directory the archive's contents live under
fn single_top_level_dir(dir: &Path) -> Result<String> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.path().is_dir() {
            return Ok(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Err(Error::Archive(
        "Archive has no top-level directory".to_string(),
    ))
}

fn find_license_file(src_path: &Path) -> Result<String> {
    for entry in fs::read_dir(src_path)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let lower = name.to_lowercase();
        if lower.contains("license") || lower.contains("copying") {
            return Ok(name);
        }
    }
    Ok("setup.py".to_string())
}

/// MD5 and SHA-256 of a file, streamed
fn file_digests(path: &Path) -> Result<(String, String)> {
    let mut file = File::open(path)?;
    let mut md5 = Md5::new();
    let mut sha256 = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        md5.update(&buffer[..n]);
        sha256.update(&buffer[..n]);
    }

    Ok((
        hex_string(&md5.finalize()),
        hex_string(&sha256.finalize()),
    ))
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
