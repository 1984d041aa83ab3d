// src/index/client.rs

//! HTTP client for package index operations
//!
//! Wraps blocking reqwest for fetching project documents and downloading
//! source archives. There is deliberately no retry logic: a transient
//! index failure aborts the run and the operator re-invokes.

use crate::error::{Error, Result};
use crate::index::metadata::ProjectDocument;
use crate::version::PyVersion;
use indicatif::ProgressBar;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Buffer size for streaming downloads (8 KB)
const STREAM_BUFFER_SIZE: usize = 8192;

/// Default index endpoint
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";

/// HTTP client wrapper for one package index
pub struct IndexClient {
    client: Client,
    base: Url,
}

impl IndexClient {
    /// Create a client against the given index base URL
    pub fn new(base: Url) -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Index(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base })
    }

    /// Create a client against the default public index
    pub fn default_index() -> Result<Self> {
        let base = Url::parse(DEFAULT_INDEX_URL).expect("default index URL is valid");
        Self::new(base)
    }

    /// Fetch the project document for a package
    ///
    /// With `version` the index serves exactly that release; without it,
    /// the latest. HTTP 404 maps onto the not-found errors; any other
    /// failure is a fatal index error.
    pub fn fetch_project(
        &self,
        name: &str,
        version: Option<&PyVersion>,
    ) -> Result<ProjectDocument> {
        let path = match version {
            Some(v) => format!("{name}/{v}/json"),
            None => format!("{name}/json"),
        };
        let url = self.project_url(&path)?;

        info!("Fetching metadata from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| Error::Index(format!("Failed to fetch {url}: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(match version {
                Some(v) => Error::VersionNotFound {
                    name: name.to_string(),
                    version: v.to_string(),
                },
                None => Error::PackageNotFound {
                    name: name.to_string(),
                },
            });
        }

        if !response.status().is_success() {
            return Err(Error::Index(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let document: ProjectDocument = response
            .json()
            .map_err(|e| Error::Index(format!("Failed to parse project document: {e}")))?;

        debug!(
            "Fetched {} {} ({} release files)",
            document.info.name,
            document.info.version,
            document.urls.len()
        );

        Ok(document)
    }

    /// Download a source archive to the given path
    ///
    /// Streams the body in chunks through a temporary file and renames it
    /// into place, optionally driving a progress bar.
    pub fn download_sdist(
        &self,
        url: &str,
        dest_path: &Path,
        progress_bar: Option<&ProgressBar>,
    ) -> Result<()> {
        info!("Downloading {} to {}", url, dest_path.display());

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Index(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Index(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let total_size = response.content_length().unwrap_or(0);

        let temp_path = dest_path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        let downloaded = stream_response_to_file(response, &mut file, total_size, progress_bar)?;
        fs::rename(&temp_path, dest_path)?;

        debug!("Downloaded {} bytes", downloaded);
        Ok(())
    }

    fn project_url(&self, path: &str) -> Result<Url> {
        // Keep the base's own path segments ("/pypi") in front
        let joined = format!("{}/{}", self.base.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| Error::Index(format!("Invalid index URL: {e}")))
    }
}

/// Stream an HTTP response to a file with optional progress tracking
fn stream_response_to_file(
    mut response: reqwest::blocking::Response,
    file: &mut File,
    total_size: u64,
    progress_bar: Option<&ProgressBar>,
) -> Result<u64> {
    if let Some(pb) = progress_bar {
        if total_size > 0 {
            pb.set_length(total_size);
        }
    }

    let mut downloaded: u64 = 0;
    let mut buffer = [0u8; STREAM_BUFFER_SIZE];

    loop {
        let bytes_read = response
            .read(&mut buffer)
            .map_err(|e| Error::Index(format!("Failed to read response: {e}")))?;

        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])?;
        downloaded += bytes_read as u64;

        if let Some(pb) = progress_bar {
            pb.set_position(downloaded);
        }
    }

    Ok(downloaded)
}
