//! # MetaboLights Retrieval
//!
//! Downloads the ISA-Tab files of a public MetaboLights study over HTTPS:
//! first `i_Investigation.txt`, then every study and assay table file the
//! investigation file declares. Returns the local directory the files were
//! written to; when no target directory is given, a temporary directory is
//! used and cleaned up when the result is dropped (call
//! [`FetchedStudy::keep`] to detach it).

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

/// Base URL of the public MetaboLights study archive.
pub const MTBLS_BASE_URL: &str =
    "https://ftp.ebi.ac.uk/pub/databases/metabolights/studies/public";

/// Name of the investigation file within a study directory.
pub const INVESTIGATION_FILENAME: &str = "i_Investigation.txt";

const MAX_RETRIES: usize = 3;
const BASE_DELAY_MS: u64 = 200;

/// Errors raised while retrieving a study.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// The HTTP request could not be completed
    #[error("MetaboLights request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status
    #[error("MetaboLights returned status {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Local filesystem error
    #[error("filesystem error: {0}")]
    Io(#[from] io::Error),
}

/// The result of fetching one study.
#[derive(Debug)]
pub struct FetchedStudy {
    /// The study accession, e.g. "MTBLS1"
    pub study_id: String,

    /// File names written into the directory, investigation file first
    pub files: Vec<String>,

    /// When the retrieval completed
    pub fetched_at: DateTime<Utc>,

    dir: PathBuf,
    tmp: Option<tempfile::TempDir>,
}

impl FetchedStudy {
    /// Directory the files were written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Detach the directory from cleanup and return its path. For fetches
    /// into an explicit target directory this is a no-op.
    pub fn keep(mut self) -> PathBuf {
        if let Some(tmp) = self.tmp.take() {
            #[allow(deprecated)]
            return tmp.into_path();
        }
        self.dir
    }
}

/// Blocking HTTPS client for the MetaboLights archive.
pub struct MtblsClient {
    client: Client,
    base_url: String,
}

impl MtblsClient {
    /// Client against the public MetaboLights archive.
    pub fn new() -> Result<Self, NetError> {
        Self::with_base_url(MTBLS_BASE_URL)
    }

    /// Client against an alternative base URL (mirrors, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, NetError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("isatab-rs/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| NetError::Http(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| NetError::Http(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Download a study's ISA-Tab files.
    ///
    /// With `target` given, files land there (the directory is created if
    /// needed); otherwise a temporary directory is used, tied to the
    /// returned [`FetchedStudy`]'s lifetime.
    pub fn fetch_study(
        &self,
        study_id: &str,
        target: Option<&Path>,
    ) -> Result<FetchedStudy, NetError> {
        let (dir, tmp) = match target {
            Some(path) => {
                fs::create_dir_all(path)?;
                (path.to_path_buf(), None)
            }
            None => {
                let tmp = tempfile::tempdir()?;
                (tmp.path().to_path_buf(), Some(tmp))
            }
        };

        info!("retrieving study '{study_id}' into {}", dir.display());
        self.download_file(study_id, INVESTIGATION_FILENAME, &dir)?;
        let mut files = vec![INVESTIGATION_FILENAME.to_string()];

        let investigation = fs::read_to_string(dir.join(INVESTIGATION_FILENAME))?;
        for file_name in table_file_names(&investigation) {
            // Declared names come from remote content; never let them
            // escape the target directory.
            if file_name.contains('/') || file_name.contains("..") {
                warn!("skipping suspicious declared table file name '{file_name}'");
                continue;
            }
            self.download_file(study_id, &file_name, &dir)?;
            files.push(file_name);
        }

        info!("retrieved {} files for '{study_id}'", files.len());
        Ok(FetchedStudy {
            study_id: study_id.to_string(),
            files,
            fetched_at: Utc::now(),
            dir,
            tmp,
        })
    }

    fn download_file(&self, study_id: &str, file_name: &str, dir: &Path) -> Result<(), NetError> {
        let url = format!("{}/{}/{}", self.base_url, study_id, file_name);
        info!("retrieving {url}");

        let mut response = self.send_with_retries(&url)?;
        if !response.status().is_success() {
            return Err(NetError::Status {
                status: response.status().as_u16(),
                url,
            });
        }
        let mut file = File::create(dir.join(file_name))?;
        io::copy(&mut response, &mut file)?;
        Ok(())
    }

    fn send_with_retries(&self, url: &str) -> Result<reqwest::blocking::Response, NetError> {
        let mut attempt = 0usize;
        loop {
            match self.client.get(url).send() {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if attempt < MAX_RETRIES && is_retryable_status(status) {
                        thread::sleep(Duration::from_millis(BASE_DELAY_MS * (attempt as u64 + 1)));
                        attempt += 1;
                        continue;
                    }
                    return Ok(response);
                }
                Err(err) => {
                    if attempt < MAX_RETRIES && (err.is_timeout() || err.is_connect()) {
                        thread::sleep(Duration::from_millis(BASE_DELAY_MS * (attempt as u64 + 1)));
                        attempt += 1;
                        continue;
                    }
                    return Err(NetError::Http(err.to_string()));
                }
            }
        }
    }
}

fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500..=504)
}

/// Scan an investigation file for the study and assay table file names it
/// declares.
///
/// Lines carrying `Study File Name` or `Study Assay File Name` hold one
/// quoted file name per tab-separated value column.
pub fn table_file_names(investigation: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in investigation.lines() {
        if line.contains("Study File Name") || line.contains("Study Assay File Name") {
            for value in line.split('\t').skip(1) {
                let name = value.trim().trim_matches('"');
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }
    }
    names
}
