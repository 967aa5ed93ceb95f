//! Asset download step.

use std::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use gogogo_core::{
    application::{
        StepError,
        ports::{Filesystem, Step},
    },
    domain::{Phase, ProjectContext},
};
use reqwest::header::ACCEPT;
use tracing::{debug, info, instrument, warn};

use crate::filesystem::LocalFilesystem;
use crate::platform::{Platform, TAILWIND_RELEASE_BASE};

/// Wall-clock limit for the whole request, body included.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Some CDNs refuse requests without a browser-like identity.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const MAX_REDIRECTS: usize = 10;

const CHUNK_SIZE: usize = 64 * 1024;

/// Fetches one binary over HTTP into the project and marks it executable.
///
/// A non-2xx response is an error carrying its status and body. The body is
/// streamed to the destination through the [`Filesystem`] port. If the
/// transfer or the chmod fails, the partial file is removed before the error
/// is returned.
#[derive(Clone)]
pub struct DownloadStep {
    name: String,
    url: Option<String>,
    platform: Platform,
    destination: PathBuf,
    timeout: Duration,
    user_agent: String,
    filesystem: Arc<dyn Filesystem>,
}

impl DownloadStep {
    /// Tailwind CSS standalone CLI for `platform`, from the public release.
    pub fn tailwind(platform: Platform) -> Self {
        Self::tailwind_from(TAILWIND_RELEASE_BASE, platform)
    }

    /// Same as [`DownloadStep::tailwind`] with a different release base URL.
    pub fn tailwind_from(base_url: &str, platform: Platform) -> Self {
        Self {
            name: "tailwind download".into(),
            url: platform.tailwind_url(base_url),
            platform,
            destination: platform.tailwind_destination(),
            timeout: DOWNLOAD_TIMEOUT,
            user_agent: BROWSER_USER_AGENT.into(),
            filesystem: Arc::new(LocalFilesystem::new()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Write through `filesystem` instead of the local disk.
    pub fn with_filesystem(mut self, filesystem: Arc<dyn Filesystem>) -> Self {
        self.filesystem = filesystem;
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Destination relative to the project root.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    fn network_error(&self, reason: impl ToString) -> StepError {
        StepError::Network {
            step: self.name.clone(),
            reason: reason.to_string(),
        }
    }

    fn io_error(&self, path: &Path, source: io::Error) -> StepError {
        StepError::Io {
            step: self.name.clone(),
            path: path.to_path_buf(),
            source,
        }
    }

    /// Copy the body into `file`. A failed read is a network error, a failed
    /// write a local one.
    fn stream(
        &self,
        body: &mut impl Read,
        file: &mut dyn Write,
        destination: &Path,
    ) -> Result<u64, StepError> {
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut written = 0u64;
        loop {
            let n = match body.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.network_error(e)),
            };
            file.write_all(&buf[..n])
                .map_err(|e| self.io_error(destination, e))?;
            written += n as u64;
        }
        file.flush().map_err(|e| self.io_error(destination, e))?;
        Ok(written)
    }

    /// Remove a file this step wrote, then hand back `err`.
    fn discard(&self, path: &Path, err: StepError) -> StepError {
        if self.filesystem.exists(path) {
            if let Err(cleanup) = self.filesystem.remove_file(path) {
                warn!(error = %cleanup, path = %path.display(), "Could not remove partial download");
            }
        }
        err
    }
}

impl fmt::Debug for DownloadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadStep")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("platform", &self.platform)
            .field("destination", &self.destination)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Step for DownloadStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn phase(&self) -> Phase {
        Phase::AssetFetch
    }

    #[instrument(skip_all, fields(step = %self.name, platform = %self.platform))]
    fn run(&self, workdir: &Path, _context: &ProjectContext) -> Result<(), StepError> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| StepError::UnsupportedPlatform {
                step: self.name.clone(),
                os: self.platform.os.to_string(),
                arch: self.platform.arch.to_string(),
            })?;
        let destination = workdir.join(&self.destination);

        info!(url, destination = %destination.display(), "Downloading asset");

        let client = reqwest::blocking::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| self.network_error(e))?;

        let mut response = client
            .get(url)
            .header(ACCEPT, "application/octet-stream")
            .send()
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text() {
                Ok(body) => body,
                Err(e) => {
                    warn!(error = %e, code = status.as_u16(), "Could not read error response body");
                    String::new()
                }
            };
            return Err(StepError::HttpStatus {
                step: self.name.clone(),
                code: status.as_u16(),
                body,
            });
        }

        if let Some(parent) = destination.parent() {
            self.filesystem
                .create_dir_all(parent)
                .map_err(|e| self.io_error(parent, e))?;
        }

        let mut file = self
            .filesystem
            .create_file(&destination)
            .map_err(|e| self.io_error(&destination, e))?;
        let written = match self.stream(&mut response, &mut file, &destination) {
            Ok(n) => n,
            Err(e) => {
                drop(file);
                return Err(self.discard(&destination, e));
            }
        };
        drop(file);

        self.filesystem
            .set_executable(&destination)
            .map_err(|e| self.discard(&destination, self.io_error(&destination, e)))?;

        debug!(bytes = written, "Asset written");
        Ok(())
    }
}
