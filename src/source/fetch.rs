//! Fetch-and-parse of the published wait-time document.
//!
//! The document lives under a public base path, which is either an HTTP(S)
//! URL (the deployed site) or a local directory (the scraper's output
//! folder during development).

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::{LoadError, WaitTimesDocument};

/// Retrieves one fresh copy of the document.
#[async_trait]
pub trait Fetch: Send + Sync + fmt::Debug {
    /// Fetch and decode the document.
    async fn fetch(&self) -> Result<WaitTimesDocument, LoadError>;

    /// Where the document is fetched from, for the status bar and logs.
    fn describe(&self) -> String;
}

/// Resolved location of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Url(Url),
    Path(PathBuf),
}

impl Location {
    /// Resolve `data_file` against `base_path`.
    ///
    /// A base starting with `http://` or `https://` is treated as a URL
    /// directory (a trailing `/` is implied); anything else is a filesystem
    /// directory.
    pub fn resolve(base_path: &str, data_file: &str) -> Result<Self, url::ParseError> {
        if base_path.starts_with("http://") || base_path.starts_with("https://") {
            let mut base = base_path.to_string();
            if !base.ends_with('/') {
                base.push('/');
            }
            Ok(Location::Url(Url::parse(&base)?.join(data_file)?))
        } else {
            Ok(Location::Path(Path::new(base_path).join(data_file)))
        }
    }

    /// Build the fetcher for this location.
    pub fn fetcher(&self, timeout: Option<Duration>) -> Result<Box<dyn Fetch>, LoadError> {
        match self {
            Location::Url(url) => Ok(Box::new(HttpFetcher::new(url.clone(), timeout)?)),
            Location::Path(path) => Ok(Box::new(FileFetcher::new(path))),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Url(url) => write!(f, "{}", url),
            Location::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads the document from a local file.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Fetch for FileFetcher {
    async fn fetch(&self) -> Result<WaitTimesDocument, LoadError> {
        let bytes = tokio::fs::read(&self.path).await?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "read document");
        WaitTimesDocument::from_json(&bytes)
    }

    fn describe(&self) -> String {
        format!("file: {}", self.path.display())
    }
}

/// Downloads the document over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    url: Url,
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher. Without a timeout the client's default applies.
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            url,
            client: builder.build()?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self) -> Result<WaitTimesDocument, LoadError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        debug!(url = %self.url, status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        WaitTimesDocument::from_json(&body)
    }

    fn describe(&self) -> String {
        format!("http: {}", self.url)
    }
}
