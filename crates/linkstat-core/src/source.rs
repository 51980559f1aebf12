//! Where the two tables come from: a local file or an HTTP(S) URL.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::{Error, Result};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }

    /// Short label for log lines and table captions.
    pub fn name(&self) -> String {
        match self {
            DataSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            DataSource::Url(url) => url
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or(url.as_str())
                .to_string(),
        }
    }

    /// Read the whole table as text.
    pub async fn read_text(&self) -> Result<String> {
        match self {
            DataSource::File(path) => {
                debug!("Reading {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| Error::Io {
                        path: path.display().to_string(),
                        source,
                    })
            }
            DataSource::Url(url) => {
                debug!("Fetching {}", url);
                fetch_text(url).await.map_err(|source| Error::Http {
                    url: url.clone(),
                    source,
                })
            }
        }
    }
}

impl From<&str> for DataSource {
    fn from(location: &str) -> Self {
        DataSource::parse(location)
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        DataSource::File(path)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

async fn fetch_text(url: &str) -> std::result::Result<String, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()?;

    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}
