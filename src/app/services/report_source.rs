//! Report block sources
//!
//! A source produces the raw text block for one station and day. Blocks come
//! either from the University of Wyoming listing page, where the block is
//! the first `<pre>` element, or from saved files named
//! `{station}_{YYYYMMDD}.txt` in a local directory.

use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use crate::config::SourceConfig;
use crate::constants::{DATE_FORMAT, SAVED_BLOCK_EXTENSION};
use crate::{Error, Result};

/// Anything that can produce a report block for a station and date
///
/// Failures are reported as [`Error::SourceUnavailable`] so the caller can
/// skip the date and carry on.
pub trait ReportSource {
    fn fetch(&self, station: &str, date: NaiveDate) -> impl Future<Output = Result<String>> + Send;
}

/// Text content of the first `<pre>` element of a page
pub fn extract_pre_block(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("pre").ok()?;
    document
        .select(&selector)
        .next()
        .map(|pre| pre.text().collect::<String>())
}

/// HTTP source for the sflist listing page
#[derive(Debug, Clone)]
pub struct UwyoReportSource {
    client: Client,
    config: SourceConfig,
}

impl UwyoReportSource {
    /// Build the HTTP client from source settings
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    async fn fetch_page(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl ReportSource for UwyoReportSource {
    async fn fetch(&self, station: &str, date: NaiveDate) -> Result<String> {
        let url = self.config.source_url(station, date);
        debug!("Requesting {}", url);

        let html = self.fetch_page(&url).await.map_err(|e| {
            debug!("HTTP error for {}: {}", url, e);
            match e.status() {
                Some(status) => Error::source_unavailable(station, date, format!("status {}", status)),
                None => Error::source_unavailable(station, date, e.to_string()),
            }
        })?;

        extract_pre_block(&html)
            .ok_or_else(|| Error::source_unavailable(station, date, "no data block in page"))
    }
}

/// Saved blocks in a local directory, one file per station and day
#[derive(Debug, Clone)]
pub struct DirectoryReportSource {
    root: PathBuf,
}

impl DirectoryReportSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of the saved block for a station and date
    pub fn block_path(&self, station: &str, date: NaiveDate) -> PathBuf {
        self.root.join(format!(
            "{}_{}.{}",
            station,
            date.format(DATE_FORMAT),
            SAVED_BLOCK_EXTENSION
        ))
    }
}

impl ReportSource for DirectoryReportSource {
    async fn fetch(&self, station: &str, date: NaiveDate) -> Result<String> {
        let path = self.block_path(station, date);
        debug!("Reading {}", path.display());

        tokio::fs::read_to_string(&path).await.map_err(|e| {
            Error::source_unavailable(station, date, format!("{}: {}", path.display(), e))
        })
    }
}

/// Source chosen at runtime from the configuration
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(UwyoReportSource),
    Directory(DirectoryReportSource),
}

impl ConfiguredSource {
    /// Directory source when an offline directory is set, HTTP otherwise
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        match &config.offline_dir {
            Some(dir) => Ok(Self::Directory(DirectoryReportSource::new(dir))),
            None => Ok(Self::Http(UwyoReportSource::new(config.clone())?)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Http(source) => format!("HTTP ({})", source.config.base_url),
            Self::Directory(source) => format!("directory {}", source.root.display()),
        }
    }
}

impl ReportSource for ConfiguredSource {
    async fn fetch(&self, station: &str, date: NaiveDate) -> Result<String> {
        match self {
            Self::Http(source) => source.fetch(station, date).await,
            Self::Directory(source) => source.fetch(station, date).await,
        }
    }
}
