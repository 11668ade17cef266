//! Loading the remote visit feed.
//!
//! The document is a JSON object with `countries` and `states` arrays of
//! `{ "name": <string>, "last": <year> }`. Top-level problems fail the whole
//! load; a bad individual record is skipped so the rest of the feed survives.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use travel_map_shared::{RegionKind, RegionRecord};

use crate::config::{FEED_USER_AGENT, feed_connect_timeout, feed_http_timeout, visited_feed_url};

const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Transport failure, timeout or non-success status.
    #[error("visit feed unreachable: {0}")]
    FeedUnreachable(String),
    /// Body is not a JSON object holding both region lists.
    #[error("visit feed malformed: {0}")]
    FeedMalformed(String),
}

/// A single feed entry that could not be turned into a [`RegionRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} record #{index} malformed: {reason}")]
pub struct RecordMalformed {
    pub kind: RegionKind,
    /// Position within its list.
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct ParsedFeed {
    /// Countries first, then states, each in document order.
    pub records: Vec<RegionRecord>,
    pub malformed: Vec<RecordMalformed>,
}

#[derive(Deserialize)]
struct RawFeed {
    countries: Vec<Value>,
    states: Vec<Value>,
}

#[derive(Deserialize)]
struct RawRecord {
    name: String,
    last: i32,
}

pub fn parse_visit_feed(bytes: &[u8]) -> Result<ParsedFeed, LoadError> {
    let raw: RawFeed =
        serde_json::from_slice(bytes).map_err(|e| LoadError::FeedMalformed(e.to_string()))?;

    let mut feed = ParsedFeed::default();
    feed.collect(RegionKind::Country, raw.countries);
    feed.collect(RegionKind::State, raw.states);
    Ok(feed)
}

impl ParsedFeed {
    fn collect(&mut self, kind: RegionKind, entries: Vec<Value>) {
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<RawRecord>(entry) {
                Ok(raw) => self
                    .records
                    .push(RegionRecord::new(raw.name, kind, raw.last)),
                Err(e) => self.malformed.push(RecordMalformed {
                    kind,
                    index,
                    reason: e.to_string(),
                }),
            }
        }
    }
}

/// Fetches the visit feed once per call. No retry.
#[derive(Debug, Clone)]
pub struct VisitFeedLoader {
    client: reqwest::Client,
    url: String,
}

impl VisitFeedLoader {
    /// Loader for `VISITED_FEED_URL` with the configured timeouts.
    pub fn from_env() -> Result<Self, reqwest::Error> {
        Self::with_timeouts(visited_feed_url(), feed_http_timeout(), feed_connect_timeout())
    }

    pub fn with_timeouts(
        url: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(FEED_USER_AGENT)
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .or_else(|e| {
                warn!(
                    error = %e,
                    "failed to build configured HTTP client, retrying without custom user-agent"
                );
                reqwest::Client::builder()
                    .timeout(request_timeout)
                    .connect_timeout(connect_timeout)
                    .build()
            })?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn load(&self) -> Result<Vec<RegionRecord>, LoadError> {
        let bytes = self.fetch().await?;
        let feed = parse_visit_feed(&bytes).map_err(|e| match e {
            LoadError::FeedMalformed(reason) => LoadError::FeedMalformed(format!(
                "{reason}; body preview: {}",
                body_preview(&bytes)
            )),
            other => other,
        })?;

        for bad in &feed.malformed {
            warn!(
                kind = %bad.kind,
                index = bad.index,
                reason = %bad.reason,
                "skipping malformed visit record"
            );
        }
        info!(
            regions = feed.records.len(),
            skipped = feed.malformed.len(),
            url = %self.url,
            "loaded visit feed"
        );
        Ok(feed.records)
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::FeedUnreachable(describe_transport_error(&e)))?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| LoadError::FeedUnreachable(describe_transport_error(&e)))?;

        if !status.is_success() {
            return Err(LoadError::FeedUnreachable(format!(
                "upstream status {status}; body preview: {}",
                body_preview(&bytes)
            )));
        }
        Ok(bytes.to_vec())
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {e}")
    } else {
        format!("request failed: {e}")
    }
}

fn body_preview(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .take(BODY_PREVIEW_CHARS)
        .collect()
}
