//! Network collaborators: content fetch and feed parsing. Retry/backoff
//! lives entirely on this side of the trait.

use std::time::Duration;

use backon::{BlockingRetryable, ExponentialBuilder};
use url::Url;

use crate::enrich;
use crate::error::RemoteError;
use crate::models::Entry;
use crate::utils;

/// A feed document reduced to what the engine consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    pub title: String,
    pub description: String,
    pub site: Option<Url>,
    pub entries: Vec<Entry>,
}

pub trait Remote {
    /// `Ok(None)` means nothing was fetched and the entry should be used
    /// as-is (offline mode reports this for every url).
    fn fetch_content(&self, url: &Url) -> Result<Option<String>, RemoteError>;

    /// Resolve a feed url into its entries. A document that is reachable but
    /// does not parse is [`RemoteError::MalformedFeed`], never `Network`.
    fn fetch_feed(&self, url: &Url) -> Result<ParsedFeed, RemoteError>;
}

pub struct HttpRemote {
    client: reqwest::blocking::Client,
    offline: bool,
}

impl HttpRemote {
    pub fn new(timeout: Duration, offline: bool) -> Result<Self, RemoteError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("readlater/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        Ok(Self { client, offline })
    }

    fn get(&self, url: &Url) -> Result<Vec<u8>, RemoteError> {
        let fetch = || -> Result<Vec<u8>, reqwest::Error> {
            let resp = self.client.get(url.clone()).send()?;
            Ok(resp.error_for_status()?.bytes()?.to_vec())
        };
        fetch
            .retry(&ExponentialBuilder::default().with_max_times(2))
            .call()
            .map_err(|e| RemoteError::Network(e.to_string()))
    }
}

impl Remote for HttpRemote {
    fn fetch_content(&self, url: &Url) -> Result<Option<String>, RemoteError> {
        if self.offline {
            return Ok(None);
        }
        let bytes = self.get(url)?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    fn fetch_feed(&self, url: &Url) -> Result<ParsedFeed, RemoteError> {
        if self.offline {
            return Err(RemoteError::Network("offline mode".to_owned()));
        }
        let bytes = self.get(url)?;
        let feed = feed_rs::parser::parse(bytes.as_slice())
            .map_err(|e| RemoteError::MalformedFeed(e.to_string()))?;
        Ok(convert(url, feed))
    }
}

fn convert(url: &Url, feed: feed_rs::model::Feed) -> ParsedFeed {
    let title = feed
        .title
        .map(|t| t.content)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| url.to_string());
    let description = feed
        .description
        .map(|t| enrich::plain_text(&t.content))
        .unwrap_or_default();
    let site = Some(utils::extract_site_url(url, &feed.links));

    let mut entries = Vec::new();
    for item in feed.entries {
        let link = match utils::item_link(&item.links) {
            Some(link) => link,
            None => {
                tracing::warn!("feed item {} has no usable link, skipping", item.id);
                continue;
            }
        };
        let item_title = item
            .title
            .map(|t| enrich::plain_text(&t.content))
            .unwrap_or_default();
        let summary = item
            .summary
            .map(|t| enrich::plain_text(&t.content))
            .unwrap_or_default();
        let tags = item.categories.into_iter().filter_map(|category| {
            category
                .label
                .or(Some(category.term))
                .filter(|t| !t.is_empty())
        });
        entries.push(Entry::new(link, item_title, summary).with_tags(tags));
    }

    ParsedFeed {
        title,
        description,
        site,
        entries,
    }
}
