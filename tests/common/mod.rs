#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use url::Url;

use readlater::db::MemoryStorage;
use readlater::engine::Engine;
use readlater::error::RemoteError;
use readlater::model::Model;
use readlater::models::Entry;
use readlater::remote::{ParsedFeed, Remote};
use readlater::ui::Renderer;

pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

pub fn entry(link: &str, title: &str) -> Entry {
    Entry::new(url(link), title, "")
}

/// Remote double scripted per url: pages answer `fetch_content`, feeds
/// answer `fetch_feed`, anything unscripted is unreachable.
#[derive(Default)]
pub struct ScriptedRemote {
    pages: HashMap<String, String>,
    failing_pages: HashSet<String>,
    feeds: HashMap<String, Result<ParsedFeed, RemoteError>>,
}

impl ScriptedRemote {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_owned(), html.to_owned());
        self
    }

    pub fn with_failing_page(mut self, url: &str) -> Self {
        self.failing_pages.insert(url.to_owned());
        self
    }

    pub fn with_feed(mut self, url: &str, feed: ParsedFeed) -> Self {
        self.feeds.insert(url.to_owned(), Ok(feed));
        self
    }

    pub fn with_feed_error(mut self, url: &str, err: RemoteError) -> Self {
        self.feeds.insert(url.to_owned(), Err(err));
        self
    }
}

impl Remote for ScriptedRemote {
    fn fetch_content(&self, url: &Url) -> Result<Option<String>, RemoteError> {
        if self.failing_pages.contains(url.as_str()) {
            return Err(RemoteError::Network("connection refused".to_owned()));
        }
        Ok(self.pages.get(url.as_str()).cloned())
    }

    fn fetch_feed(&self, url: &Url) -> Result<ParsedFeed, RemoteError> {
        self.feeds
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| Err(RemoteError::Network("no route".to_owned())))
    }
}

/// Records the titles pushed at it.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub rendered: Arc<Mutex<Vec<String>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, entry: &Entry) {
        self.rendered.lock().unwrap().push(entry.title.clone());
    }
}

/// Engine over in-memory collaborators, plus a handle onto what got
/// rendered.
pub fn engine_with(remote: ScriptedRemote) -> (Engine, Arc<Mutex<Vec<String>>>) {
    let renderer = RecordingRenderer::default();
    let rendered = renderer.rendered.clone();
    let engine = Engine::new(
        Model::new(),
        Box::new(remote),
        Box::new(MemoryStorage::default()),
        Box::new(renderer),
    );
    (engine, rendered)
}

pub fn engine() -> Engine {
    engine_with(ScriptedRemote::default()).0
}

/// A feed document already reduced to entries.
pub fn feed(title: &str, links: &[&str]) -> ParsedFeed {
    ParsedFeed {
        title: title.to_owned(),
        description: String::new(),
        site: None,
        entries: links
            .iter()
            .map(|link| entry(link, &format!("article {link}")))
            .collect(),
    }
}
