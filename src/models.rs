use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// A titled, tagged link record.
///
/// Two entries are the *same* entry when their links are equal; they are
/// *equal* only when every field matches. Entries never change in place,
/// an edit builds a replacement via [`Entry::merged`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub description: String,
    pub link: Url,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Entry {
    pub fn new(link: Url, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            link,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Identity key, the serialized link.
    pub fn key(&self) -> &str {
        self.link.as_str()
    }

    /// Link-based identity, as opposed to full-field equality.
    pub fn same_entry(&self, other: &Entry) -> bool {
        self.link == other.link
    }

    /// Copy with only the fields present in `patch` changed.
    pub fn merged(&self, patch: &EntryPatch) -> Self {
        Self {
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            link: patch.link.clone().unwrap_or_else(|| self.link.clone()),
            tags: patch.tags.clone().unwrap_or_else(|| self.tags.clone()),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "{}", self.link)
        } else {
            write!(f, "{}", self.title)
        }
    }
}

/// Field-wise update for `edit`; `None` keeps the prior value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<Url>,
    pub tags: Option<BTreeSet<String>>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.link.is_none()
            && self.tags.is_none()
    }
}
