use std::collections::BTreeSet;

use crate::models::Entry;

/// Multi-criterion matcher over entry fields.
///
/// An entry matches when *at least one* supplied criterion matches (OR across
/// criteria). Title, description and link match case-insensitively on
/// substrings; tags must all be present by exact, case-sensitive equality;
/// the free keyword matches any of the text fields or equals one tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPredicate {
    title: Option<String>,
    description: Option<String>,
    link: Option<String>,
    tags: BTreeSet<String>,
    all: Option<String>,
}

impl SearchPredicate {
    /// `None` when no criterion at all was supplied.
    pub fn from_parts(
        title: Option<String>,
        description: Option<String>,
        link: Option<String>,
        tags: BTreeSet<String>,
        all: Option<String>,
    ) -> Option<Self> {
        let predicate = Self {
            title: title.filter(|s| !s.is_empty()),
            description: description.filter(|s| !s.is_empty()),
            link: link.filter(|s| !s.is_empty()),
            tags,
            all: all.filter(|s| !s.is_empty()),
        };
        if predicate.title.is_none()
            && predicate.description.is_none()
            && predicate.link.is_none()
            && predicate.tags.is_empty()
            && predicate.all.is_none()
        {
            return None;
        }
        Some(predicate)
    }

    /// Predicate with only the free keyword criterion.
    pub fn keyword(word: impl Into<String>) -> Self {
        Self {
            all: Some(word.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(needle) = &self.title {
            if contains_ci(&entry.title, needle) {
                return true;
            }
        }
        if let Some(needle) = &self.description {
            if contains_ci(&entry.description, needle) {
                return true;
            }
        }
        if let Some(needle) = &self.link {
            if contains_ci(entry.link.as_str(), needle) {
                return true;
            }
        }
        if !self.tags.is_empty() && self.tags.is_subset(&entry.tags) {
            return true;
        }
        if let Some(word) = &self.all {
            if contains_ci(&entry.title, word)
                || contains_ci(&entry.description, word)
                || contains_ci(entry.link.as_str(), word)
                || entry.tags.contains(word)
            {
                return true;
            }
        }
        false
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
