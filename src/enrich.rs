//! Metadata extraction from fetched pages. `add` fills in what the user left
//! out; `refresh` takes whatever the page has now.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::models::Entry;

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("title selector"));
static META_DESCRIPTION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="description"], meta[property="og:description"]"#)
        .expect("description selector")
});

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
}

pub fn page_meta(html: &str) -> PageMeta {
    let doc = Html::parse_document(html);
    let title = doc
        .select(&TITLE)
        .next()
        .map(|el| clean(&el.text().collect::<String>()))
        .filter(|s| !s.is_empty());
    let description = doc
        .select(&META_DESCRIPTION)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(clean)
        .filter(|s| !s.is_empty());
    PageMeta { title, description }
}

/// Fill only the fields the entry is missing.
pub fn fill_missing(entry: Entry, html: &str) -> Entry {
    let meta = page_meta(html);
    Entry {
        title: if entry.title.is_empty() {
            meta.title.unwrap_or(entry.title)
        } else {
            entry.title
        },
        description: if entry.description.is_empty() {
            meta.description.unwrap_or(entry.description)
        } else {
            entry.description
        },
        ..entry
    }
}

/// Overwrite title and description where the page has them.
pub fn refresh(entry: Entry, html: &str) -> Entry {
    let meta = page_meta(html);
    Entry {
        title: meta.title.unwrap_or(entry.title),
        description: meta.description.unwrap_or(entry.description),
        ..entry
    }
}

/// Text content of an HTML fragment, entities unescaped, whitespace
/// collapsed. Plain strings pass through unchanged.
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    clean(&fragment.root_element().text().collect::<String>())
}

fn clean(raw: &str) -> String {
    htmlize::unescape(raw)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    const PAGE: &str = r#"<html><head>
        <title>  A &amp; B  </title>
        <meta name="description" content="all about a &amp; b">
        </head><body>hi</body></html>"#;

    #[test]
    fn extracts_title_and_description() {
        let meta = page_meta(PAGE);
        assert_eq!(meta.title.as_deref(), Some("A & B"));
        assert_eq!(meta.description.as_deref(), Some("all about a & b"));
    }

    #[test]
    fn fill_missing_keeps_supplied_fields() {
        let entry = Entry::new(Url::parse("https://a.test/").unwrap(), "mine", "");
        let filled = fill_missing(entry, PAGE);
        assert_eq!(filled.title, "mine");
        assert_eq!(filled.description, "all about a & b");
    }

    #[test]
    fn refresh_overwrites_from_the_page() {
        let entry = Entry::new(Url::parse("https://a.test/").unwrap(), "stale", "stale");
        let fresh = refresh(entry, PAGE);
        assert_eq!(fresh.title, "A & B");
        assert_eq!(fresh.description, "all about a & b");
    }

    #[test]
    fn plain_text_strips_markup() {
        assert_eq!(plain_text("<p>a <b>bold</b>\n claim</p>"), "a bold claim");
        assert_eq!(plain_text("no markup"), "no markup");
    }
}
