use url::Url;

/// Pick the site link out of a feed's link list, skipping `rel="self"` and
/// anything that is itself a feed document, falling back to the feed url.
pub fn extract_site_url(feed_url: &Url, links: &[feed_rs::model::Link]) -> Url {
    links
        .iter()
        .find(|link| {
            link.rel
                .as_ref()
                .filter(|rel| rel.as_str() == "self")
                .is_none()
                && !is_feed_url(&link.href)
        })
        .and_then(|link| Url::parse(link.href.trim_end_matches('/')).ok())
        .unwrap_or_else(|| feed_url.clone())
}

/// Best article link for a feed item: `rel="alternate"` wins, then the first
/// href that parses as an absolute url.
pub fn item_link(links: &[feed_rs::model::Link]) -> Option<Url> {
    links
        .iter()
        .find(|link| {
            link.rel
                .as_ref()
                .filter(|rel| rel.as_str() == "alternate")
                .is_some()
        })
        .and_then(|link| Url::parse(&link.href).ok())
        .or_else(|| links.iter().find_map(|link| Url::parse(&link.href).ok()))
}

fn is_feed_url(href: &str) -> bool {
    href.ends_with(".xml")
        || href.ends_with(".atom")
        || href.ends_with("rss/")
        || href.ends_with("rss")
        || href.ends_with("atom/")
        || href.ends_with("atom")
        || href.ends_with("feed")
        || href.ends_with("feed/")
}
