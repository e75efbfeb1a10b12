//! Feed commands: subscribe, unsubscribe and the two refresh forms.

use url::Url;

use super::{displayed, Outcome};
use crate::enrich;
use crate::error::{CommandError, RemoteError, StoreError};
use crate::model::{Context, Model};
use crate::models::Entry;
use crate::remote::Remote;

pub(super) fn subscribe(
    model: &mut Model,
    remote: &dyn Remote,
    link: Url,
    title: Option<String>,
) -> Result<Outcome, CommandError> {
    if model.store(Context::Feeds).contains_key(link.as_str()) {
        return Err(StoreError::DuplicateEntry(link.as_str().to_owned()).into());
    }
    let parsed = remote
        .fetch_feed(&link)
        .map_err(|e| CommandError::from_remote(link.as_str(), e))?;

    let title = title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| parsed.title.clone());
    let description = if parsed.description.is_empty() {
        parsed
            .site
            .as_ref()
            .map(|site| site.to_string())
            .unwrap_or_default()
    } else {
        parsed.description.clone()
    };
    let feed_entry = Entry::new(link, title, description);
    let name = feed_entry.title.clone();
    model.store_mut(Context::Feeds).add(feed_entry)?;

    let imported = import_items(model, parsed.entries);
    model.commit(Context::Feeds);
    let mut persist = vec![Context::Feeds];
    if imported > 0 {
        model.commit(Context::List);
        persist.push(Context::List);
    }
    tracing::info!(%name, imported, "subscribed");
    Ok(Outcome::persisting(
        format!("subscribed to '{name}', imported {imported} new articles"),
        persist,
    ))
}

pub(super) fn unsubscribe(model: &mut Model, index: usize) -> Result<Outcome, CommandError> {
    let target = displayed(model, index)?;
    let removed = model.store_mut(Context::Feeds).remove(&target)?;
    model.commit(Context::Feeds);
    Ok(Outcome::persisting(
        format!("unsubscribed from '{removed}'"),
        [Context::Feeds],
    ))
}

pub(super) fn refresh(
    model: &mut Model,
    remote: &dyn Remote,
    index: usize,
) -> Result<Outcome, CommandError> {
    let target = displayed(model, index)?;
    match model.context {
        Context::Feeds => {
            let imported = refresh_feed(model, remote, &target)?;
            if imported > 0 {
                model.commit(Context::List);
                Ok(Outcome::persisting(
                    format!("refreshed '{target}': {imported} new articles"),
                    [Context::List],
                ))
            } else {
                Ok(Outcome::message(format!(
                    "refreshed '{target}': nothing new"
                )))
            }
        }
        _ => {
            if refresh_article(model, remote, &target)? {
                model.commit(Context::List);
                Ok(Outcome::persisting(
                    format!("refreshed '{target}'"),
                    [Context::List],
                ))
            } else {
                Ok(Outcome::message(format!(
                    "nothing fetched for '{target}', left as-is"
                )))
            }
        }
    }
}

/// Re-parse one subscribed feed and import its new items. Returns how many
/// articles were new.
pub(super) fn refresh_feed(
    model: &mut Model,
    remote: &dyn Remote,
    feed: &Entry,
) -> Result<usize, CommandError> {
    let parsed = remote
        .fetch_feed(&feed.link)
        .map_err(|e| CommandError::from_remote(feed.key(), e))?;
    Ok(import_items(model, parsed.entries))
}

/// Re-fetch one article and overwrite its metadata from the page. Returns
/// whether the stored entry changed.
pub(super) fn refresh_article(
    model: &mut Model,
    remote: &dyn Remote,
    article: &Entry,
) -> Result<bool, CommandError> {
    match remote.fetch_content(&article.link) {
        Err(RemoteError::Network(reason)) | Err(RemoteError::MalformedFeed(reason)) => {
            Err(CommandError::CouldNotFetch {
                link: article.key().to_owned(),
                reason,
            })
        }
        Ok(None) => Ok(false),
        Ok(Some(html)) => {
            let updated = enrich::refresh(article.clone(), &html);
            if updated == *article {
                return Ok(false);
            }
            model.store_mut(Context::List).replace(article, updated)?;
            Ok(true)
        }
    }
}

/// Merge feed items into the reading list, skipping links already present.
fn import_items(model: &mut Model, items: Vec<Entry>) -> usize {
    let mut imported = 0;
    for item in items {
        match model.store_mut(Context::List).add(item) {
            Ok(()) => imported += 1,
            Err(StoreError::DuplicateEntry(_)) => {}
            Err(err) => tracing::warn!("import skipped an item: {err}"),
        }
    }
    imported
}
