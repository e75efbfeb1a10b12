//! Single-entry commands against the reading list and the archives.

use super::{displayed, AddArgs, AddTarget, Outcome};
use crate::enrich;
use crate::error::{CommandError, StoreError};
use crate::model::{Context, Model};
use crate::models::{Entry, EntryPatch};
use crate::remote::Remote;
use crate::search::SearchPredicate;
use crate::ui::{self, Renderer};

pub(super) fn add(
    model: &mut Model,
    remote: &dyn Remote,
    args: AddArgs,
) -> Result<Outcome, CommandError> {
    let mut draft = match args.target {
        AddTarget::Index(index) => displayed(model, index)?,
        AddTarget::Link(link) => Entry::new(link, "", ""),
    };
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    draft.tags.extend(args.tags);

    // same identity either way, so reject before paying for a fetch
    if model.store(Context::List).contains(&draft) {
        return Err(StoreError::DuplicateEntry(draft.key().to_owned()).into());
    }
    let mut entry = maybe_enrich(remote, draft);
    if entry.title.is_empty() {
        entry.title = entry.link.to_string();
    }
    let title = entry.title.clone();
    model.store_mut(Context::List).add(entry)?;
    model.commit(Context::List);
    tracing::debug!(%title, "added entry");
    Ok(Outcome::persisting(
        format!("added '{title}'"),
        [Context::List],
    ))
}

/// Fetch the page and fill in missing title/description. A fetch failure is
/// not fatal here; the entry simply stays as typed.
pub(super) fn maybe_enrich(remote: &dyn Remote, entry: Entry) -> Entry {
    if !entry.title.is_empty() && !entry.description.is_empty() {
        return entry;
    }
    match remote.fetch_content(&entry.link) {
        Ok(Some(html)) => enrich::fill_missing(entry, &html),
        Ok(None) => entry,
        Err(err) => {
            tracing::warn!("skipping enrichment for {}: {err}", entry.link);
            entry
        }
    }
}

pub(super) fn delete(model: &mut Model, index: usize) -> Result<Outcome, CommandError> {
    let context = model.context;
    let target = displayed(model, index)?;
    let removed = model.store_mut(context).remove(&target)?;
    model.commit(context);
    Ok(Outcome::persisting(format!("deleted '{removed}'"), [context]))
}

pub(super) fn archive(model: &mut Model, index: usize) -> Result<Outcome, CommandError> {
    let target = displayed(model, index)?;
    model.archive_entry(&target)?;
    model.commit(Context::List);
    model.commit(Context::Archives);
    Ok(Outcome::persisting(
        format!("archived '{target}'"),
        [Context::List, Context::Archives],
    ))
}

pub(super) fn unarchive(model: &mut Model, index: usize) -> Result<Outcome, CommandError> {
    let target = displayed(model, index)?;
    model.unarchive_entry(&target)?;
    model.commit(Context::Archives);
    model.commit(Context::List);
    Ok(Outcome::persisting(
        format!("moved '{target}' back to the reading list"),
        [Context::Archives, Context::List],
    ))
}

pub(super) fn edit(
    model: &mut Model,
    index: usize,
    patch: EntryPatch,
) -> Result<Outcome, CommandError> {
    let context = model.context;
    let old = displayed(model, index)?;
    let new = old.merged(&patch);
    model.store_mut(context).replace(&old, new.clone())?;
    if model
        .selected
        .as_ref()
        .map_or(false, |s| s.same_entry(&old))
    {
        model.selected = Some(new.clone());
    }
    model.commit(context);
    Ok(Outcome::persisting(format!("edited '{new}'"), [context]))
}

pub(super) fn select(model: &mut Model, index: usize) -> Result<Outcome, CommandError> {
    let target = displayed(model, index)?;
    let message = format!("selected '{target}'");
    model.selected = Some(target);
    Ok(Outcome::message(message))
}

pub(super) fn view(
    model: &mut Model,
    renderer: &mut dyn Renderer,
    index: Option<usize>,
) -> Result<Outcome, CommandError> {
    let target = match index {
        Some(index) => displayed(model, index)?,
        None => model.selected.clone().ok_or(CommandError::NoSelection)?,
    };
    renderer.render(&target);
    Ok(Outcome::message(ui::details(&target)))
}

pub(super) fn clear(model: &mut Model) -> Result<Outcome, CommandError> {
    let context = model.context;
    model.store_mut(context).clear();
    model.commit(context);
    Ok(Outcome::persisting(format!("cleared {context}"), [context]))
}

/// Install the predicate as the view filter for the current context.
pub(super) fn find(
    model: &mut Model,
    predicate: SearchPredicate,
) -> Result<Outcome, CommandError> {
    let total = model.active().len();
    model.filter = Some(predicate);
    let visible = model.visible();
    let message = if visible.is_empty() {
        format!("0 of {total} entries shown")
    } else {
        format!(
            "{} of {total} entries shown\n{}",
            visible.len(),
            ui::listing(&visible)
        )
    };
    Ok(Outcome::message(message))
}
