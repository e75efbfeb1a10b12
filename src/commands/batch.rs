//! Batch commands. Each iterates the displayed list and delegates to the
//! single-entry behavior; they differ deliberately in how a per-element
//! failure is treated, so the policies below branch on the error kind.

use super::{entry, feed, Outcome};
use crate::error::{CommandError, StoreError};
use crate::model::{Context, Model};
use crate::models::Entry;
use crate::remote::Remote;

fn targets(model: &Model) -> Vec<Entry> {
    model.visible().into_iter().cloned().collect()
}

/// Add every displayed entry to the reading list. Duplicates are skipped
/// without counting; any other store failure aborts.
pub(super) fn add_all(model: &mut Model, remote: &dyn Remote) -> Result<Outcome, CommandError> {
    let mut added = 0;
    for target in targets(model) {
        // already present: skip before paying for enrichment
        if model.store(Context::List).contains(&target) {
            continue;
        }
        let entry = entry::maybe_enrich(remote, target);
        match model.store_mut(Context::List).add(entry) {
            Ok(()) => added += 1,
            Err(StoreError::DuplicateEntry(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }
    if added == 0 {
        return Ok(Outcome::message("nothing new to add"));
    }
    model.commit(Context::List);
    Ok(Outcome::persisting(
        format!("added {added} entries"),
        [Context::List],
    ))
}

pub(super) fn archive_all(model: &mut Model) -> Result<Outcome, CommandError> {
    let mut moved = 0;
    // bottom-up: removals must not shift the indices of entries still to go
    for target in targets(model).iter().rev() {
        match model.archive_entry(target) {
            Ok(()) => moved += 1,
            Err(StoreError::DuplicateEntry(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }
    if moved == 0 {
        return Ok(Outcome::message("nothing archived"));
    }
    model.commit(Context::List);
    model.commit(Context::Archives);
    Ok(Outcome::persisting(
        format!("archived {moved} entries"),
        [Context::List, Context::Archives],
    ))
}

pub(super) fn unarchive_all(model: &mut Model) -> Result<Outcome, CommandError> {
    let mut moved = 0;
    for target in targets(model).iter().rev() {
        match model.unarchive_entry(target) {
            Ok(()) => moved += 1,
            Err(StoreError::DuplicateEntry(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }
    if moved == 0 {
        return Ok(Outcome::message("nothing to move back"));
    }
    model.commit(Context::Archives);
    model.commit(Context::List);
    Ok(Outcome::persisting(
        format!("moved {moved} entries back to the reading list"),
        [Context::Archives, Context::List],
    ))
}

pub(super) fn delete_all(model: &mut Model) -> Result<Outcome, CommandError> {
    let context = model.context;
    let mut deleted = 0;
    for target in targets(model).iter().rev() {
        model.store_mut(context).remove(target)?;
        deleted += 1;
    }
    if deleted == 0 {
        return Ok(Outcome::message("nothing to delete"));
    }
    model.commit(context);
    Ok(Outcome::persisting(
        format!("deleted {deleted} entries"),
        [context],
    ))
}

/// Refresh the displayed list top-down. A failure on the very first element
/// fails the whole command; a later failure stops the run and reports the
/// successes so far along with where it stopped.
pub(super) fn refresh_all(model: &mut Model, remote: &dyn Remote) -> Result<Outcome, CommandError> {
    let context = model.context;
    let all = targets(model);
    if all.is_empty() {
        return Ok(Outcome::message("nothing to refresh"));
    }
    let what = if context == Context::Feeds {
        "feeds"
    } else {
        "entries"
    };

    let mut done = 0;
    let mut changed = false;
    let mut stopped: Option<(Entry, CommandError)> = None;
    for (i, target) in all.iter().enumerate() {
        let step = match context {
            Context::Feeds => feed::refresh_feed(model, remote, target).map(|new| new > 0),
            _ => feed::refresh_article(model, remote, target),
        };
        match step {
            Ok(step_changed) => {
                done += 1;
                changed |= step_changed;
            }
            Err(err) if i == 0 => return Err(err),
            Err(err) => {
                stopped = Some((target.clone(), err));
                break;
            }
        }
    }

    let mut persist = Vec::new();
    if changed {
        model.commit(Context::List);
        persist.push(Context::List);
    }
    let message = match stopped {
        None => format!("refreshed {done} {what}"),
        Some((at, err)) => format!(
            "refreshed {done} of {} {what}, stopped at '{at}': {err}",
            all.len()
        ),
    };
    Ok(Outcome { message, persist })
}
