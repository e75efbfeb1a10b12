//! Executable commands. Parsing lives in [`crate::parser`]; everything here
//! runs against an explicitly passed model and the collaborator traits.

mod batch;
mod entry;
mod feed;

use std::collections::BTreeSet;

use url::Url;

use crate::error::CommandError;
use crate::model::{Context, Model};
use crate::models::EntryPatch;
use crate::parser;
use crate::remote::Remote;
use crate::search::SearchPredicate;
use crate::store::EntryStore;
use crate::ui::{self, Renderer};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddTarget {
    Link(Url),
    Index(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddArgs {
    pub target: AddTarget,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: BTreeSet<String>,
}

/// Indices are 1-based positions into the *displayed* list, exactly as the
/// user typed them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    History,
    Exit,
    Undo,
    Redo,
    Switch(Context),
    Search(SearchPredicate),
    Find(SearchPredicate),
    Add(AddArgs),
    AddAll,
    Subscribe { link: Url, title: Option<String> },
    Unsubscribe { index: usize },
    Delete { index: usize },
    DeleteAll,
    Archive { index: usize },
    ArchiveAll,
    Unarchive { index: usize },
    UnarchiveAll,
    Refresh { index: usize },
    RefreshAll,
    Edit { index: usize, patch: EntryPatch },
    Select { index: usize },
    View { index: Option<usize> },
    Clear,
}

/// What a successful command reports, plus which stores the engine should
/// now write through the storage collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub persist: Vec<Context>,
}

impl Outcome {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            persist: Vec::new(),
        }
    }

    pub fn persisting(
        message: impl Into<String>,
        stores: impl IntoIterator<Item = Context>,
    ) -> Self {
        Self {
            message: message.into(),
            persist: stores.into_iter().collect(),
        }
    }
}

impl Command {
    pub fn execute(
        self,
        model: &mut Model,
        remote: &dyn Remote,
        renderer: &mut dyn Renderer,
    ) -> Result<Outcome, CommandError> {
        match self {
            Command::Help => Ok(Outcome::message(parser::help_text(model.context))),
            // the engine answers these two itself before execution
            Command::History | Command::Exit => Ok(Outcome::message(String::new())),
            Command::Undo => {
                let context = model.context;
                model.undo(context)?;
                Ok(Outcome::persisting(
                    format!("undid the last change to {context}"),
                    [context],
                ))
            }
            Command::Redo => {
                let context = model.context;
                model.redo(context)?;
                Ok(Outcome::persisting(
                    format!("redid the last change to {context}"),
                    [context],
                ))
            }
            Command::Switch(context) => {
                model.enter(context);
                Ok(Outcome::message(ui::overview(context, &model.visible())))
            }
            Command::Search(predicate) => search(model, predicate),
            Command::Find(predicate) => entry::find(model, predicate),
            Command::Add(args) => entry::add(model, remote, args),
            Command::AddAll => batch::add_all(model, remote),
            Command::Subscribe { link, title } => feed::subscribe(model, remote, link, title),
            Command::Unsubscribe { index } => feed::unsubscribe(model, index),
            Command::Delete { index } => entry::delete(model, index),
            Command::DeleteAll => batch::delete_all(model),
            Command::Archive { index } => entry::archive(model, index),
            Command::ArchiveAll => batch::archive_all(model),
            Command::Unarchive { index } => entry::unarchive(model, index),
            Command::UnarchiveAll => batch::unarchive_all(model),
            Command::Refresh { index } => feed::refresh(model, remote, index),
            Command::RefreshAll => batch::refresh_all(model, remote),
            Command::Edit { index, patch } => entry::edit(model, index, patch),
            Command::Select { index } => entry::select(model, index),
            Command::View { index } => entry::view(model, renderer, index),
            Command::Clear => entry::clear(model),
        }
    }
}

/// Snapshot every match from the reading list and the archives into the
/// search store and enter the search view.
fn search(model: &mut Model, predicate: SearchPredicate) -> Result<Outcome, CommandError> {
    let mut results = EntryStore::new();
    for entry in model
        .store(Context::List)
        .iter()
        .chain(model.store(Context::Archives).iter())
    {
        // the same link may live in both stores, keep the first hit
        if predicate.matches(entry) && !results.contains(entry) {
            results.add(entry.clone())?;
        }
    }
    let found = results.len();
    model.enter_search(results);
    let listing = ui::listing(&model.visible());
    let message = if found == 0 {
        "search: no matches".to_owned()
    } else {
        format!("search: {found} matches\n{listing}")
    };
    Ok(Outcome::message(message))
}

/// Resolve a 1-based displayed index against the current view.
fn displayed(model: &Model, index: usize) -> Result<crate::models::Entry, CommandError> {
    index
        .checked_sub(1)
        .and_then(|pos| model.visible_entry(pos))
        .cloned()
        .ok_or(CommandError::InvalidIndex(index))
}
