//! Error taxonomy. Every variant is a value surfaced to the caller; nothing
//! here aborts the engine.

use thiserror::Error;

use crate::model::Context;

/// Store-level failures. Batch commands branch on the variant, so the kind
/// must stay observable rather than being flattened into a message.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("an entry for {0} already exists")]
    DuplicateEntry(String),
    #[error("no entry for {0}")]
    EntryNotFound(String),
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Malformed command text. Recovered by re-prompting; the usage string of the
/// offending command rides along where one exists.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("`{word}` is not a command in the {context} view (try `help`)")]
    UnknownCommand { word: String, context: Context },
    #[error("`{got}` is not a valid index\nusage: {usage}")]
    BadIndex { got: String, usage: &'static str },
    #[error("missing argument\nusage: {usage}")]
    MissingArg { usage: &'static str },
    #[error("{reason}\nusage: {usage}")]
    BadValue { reason: String, usage: &'static str },
    #[error("supply at least one criterion\nusage: {usage}")]
    EmptyQuery { usage: &'static str },
}

/// Collaborator-reported failures. A malformed feed is kept distinct from a
/// network failure so the user knows the link is reachable.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),
    #[error("not a valid feed: {0}")]
    MalformedFeed(String),
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("index {0} is out of range of the current view")]
    InvalidIndex(usize),
    #[error("nothing is selected")]
    NoSelection,
    #[error("could not fetch {link}: {reason} (check your connection)")]
    CouldNotFetch { link: String, reason: String },
    #[error("network error: {0} (check your connection)")]
    Network(String),
    #[error("{link} is reachable but is not a valid feed: {reason}")]
    MalformedFeed { link: String, reason: String },
}

impl CommandError {
    /// Lift a collaborator failure, keeping the feed/network distinction.
    pub fn from_remote(link: &str, err: RemoteError) -> Self {
        match err {
            RemoteError::Network(reason) => CommandError::Network(reason),
            RemoteError::MalformedFeed(reason) => CommandError::MalformedFeed {
                link: link.to_owned(),
                reason,
            },
        }
    }
}
