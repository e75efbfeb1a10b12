pub mod commands;
pub mod config;
pub mod db;
pub mod engine;
pub mod enrich;
pub mod error;
pub mod history;
pub mod model;
pub mod models;
pub mod parser;
pub mod remote;
pub mod search;
pub mod store;
pub mod ui;
pub mod utils;

pub use engine::{Engine, Reply};
pub use error::{CommandError, ParseError, RemoteError, StoreError};
pub use model::{Context, Model};
pub use models::{Entry, EntryPatch};
pub use search::SearchPredicate;
pub use store::EntryStore;
