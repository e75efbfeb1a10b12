use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Result;

use readlater::config::{self, Config};
use readlater::db::{self, SqliteStorage, Storage};
use readlater::engine::Engine;
use readlater::model::Model;
use readlater::remote::HttpRemote;
use readlater::store::EntryStore;
use readlater::ui::LineRenderer;

fn main() -> Result<()> {
    // Log to stdout (if you run with `RUST_LOG=debug`).
    tracing_subscriber::fmt::init();

    let config_dir = config::config_dir()?;
    let config = Config::load(&config_dir);
    tracing::info!(?config_dir, offline = config.offline, "starting");

    let pool = db::open_pool(&config_dir.join("readlater.db"))?;
    let storage = SqliteStorage::new(pool);

    let list = EntryStore::from_entries(storage.load("list")?)?;
    let archives = EntryStore::from_entries(storage.load("archives")?)?;
    let feeds = EntryStore::from_entries(storage.load("feeds")?)?;
    let model = Model::with_stores(list, archives, feeds);

    let remote = HttpRemote::new(
        Duration::from_secs(config.request_timeout_secs),
        config.offline,
    )?;
    let mut engine = Engine::new(
        model,
        Box::new(remote),
        Box::new(storage),
        Box::new(LineRenderer),
    );

    println!("readlater - `help` shows the commands accepted here");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let reply = engine.dispatch(&line);
        if reply.is_error {
            eprintln!("{}", reply.message);
        } else if !reply.message.is_empty() {
            println!("{}", reply.message);
        }
        if reply.exit {
            break;
        }
    }
    Ok(())
}
