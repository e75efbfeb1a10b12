use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use once_cell::sync::Lazy;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite_migration::{Migrations, M};
use url::Url;

use crate::models::Entry;
use crate::store::EntryStore;

static MIGRATIONS: Lazy<Migrations> =
    Lazy::new(|| Migrations::new(vec![M::up(include_str!("../migrations/0-entries.sql"))]));

/// Storage collaborator. The engine writes whole stores at commit points and
/// reads them back once at startup; nothing happens mid-command.
pub trait Storage {
    fn persist(&self, name: &str, store: &EntryStore) -> Result<()>;
    fn load(&self, name: &str) -> Result<Vec<Entry>>;
}

// https://cj.rs/blog/sqlite-pragma-cheatsheet-for-performance-and-consistency/
pub fn open_pool(path: &Path) -> Result<Pool<SqliteConnectionManager>> {
    let manager = SqliteConnectionManager::file(path).with_init(|c| {
        c.execute_batch(
            r#"
        PRAGMA journal_mode = wal;
        PRAGMA foreign_keys = on;
        PRAGMA synchronous = normal;
        "#,
        )?;
        Ok(())
    });
    let pool = Pool::new(manager)?;
    let mut conn = pool.get()?;
    MIGRATIONS.to_latest(&mut conn)?;
    Ok(pool)
}

pub struct SqliteStorage {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStorage {
    pub fn new(pool: Pool<SqliteConnectionManager>) -> Self {
        Self { pool }
    }
}

impl Storage for SqliteStorage {
    fn persist(&self, name: &str, store: &EntryStore) -> Result<()> {
        let mut conn = self.pool.get()?;
        let t = conn.transaction()?;
        t.execute(
            r#"
            DELETE FROM
                entries
            WHERE
                store = ?1
            "#,
            [name],
        )?;
        {
            let mut insert = t.prepare_cached(
                r#"
                INSERT INTO entries (
                    store,
                    pos,
                    link,
                    title,
                    description,
                    tags
                )
                VALUES (
                    ?1,
                    ?2,
                    ?3,
                    ?4,
                    ?5,
                    ?6
                )
                "#,
            )?;
            for (pos, entry) in store.iter().enumerate() {
                insert.execute(rusqlite::params![
                    name,
                    pos as i64,
                    entry.link.as_str(),
                    entry.title,
                    entry.description,
                    serde_json::to_string(&entry.tags)?,
                ])?;
            }
        }
        t.commit()?;
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Vec<Entry>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare_cached(
            r#"
            SELECT
                link,
                title,
                description,
                tags
            FROM
                entries
            WHERE
                store = ?1
            ORDER BY
                pos
            "#,
        )?;
        let rows = stmt.query_map([name], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;
        let mut entries = Vec::new();
        for row in rows {
            let (link, title, description, tags) = row?;
            let link = match Url::parse(&link) {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!("skipping stored row {link}: {err}");
                    continue;
                }
            };
            let tags: BTreeSet<String> = serde_json::from_str(&tags).unwrap_or_default();
            entries.push(Entry::new(link, title, description).with_tags(tags));
        }
        Ok(entries)
    }
}

/// In-memory storage, for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    stores: Mutex<HashMap<String, Vec<Entry>>>,
}

impl Storage for MemoryStorage {
    fn persist(&self, name: &str, store: &EntryStore) -> Result<()> {
        let mut stores = self
            .stores
            .lock()
            .map_err(|_| anyhow::anyhow!("storage lock poisoned"))?;
        stores.insert(name.to_owned(), store.entries().to_vec());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Vec<Entry>> {
        let stores = self
            .stores
            .lock()
            .map_err(|_| anyhow::anyhow!("storage lock poisoned"))?;
        Ok(stores.get(name).cloned().unwrap_or_default())
    }
}
