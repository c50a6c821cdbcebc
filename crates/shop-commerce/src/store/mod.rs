//! Local cart and favorites store.
//!
//! Two tables keyed by product id. The schema is versioned with SQLite's
//! `user_version`; a version change drops and recreates every table.

mod cart;
mod favorite;

pub use cart::{CartLine, CartWrite};
pub use favorite::FavoriteRow;

use crate::error::CommerceError;
use shop_db::{Db, DbError};
use std::path::Path;
use std::sync::Arc;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS cart (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        quantity INTEGER NOT NULL CHECK (quantity >= 0),
        price REAL NOT NULL,
        discount_price INTEGER NOT NULL,
        image TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS favorite (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        price REAL NOT NULL,
        discount_price INTEGER NOT NULL,
        image TEXT NOT NULL DEFAULT ''
    );
"#;

const DROP_TABLES: &str = r#"
    DROP TABLE IF EXISTS cart;
    DROP TABLE IF EXISTS favorite;
"#;

/// Handle to the cart and favorite tables.
///
/// Cheap to clone; clones share one connection.
#[derive(Debug, Clone)]
pub struct Store {
    db: Arc<Db>,
}

impl Store {
    /// Open the store file at `path`, creating or rebuilding the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        Self::with_db(Db::open(path)?)
    }

    /// Open a store that lives only as long as the handle.
    pub fn in_memory() -> Result<Self, DbError> {
        Self::with_db(Db::open_in_memory()?)
    }

    fn with_db(db: Db) -> Result<Self, DbError> {
        if db.migrate(SCHEMA_VERSION, CREATE_TABLES, DROP_TABLES)? {
            tracing::info!(version = SCHEMA_VERSION, "created store schema");
        }
        Ok(Self { db: Arc::new(db) })
    }

    pub(crate) fn db(&self) -> &Db {
        &self.db
    }

    /// Run a store operation on the blocking thread pool.
    pub async fn run<T, F>(&self, f: F) -> Result<T, CommerceError>
    where
        F: FnOnce(&Store) -> Result<T, DbError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        Ok(tokio::task::spawn_blocking(move || f(&store)).await??)
    }
}
