//! Database connection and query execution.

use crate::types::Row;
use crate::{DbError, Value};
use rusqlite::{params_from_iter, Connection};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite database handle.
///
/// Holds a single connection behind a mutex, so every statement and
/// transaction issued through one `Db` is serialized.
pub struct Db {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db").finish_non_exhaustive()
    }
}

impl Db {
    /// Open (or create) a SQLite database file.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let db = Db::open("shop.db")?;
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();
        let conn =
            Connection::open(path).map_err(|e| DbError::OpenError(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::OpenError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DbError> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    /// Run `f` against the connection while holding the lock.
    pub fn with_conn<T, F>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Conn<'_>) -> Result<T, DbError>,
    {
        let guard = self.lock()?;
        f(&Conn { conn: &guard })
    }

    /// Run `f` inside a transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back otherwise.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// db.transaction(|tx| {
    ///     tx.execute("DELETE FROM cart WHERE id = ?", params![5i64])?;
    ///     tx.execute("DELETE FROM favorite WHERE id = ?", params![5i64])?;
    ///     Ok(())
    /// })?;
    /// ```
    pub fn transaction<T, F>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Conn<'_>) -> Result<T, DbError>,
    {
        let mut guard = self.lock()?;
        let tx = guard.transaction()?;
        let value = f(&Conn { conn: &*tx })?;
        tx.commit()?;
        Ok(value)
    }

    /// Bring the schema to `version`.
    ///
    /// When the stored `user_version` differs, `drop_sql` runs first and all
    /// existing data is discarded. `create_sql` must be idempotent. Returns
    /// `true` when the tables were rebuilt.
    pub fn migrate(&self, version: i32, create_sql: &str, drop_sql: &str) -> Result<bool, DbError> {
        self.transaction(|tx| {
            let current = tx.user_version()?;
            let rebuilt = current != version;
            if rebuilt {
                tracing::info!(from = current, to = version, "rebuilding database schema");
                tx.execute_batch(drop_sql)?;
            }
            tx.execute_batch(create_sql)?;
            tx.execute_batch(&format!("PRAGMA user_version = {version}"))?;
            Ok(rebuilt)
        })
    }

    /// Read the schema version stored in the database header.
    pub fn user_version(&self) -> Result<i32, DbError> {
        self.with_conn(|c| c.user_version())
    }

    /// Execute a SQL statement that doesn't return rows.
    ///
    /// Returns the number of rows changed.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<usize, DbError> {
        self.with_conn(|c| c.execute(sql, params))
    }

    /// Execute several `;`-separated statements without parameters.
    pub fn execute_batch(&self, sql: &str) -> Result<(), DbError> {
        self.with_conn(|c| c.execute_batch(sql))
    }

    /// Execute a SQL query and deserialize results into a vector.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lines: Vec<CartLine> = db.query_as("SELECT * FROM cart", params![])?;
    /// ```
    pub fn query_as<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<T>, DbError> {
        self.with_conn(|c| c.query_as(sql, params))
    }

    /// Execute a SQL query and return a single row.
    ///
    /// Returns [`DbError::NotFound`] if no rows are returned.
    pub fn query_one<T: DeserializeOwned>(&self, sql: &str, params: &[Value]) -> Result<T, DbError> {
        self.with_conn(|c| c.query_one(sql, params))
    }

    /// Execute a SQL query and return an optional single row.
    pub fn query_optional<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<T>, DbError> {
        self.with_conn(|c| c.query_optional(sql, params))
    }
}

/// A borrowed connection, handed out by [`Db::with_conn`] and [`Db::transaction`].
pub struct Conn<'a> {
    conn: &'a Connection,
}

impl Conn<'_> {
    /// Execute a SQL statement that doesn't return rows.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<usize, DbError> {
        Ok(self.conn.execute(sql, params_from_iter(params.iter()))?)
    }

    /// Execute several `;`-separated statements without parameters.
    pub fn execute_batch(&self, sql: &str) -> Result<(), DbError> {
        Ok(self.conn.execute_batch(sql)?)
    }

    fn rows(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, DbError> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = Vec::new();
        let mut cursor = stmt.query(params_from_iter(params.iter()))?;
        while let Some(row) = cursor.next()? {
            let values = (0..columns.len())
                .map(|i| row.get_ref(i).map(Value::from))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(Row::new(columns.clone(), values));
        }

        Ok(rows)
    }

    /// Execute a SQL query and deserialize results into a vector.
    pub fn query_as<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<T>, DbError> {
        self.rows(sql, params)?.iter().map(Row::deserialize).collect()
    }

    /// Execute a SQL query and return a single row.
    pub fn query_one<T: DeserializeOwned>(&self, sql: &str, params: &[Value]) -> Result<T, DbError> {
        let rows = self.rows(sql, params)?;
        rows.first().ok_or(DbError::NotFound)?.deserialize()
    }

    /// Execute a SQL query and return an optional single row.
    pub fn query_optional<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<T>, DbError> {
        let rows = self.rows(sql, params)?;
        match rows.first() {
            Some(row) => Ok(Some(row.deserialize()?)),
            None => Ok(None),
        }
    }

    /// Read the schema version stored in the database header.
    pub fn user_version(&self) -> Result<i32, DbError> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use serde::Deserialize;

    const CREATE: &str = "CREATE TABLE IF NOT EXISTS item (id INTEGER PRIMARY KEY, name TEXT NOT NULL, qty INTEGER NOT NULL);";
    const DROP: &str = "DROP TABLE IF EXISTS item;";

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
        name: String,
        qty: i64,
    }

    fn setup() -> Db {
        let db = Db::open_in_memory().unwrap();
        db.migrate(1, CREATE, DROP).unwrap();
        db
    }

    fn items(db: &Db) -> Vec<Item> {
        db.query_as("SELECT id, name, qty FROM item", params![]).unwrap()
    }

    #[test]
    fn test_execute_and_query_as() {
        let db = setup();
        db.execute(
            "INSERT INTO item (id, name, qty) VALUES (?, ?, ?)",
            params![1i64, "Lipstick", 2i64],
        )
        .unwrap();

        let items: Vec<Item> = db.query_as("SELECT id, name, qty FROM item", params![]).unwrap();
        assert_eq!(
            items,
            vec![Item {
                id: 1,
                name: "Lipstick".to_string(),
                qty: 2
            }]
        );
    }

    #[test]
    fn test_query_one_not_found() {
        let db = setup();
        let result: Result<Item, _> = db.query_one("SELECT * FROM item WHERE id = ?", params![9i64]);
        assert!(matches!(result, Err(DbError::NotFound)));

        let missing: Option<Item> = db
            .query_optional("SELECT * FROM item WHERE id = ?", params![9i64])
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let db = setup();
        let result: Result<(), DbError> = db.transaction(|tx| {
            tx.execute("INSERT INTO item (id, name, qty) VALUES (1, 'a', 1)", params![])?;
            Err(DbError::NotFound)
        });
        assert!(result.is_err());

        assert!(items(&db).is_empty());
    }

    #[test]
    fn test_bad_sql_is_query_error() {
        let db = setup();
        let err = db.execute("INSERT INTO nowhere VALUES (1)", params![]).unwrap_err();
        assert!(matches!(err, DbError::QueryError(_)));
    }

    #[test]
    fn test_migrate_same_version_keeps_data() {
        let db = setup();
        db.execute("INSERT INTO item (id, name, qty) VALUES (1, 'a', 1)", params![])
            .unwrap();

        let rebuilt = db.migrate(1, CREATE, DROP).unwrap();
        assert!(!rebuilt);
        assert_eq!(items(&db).len(), 1);
    }

    #[test]
    fn test_migrate_new_version_discards_data() {
        let db = setup();
        db.execute("INSERT INTO item (id, name, qty) VALUES (1, 'a', 1)", params![])
            .unwrap();

        let rebuilt = db.migrate(2, CREATE, DROP).unwrap();
        assert!(rebuilt);
        assert_eq!(db.user_version().unwrap(), 2);
        assert!(items(&db).is_empty());
    }
}
