//! Type-safe SQLite storage layer for the shopfront.
//!
//! Wraps a `rusqlite` connection with a small API that returns typed
//! results deserialized by column name.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_db::{Db, params};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct CartLine {
//!     id: i64,
//!     name: String,
//!     quantity: i64,
//! }
//!
//! let db = Db::open("shop.db")?;
//!
//! db.execute(
//!     "INSERT INTO cart (id, name, quantity) VALUES (?, ?, ?)",
//!     params![5i64, "Mascara", 1i64]
//! )?;
//!
//! let lines: Vec<CartLine> = db.query_as(
//!     "SELECT id, name, quantity FROM cart WHERE quantity > ?",
//!     params![0i64]
//! )?;
//! ```

mod db;
mod error;
mod types;

pub use db::{Conn, Db};
pub use error::DbError;
pub use types::Value;

/// Create a parameter list for SQL queries.
///
/// # Example
///
/// ```rust,ignore
/// use shop_db::params;
///
/// let params = params!["Mascara", 5i64, 9.99];
/// ```
#[macro_export]
macro_rules! params {
    () => {
        &[] as &[$crate::Value]
    };
    ($($param:expr),+ $(,)?) => {
        &[$($crate::Value::from($param)),+]
    };
}
