//! Favorite table operations.

use super::Store;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use shop_db::{params, DbError};
use std::collections::HashSet;

/// A persisted favorite. Presence of the row is what marks a favorite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteRow {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub discount_price: i64,
    pub image: String,
}

#[derive(Deserialize)]
struct IdRow {
    id: ProductId,
}

impl Store {
    /// All favorite rows.
    pub fn favorites(&self) -> Result<Vec<FavoriteRow>, DbError> {
        self.db().query_as(
            "SELECT id, name, price, discount_price, image FROM favorite",
            params![],
        )
    }

    /// The favorite row for `id`, if any.
    pub fn favorite(&self, id: ProductId) -> Result<Option<FavoriteRow>, DbError> {
        self.db().query_optional(
            "SELECT id, name, price, discount_price, image FROM favorite WHERE id = ?",
            params![id],
        )
    }

    /// Insert or replace a favorite.
    pub fn add_favorite(&self, row: &FavoriteRow) -> Result<(), DbError> {
        self.db().execute(
            "INSERT OR REPLACE INTO favorite (id, name, price, discount_price, image)
             VALUES (?, ?, ?, ?, ?)",
            params![
                row.id,
                row.name.as_str(),
                row.price,
                row.discount_price,
                row.image.as_str()
            ],
        )?;
        Ok(())
    }

    /// Delete the favorite for `id`.
    pub fn delete_favorite(&self, id: ProductId) -> Result<bool, DbError> {
        Ok(self.db().execute("DELETE FROM favorite WHERE id = ?", params![id])? > 0)
    }

    /// Ids of every favorite.
    pub fn favorite_ids(&self) -> Result<HashSet<ProductId>, DbError> {
        let rows: Vec<IdRow> = self.db().query_as("SELECT id FROM favorite", params![])?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }
}
