//! Database value types and conversions.

use crate::DbError;
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::de::DeserializeOwned;

/// A database value that can be used as a parameter or result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value.
    Null,
    /// Integer value.
    Integer(i64),
    /// Real/float value.
    Real(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Value::Integer(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Borrowed(ValueRef::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(v: ValueRef<'_>) -> Self {
        match v {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(f) => Value::Real(f),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}

// Parameter conversions
impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// A row from a query result.
#[derive(Debug, Clone)]
pub(crate) struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Deserialize the row into a type, matching fields by column name.
    pub(crate) fn deserialize<T: DeserializeOwned>(&self) -> Result<T, DbError> {
        let map: serde_json::Map<String, serde_json::Value> = self
            .columns
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect();

        serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| DbError::DeserializeError(e.to_string()))
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Real(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        // Blobs surface as byte arrays so they round-trip into Vec<u8> fields.
        Value::Blob(b) => serde_json::Value::Array(
            b.iter().map(|byte| serde_json::Value::from(*byte)).collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct CartRow {
        id: i64,
        name: String,
        price: i64,
        image: Option<String>,
    }

    fn row(values: Vec<Value>) -> Row {
        Row::new(
            vec![
                "id".to_string(),
                "name".to_string(),
                "price".to_string(),
                "image".to_string(),
            ],
            values,
        )
    }

    #[test]
    fn test_row_deserialize() {
        let r = row(vec![
            Value::Integer(5),
            Value::from("Mascara"),
            Value::Integer(10),
            Value::from("thumb.png"),
        ]);
        let parsed: CartRow = r.deserialize().unwrap();
        assert_eq!(
            parsed,
            CartRow {
                id: 5,
                name: "Mascara".to_string(),
                price: 10,
                image: Some("thumb.png".to_string()),
            }
        );
    }

    #[test]
    fn test_row_deserialize_type_mismatch() {
        let r = row(vec![
            Value::from("not a number"),
            Value::from("Mascara"),
            Value::Integer(10),
            Value::Null,
        ]);
        let result: Result<CartRow, _> = r.deserialize();
        assert!(matches!(result, Err(DbError::DeserializeError(_))));
    }

    #[test]
    fn test_row_deserialize_null_column() {
        let r = row(vec![
            Value::Integer(5),
            Value::from("Mascara"),
            Value::Integer(10),
            Value::Null,
        ]);
        let parsed: CartRow = r.deserialize().unwrap();
        assert_eq!(parsed.image, None);
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(2.5)), Value::Real(2.5));
        assert_eq!(Value::from("a"), Value::Text("a".to_string()));
    }
}
