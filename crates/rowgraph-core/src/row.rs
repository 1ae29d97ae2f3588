use crate::{key::Key, value::Value};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Row
///
/// One flat result row. Columns are addressed as `"<table>.<column>"`; a
/// missing column and an explicit `Null` both mean "no value".
///

#[derive(Clone, Debug, Default, Deref, Deserialize, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row(#[into_iterator(owned, ref)] BTreeMap<String, Value>);

impl Row {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn column_key(table: &str, column: &str) -> String {
        format!("{table}.{column}")
    }

    #[must_use]
    pub fn with(mut self, table: &str, column: &str, value: impl Into<Value>) -> Self {
        self.insert(table, column, value);
        self
    }

    pub fn insert(&mut self, table: &str, column: &str, value: impl Into<Value>) {
        self.0.insert(Self::column_key(table, column), value.into());
    }

    /// Non-null value of `table.column`.
    #[must_use]
    pub fn get(&self, table: &str, column: &str) -> Option<&Value> {
        self.0
            .get(&Self::column_key(table, column))
            .filter(|value| !value.is_null())
    }

    /// Key made of `columns`, composite when there is more than one.
    ///
    /// `None` when any column is absent or not a key value.
    #[must_use]
    pub fn key<S: AsRef<str>>(&self, table: &str, columns: &[S]) -> Option<Key> {
        match columns {
            [] => None,
            [column] => self.get(table, column.as_ref())?.as_key(),
            _ => columns
                .iter()
                .map(|column| self.get(table, column.as_ref())?.as_key())
                .collect::<Option<Vec<_>>>()
                .map(Key::Composite),
        }
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
