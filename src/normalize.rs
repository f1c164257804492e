use crate::row::Row;
use crate::schema::ColumnSchema;
use std::fmt;

/// Canonicalize a raw BOX ID: strip surrounding single quotes and whitespace.
///
/// Both are trimmed together, so `' 'X' '` and `X` collapse to the same key and
/// applying the function twice changes nothing.
pub fn normalize_box_id(raw: &str) -> String {
    raw.trim_matches(|c: char| c == '\'' || c.is_whitespace())
        .to_string()
}

/// A normalized BOX ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoinKey(String);

impl JoinKey {
    pub fn from_raw(raw: &str) -> Self {
        JoinKey(normalize_box_id(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize the key column of a freshly loaded row in place.
///
/// If the canonical column exists its value is rewritten. Otherwise the alias
/// spelling is normalized into a new canonical column and the alias is left as
/// it was. Rows with neither spelling are untouched.
pub fn normalize_row_key(row: &mut Row, schema: &ColumnSchema) {
    let normalized = if let Some(value) = row.get(&schema.key_column) {
        normalize_box_id(value)
    } else if let Some(value) = row.get(&schema.key_column_alias) {
        normalize_box_id(value)
    } else {
        return;
    };
    row.set(schema.key_column.clone(), normalized);
}
