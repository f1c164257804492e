use crate::normalize::JoinKey;
use crate::row::{Row, Table};
use std::collections::HashMap;

/// BOX ID -> auxiliary rows carrying it, in table order.
///
/// Borrowed from the table it was built from and never modified afterwards.
#[derive(Debug, Default)]
pub struct LookupIndex<'a> {
    groups: HashMap<JoinKey, Vec<&'a Row>>,
}

impl<'a> LookupIndex<'a> {
    /// Group `table` by `key_field`. Rows whose key is absent or empty are left
    /// out and can never be matched.
    pub fn build(table: &'a Table, key_field: &str) -> Self {
        let mut groups: HashMap<JoinKey, Vec<&'a Row>> = HashMap::new();
        for row in table {
            let key = JoinKey::from_raw(row.get_or_empty(key_field));
            if key.is_empty() {
                continue;
            }
            groups.entry(key).or_default().push(row);
        }
        Self { groups }
    }

    /// Matching rows for `key`, empty if there are none.
    pub fn lookup(&self, key: &JoinKey) -> &[&'a Row] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total rows reachable through the index.
    pub fn row_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
