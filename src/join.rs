//! Join engine - expands detail rows against their category and technology matches.
//!
//! Expansion policy per detail row, with `c` category and `t` technology matches:
//! - `c = 0, t = 0`: one row, the detail row as-is
//! - `c > 0, t > 0`: `c * t` rows, categories outer, technologies inner
//! - `c > 0, t = 0`: `c` rows with empty technology fields
//! - `c = 0, t > 0`: `t` rows with empty category fields
//!
//! Many-to-many keys grow quadratically. That is the intended full enrichment
//! and is not capped.

use crate::index::LookupIndex;
use crate::normalize::JoinKey;
use crate::row::{Row, Table};
use crate::schema::ColumnSchema;
use itertools::Itertools;
use tracing::debug;

/// Primary/secondary/tertiary domain of one category row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryFields {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
}

/// Primary/secondary/tertiary element of one technology row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TechnologyFields {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
}

fn extract_triple(row: &Row, fields: &[String; 3]) -> [String; 3] {
    fields.clone().map(|field| row.get_or_empty(&field).to_string())
}

impl CategoryFields {
    pub fn from_row(row: &Row, schema: &ColumnSchema) -> Self {
        let [primary, secondary, tertiary] = extract_triple(row, &schema.category_fields);
        Self {
            primary,
            secondary,
            tertiary,
        }
    }

    fn values(&self) -> [&str; 3] {
        [self.primary.as_str(), self.secondary.as_str(), self.tertiary.as_str()]
    }
}

impl TechnologyFields {
    pub fn from_row(row: &Row, schema: &ColumnSchema) -> Self {
        let [primary, secondary, tertiary] = extract_triple(row, &schema.technology_fields);
        Self {
            primary,
            secondary,
            tertiary,
        }
    }

    fn values(&self) -> [&str; 3] {
        [self.primary.as_str(), self.secondary.as_str(), self.tertiary.as_str()]
    }
}

/// A detail row copy extended with category and technology fields.
///
/// `None` means that side was never filled in (the no-match case); readers
/// then fall back to whatever the detail row holds under that column, which
/// is normally nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedRow {
    pub detail: Row,
    pub category: Option<CategoryFields>,
    pub technology: Option<TechnologyFields>,
}

impl MergedRow {
    /// Value of `column` in output terms; absent columns read as empty.
    pub fn value<'s>(&'s self, column: &str, schema: &ColumnSchema) -> &'s str {
        if let Some(category) = &self.category {
            if let Some(pos) = schema.category_outputs.iter().position(|c| c == column) {
                return category.values()[pos];
            }
        }
        if let Some(technology) = &self.technology {
            if let Some(pos) = schema.technology_outputs.iter().position(|c| c == column) {
                return technology.values()[pos];
            }
        }
        self.detail.get_or_empty(column)
    }
}

/// Number of merged rows a detail row with `cats` and `techs` matches expands to.
pub fn expansion_count(cats: usize, techs: usize) -> usize {
    match (cats, techs) {
        (0, 0) => 1,
        (c, 0) => c,
        (0, t) => t,
        (c, t) => c * t,
    }
}

pub struct JoinEngine<'a> {
    schema: &'a ColumnSchema,
    categories: &'a LookupIndex<'a>,
    technologies: &'a LookupIndex<'a>,
}

impl<'a> JoinEngine<'a> {
    pub fn new(
        schema: &'a ColumnSchema,
        categories: &'a LookupIndex<'a>,
        technologies: &'a LookupIndex<'a>,
    ) -> Self {
        Self {
            schema,
            categories,
            technologies,
        }
    }

    /// Expand every detail row, preserving detail order.
    pub fn merge(&self, details: &Table) -> Vec<MergedRow> {
        let mut merged = Vec::new();
        for detail in details {
            self.expand_into(detail, &mut merged);
        }
        merged
    }

    /// Expand one detail row and append the results to `out`.
    pub fn expand_into(&self, detail: &Row, out: &mut Vec<MergedRow>) {
        let key = JoinKey::from_raw(detail.get_or_empty(&self.schema.key_column));
        let cats = self.categories.lookup(&key);
        let techs = self.technologies.lookup(&key);
        debug!(
            "BOX ID {:?}: {} categories x {} technologies",
            key.as_str(),
            cats.len(),
            techs.len()
        );

        let row = |category: Option<CategoryFields>, technology: Option<TechnologyFields>| {
            MergedRow {
                detail: detail.clone(),
                category,
                technology,
            }
        };

        match (cats.is_empty(), techs.is_empty()) {
            (true, true) => out.push(row(None, None)),
            (false, false) => {
                out.extend(cats.iter().cartesian_product(techs.iter()).map(|(c, t)| {
                    row(
                        Some(CategoryFields::from_row(c, self.schema)),
                        Some(TechnologyFields::from_row(t, self.schema)),
                    )
                }));
            }
            (false, true) => {
                out.extend(cats.iter().map(|c| {
                    row(
                        Some(CategoryFields::from_row(c, self.schema)),
                        Some(TechnologyFields::default()),
                    )
                }));
            }
            (true, false) => {
                out.extend(techs.iter().map(|t| {
                    row(
                        Some(CategoryFields::default()),
                        Some(TechnologyFields::from_row(t, self.schema)),
                    )
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(key: &str, no: &str) -> Row {
        [("file BOX ID", key), ("No", no)].into_iter().collect()
    }

    fn category(key: &str, primary: &str) -> Row {
        [
            ("file BOX ID", key),
            ("primary domain", primary),
            ("secondary domain", "sub"),
        ]
        .into_iter()
        .collect()
    }

    fn technology(key: &str, primary: &str) -> Row {
        [("file BOX ID", key), ("primary element", primary)]
            .into_iter()
            .collect()
    }

    fn run(details: Vec<Row>, cats: Vec<Row>, techs: Vec<Row>) -> Vec<MergedRow> {
        let schema = ColumnSchema::default();
        let cats = Table::from_rows(cats);
        let techs = Table::from_rows(techs);
        let cat_index = LookupIndex::build(&cats, &schema.key_column);
        let tech_index = LookupIndex::build(&techs, &schema.key_column);
        JoinEngine::new(&schema, &cat_index, &tech_index).merge(&Table::from_rows(details))
    }

    fn pairs(rows: &[MergedRow]) -> Vec<(String, String)> {
        let schema = ColumnSchema::default();
        rows.iter()
            .map(|r| {
                (
                    r.value("category-primary", &schema).to_string(),
                    r.value("tech-primary", &schema).to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_expansion_count() {
        assert_eq!(expansion_count(0, 0), 1);
        assert_eq!(expansion_count(2, 3), 6);
        assert_eq!(expansion_count(2, 0), 2);
        assert_eq!(expansion_count(0, 4), 4);
    }

    #[test]
    fn test_cross_product_is_category_major() {
        let merged = run(
            vec![detail("K", "1")],
            vec![category("K", "c1"), category("K", "c2")],
            vec![technology("K", "t1"), technology("K", "t2"), technology("K", "t3")],
        );

        assert_eq!(merged.len(), 6);
        let expected: Vec<(String, String)> = [
            ("c1", "t1"),
            ("c1", "t2"),
            ("c1", "t3"),
            ("c2", "t1"),
            ("c2", "t2"),
            ("c2", "t3"),
        ]
        .iter()
        .map(|(c, t)| (c.to_string(), t.to_string()))
        .collect();
        assert_eq!(pairs(&merged), expected);
        assert!(merged.iter().all(|r| r.detail.get("No") == Some("1")));
    }

    #[test]
    fn test_no_match_passes_detail_through() {
        let schema = ColumnSchema::default();
        let merged = run(
            vec![detail("LONE", "9")],
            vec![category("K", "c1")],
            vec![technology("K", "t1")],
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].category, None);
        assert_eq!(merged[0].technology, None);
        for column in schema.category_outputs.iter().chain(schema.technology_outputs.iter()) {
            assert_eq!(merged[0].value(column, &schema), "");
        }
        assert_eq!(merged[0].value("No", &schema), "9");
    }

    #[test]
    fn test_categories_only() {
        let schema = ColumnSchema::default();
        let merged = run(
            vec![detail("K", "1")],
            vec![category("K", "c1"), category("K", "c2")],
            vec![],
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(
            pairs(&merged),
            vec![
                ("c1".to_string(), String::new()),
                ("c2".to_string(), String::new())
            ]
        );
        assert_eq!(merged[0].value("category-secondary", &schema), "sub");
        assert_eq!(merged[0].value("category-tertiary", &schema), "");
    }

    #[test]
    fn test_technologies_only() {
        let merged = run(
            vec![detail("K", "1")],
            vec![],
            vec![technology("K", "t1"), technology("K", "t2")],
        );

        assert_eq!(
            pairs(&merged),
            vec![
                (String::new(), "t1".to_string()),
                (String::new(), "t2".to_string())
            ]
        );
    }

    #[test]
    fn test_detail_without_key_is_unmatched() {
        let mut row = Row::new();
        row.set("No", "3");
        let merged = run(vec![row], vec![category("", "c")], vec![technology("", "t")]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].category, None);
    }

    #[test]
    fn test_extension_fields_override_detail_columns() {
        let schema = ColumnSchema::default();
        let mut row = detail("K", "1");
        row.set("tech-primary", "stale");

        let merged = run(vec![row.clone()], vec![category("K", "c1")], vec![]);
        assert_eq!(merged[0].value("tech-primary", &schema), "");

        let merged = run(vec![row], vec![], vec![]);
        assert_eq!(merged[0].value("tech-primary", &schema), "stale");
    }

    #[test]
    fn test_row_count_conservation() {
        let details = vec![
            detail("A", "1"),
            detail("B", "2"),
            detail("C", "3"),
            detail("D", "4"),
            detail("A", "5"),
        ];
        let cats = vec![category("A", "x"), category("A", "y"), category("B", "z")];
        let techs = vec![
            technology("A", "p"),
            technology("A", "q"),
            technology("A", "r"),
            technology("C", "s"),
        ];

        let merged = run(details, cats, techs);
        let expected = expansion_count(2, 3) // A
            + expansion_count(1, 0) // B
            + expansion_count(0, 1) // C
            + expansion_count(0, 0) // D
            + expansion_count(2, 3); // A again
        assert_eq!(merged.len(), expected);

        let numbers: Vec<&str> = merged
            .iter()
            .map(|r| r.detail.get_or_empty("No"))
            .dedup()
            .collect();
        assert_eq!(numbers, vec!["1", "2", "3", "4", "5"]);
    }
}
