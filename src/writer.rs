use crate::error::{JoinError, Result};
use crate::join::MergedRow;
use crate::schema::ColumnSchema;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;
use std::path::Path;
use tracing::{error, info, warn};

/// Write merged rows as tab-delimited text in the schema's output order.
///
/// Columns a row lacks are written empty; detail columns outside the layout
/// are not written.
pub fn write_rows<W: Write>(
    rows: &[MergedRow],
    schema: &ColumnSchema,
    sink: W,
) -> std::result::Result<(), csv::Error> {
    let columns = schema.output_columns();
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(sink);

    wtr.write_record(&columns)?;
    for row in rows {
        wtr.write_record(columns.iter().map(|column| row.value(column, schema)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `rows` to `path`. The file is only created when there is something
/// to write.
pub fn write_merged(rows: &[MergedRow], schema: &ColumnSchema, path: &Path) -> Result<usize> {
    if rows.is_empty() {
        return Err(JoinError::EmptyResult);
    }
    let file = std::fs::File::create(path).map_err(|e| JoinError::write(path, e))?;
    write_rows(rows, schema, std::io::BufWriter::new(file))
        .map_err(|e| JoinError::write(path, e))?;
    Ok(rows.len())
}

/// Stage-boundary wrapper: logs any failure and returns the number of rows
/// written, or `None` if nothing was saved.
pub fn save_merged(rows: &[MergedRow], schema: &ColumnSchema, path: &Path) -> Option<usize> {
    match write_merged(rows, schema, path) {
        Ok(count) => {
            info!("Merged data saved to {} ({} rows)", path.display(), count);
            Some(count)
        }
        Err(e @ JoinError::EmptyResult) => {
            warn!("{}", e);
            None
        }
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::{CategoryFields, TechnologyFields};
    use crate::row::Row;

    fn merged(no: &str, category: Option<&str>, tech: Option<&str>) -> MergedRow {
        let detail: Row = [("No", no), ("file BOX ID", "B1"), ("unlisted", "x")]
            .into_iter()
            .collect();
        MergedRow {
            detail,
            category: category.map(|p| CategoryFields {
                primary: p.to_string(),
                ..Default::default()
            }),
            technology: tech.map(|p| TechnologyFields {
                primary: p.to_string(),
                ..Default::default()
            }),
        }
    }

    fn render(rows: &[MergedRow]) -> String {
        let mut buf = Vec::new();
        write_rows(rows, &ColumnSchema::default(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_fixed_layout() {
        let out = render(&[merged("1", Some("X"), Some("Y")), merged("2", None, None)]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            concat!(
                "No\tfile BOX ID\tcompleteness\tcreation date\torganization date\t",
                "related folder\tfile name\t",
                "category-primary\tcategory-secondary\tcategory-tertiary\t",
                "tech-primary\ttech-secondary\ttech-tertiary",
            )
        );
        assert_eq!(lines[1], "1\tB1\t\t\t\t\t\tX\t\t\tY\t\t");
        assert_eq!(lines[2], "2\tB1\t\t\t\t\t\t\t\t\t\t\t");
        assert!(!out.contains("unlisted"));
        assert!(out.ends_with("\r\n"));
    }

    #[test]
    fn test_fields_with_tabs_are_quoted() {
        let mut row = merged("1", None, None);
        row.detail.set("file name", "a\tb");
        let out = render(&[row]);
        assert!(out.contains("\"a\tb\""));
    }

    #[test]
    fn test_empty_result_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let schema = ColumnSchema::default();

        assert!(matches!(
            write_merged(&[], &schema, &path),
            Err(JoinError::EmptyResult)
        ));
        assert_eq!(save_merged(&[], &schema, &path), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_destination_is_recovered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        let schema = ColumnSchema::default();
        let rows = vec![merged("1", None, None)];

        let err = write_merged(&rows, &schema, &path).unwrap_err();
        assert!(matches!(err, JoinError::WriteFailure { .. }));
        let cause = std::error::Error::source(&err).unwrap();
        assert!(cause.downcast_ref::<std::io::Error>().is_some());
        assert_eq!(save_merged(&rows, &schema, &path), None);
    }

    #[test]
    fn test_save_reports_row_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![merged("1", Some("X"), None), merged("2", None, Some("Y"))];

        assert_eq!(save_merged(&rows, &ColumnSchema::default(), &path), Some(2));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
    }
}
