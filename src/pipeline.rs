//! Load -> index -> join -> write, end to end.

use crate::config::MergeConfig;
use crate::error::{JoinError, Result};
use crate::index::LookupIndex;
use crate::join::JoinEngine;
use crate::loader::load_table;
use crate::summary::RunSummary;
use crate::writer::save_merged;
use tracing::info;

/// Run one merge.
///
/// Loading and writing failures are logged and degrade to empty input or a
/// skipped write. The only hard stop is an empty detail table, reported as
/// [`JoinError::EmptyDetails`] before anything is written.
pub fn run(config: &MergeConfig) -> Result<RunSummary> {
    let schema = &config.schema;

    let details = load_table(&config.details_path, schema);
    let categories = load_table(&config.categories_path, schema);
    let technologies = load_table(&config.technologies_path, schema);

    if details.is_empty() {
        return Err(JoinError::EmptyDetails {
            path: config.details_path.clone(),
        });
    }

    let category_index = LookupIndex::build(&categories, &schema.key_column);
    let technology_index = LookupIndex::build(&technologies, &schema.key_column);
    info!(
        "Indexed {} category rows under {} keys, {} technology rows under {} keys",
        category_index.row_count(),
        category_index.len(),
        technology_index.row_count(),
        technology_index.len()
    );

    let merged = JoinEngine::new(schema, &category_index, &technology_index).merge(&details);

    let mut summary = RunSummary::new(
        &details,
        &categories,
        &technologies,
        merged.len(),
        &schema.key_column,
    );
    summary.rows_written = save_merged(&merged, schema, &config.output_path);
    Ok(summary)
}
