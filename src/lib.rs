pub mod config;
pub mod error;
pub mod index;
pub mod join;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod row;
pub mod schema;
pub mod summary;
pub mod writer;

pub use config::MergeConfig;
pub use error::{JoinError, Result};
pub use index::LookupIndex;
pub use join::{expansion_count, CategoryFields, JoinEngine, MergedRow, TechnologyFields};
pub use normalize::{normalize_box_id, JoinKey};
pub use row::{Row, Table};
pub use schema::ColumnSchema;
pub use summary::RunSummary;
