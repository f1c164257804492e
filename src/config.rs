use crate::error::Result;
use crate::schema::ColumnSchema;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DETAILS_FILE: &str = "file_details.csv";
pub const CATEGORIES_FILE: &str = "file_categories.csv";
pub const TECHNOLOGIES_FILE: &str = "file_technologies.csv";
pub const OUTPUT_FILE: &str = "merged_file_data.csv";

/// Environment variable naming the directory that holds the input exports.
pub const DIR_ENV: &str = "BOX_JOIN_DIR";

/// Where the three inputs live, where the output goes, and which columns to use.
#[derive(Clone, Debug)]
pub struct MergeConfig {
    pub details_path: PathBuf,
    pub categories_path: PathBuf,
    pub technologies_path: PathBuf,
    pub output_path: PathBuf,
    pub schema: ColumnSchema,
}

impl MergeConfig {
    /// Standard file names inside `base_dir` with the default schema.
    pub fn in_dir(base_dir: &Path) -> Self {
        Self {
            details_path: base_dir.join(DETAILS_FILE),
            categories_path: base_dir.join(CATEGORIES_FILE),
            technologies_path: base_dir.join(TECHNOLOGIES_FILE),
            output_path: base_dir.join(OUTPUT_FILE),
            schema: ColumnSchema::default(),
        }
    }

    /// `--dir`, then `BOX_JOIN_DIR`, then the directory of the running
    /// executable, then the working directory.
    pub fn resolve_base_dir(explicit: Option<PathBuf>) -> PathBuf {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self::pick_base_dir(explicit, std::env::var_os(DIR_ENV), exe_dir)
    }

    fn pick_base_dir(
        explicit: Option<PathBuf>,
        env_dir: Option<OsString>,
        exe_dir: Option<PathBuf>,
    ) -> PathBuf {
        explicit
            .or_else(|| env_dir.map(PathBuf::from))
            .or(exe_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn with_schema_file(mut self, path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            self.schema = ColumnSchema::from_json_file(path)?;
        }
        Ok(self)
    }
}
