//! Source partition file handling
//!
//! A partition is one JSON file of the original sample: a row-oriented event
//! table plus the two normalization scalars carried in its metadata. Chunk
//! files written by this tool use the same layout, so a replica's chunks can
//! be read back with the same code that reads the source sample.
//!
//! # File Format
//!
//! ```json
//! {
//!   "sum_weight_central": 12.5,
//!   "sum_genw_presel": 100.0,
//!   "columns": ["mass", "weight", "genWeight", "pt"],
//!   "events": [[125.1, 0.9, 1.0, 55.2]]
//! }
//! ```
//!
//! `columns` must contain `mass`, `weight`, and `genWeight`; anything else is
//! a passthrough analysis column carried through resampling unmodified.

use crate::error::{ResampleError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Columns every partition must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = ["mass", "weight", "genWeight"];

/// One source partition as read from disk.
///
/// The two scalars are optional at the serde level so that a file missing
/// them can be reported as a [`ResampleError::MissingMetadata`] with the
/// offending field name instead of a generic decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partition {
    /// Sum of central event weights over the original, unresampled sample.
    #[serde(default)]
    pub sum_weight_central: Option<f64>,

    /// Sum of generator weights before the preselection cut.
    #[serde(default)]
    pub sum_genw_presel: Option<f64>,

    /// Ordered column names, one per value in each event row.
    pub columns: Vec<String>,

    /// Event rows, each with one value per column.
    pub events: Vec<Vec<f64>>,
}

impl Partition {
    /// Read and validate a partition file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ResampleError::PartitionRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let partition: Partition =
            serde_json::from_str(&contents).map_err(|e| ResampleError::PartitionRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        partition.validate(path)?;
        Ok(partition)
    }

    /// Check required metadata, required columns, and row arity.
    pub fn validate(&self, path: &Path) -> Result<()> {
        if self.sum_weight_central.is_none() {
            return Err(ResampleError::MissingMetadata {
                path: path.to_path_buf(),
                field: "sum_weight_central",
            });
        }
        if self.sum_genw_presel.is_none() {
            return Err(ResampleError::MissingMetadata {
                path: path.to_path_buf(),
                field: "sum_genw_presel",
            });
        }

        for required in REQUIRED_COLUMNS {
            if !self.columns.iter().any(|c| c == required) {
                return Err(ResampleError::SchemaMismatch {
                    path: path.to_path_buf(),
                    expected: format!("columns including {}", REQUIRED_COLUMNS.join(", ")),
                    found: format!("[{}]", self.columns.join(", ")),
                });
            }
        }

        for (row, values) in self.events.iter().enumerate() {
            if values.len() != self.columns.len() {
                return Err(ResampleError::SchemaMismatch {
                    path: path.to_path_buf(),
                    expected: format!("{} values per row", self.columns.len()),
                    found: format!("{} values in row {}", values.len(), row),
                });
            }
        }

        Ok(())
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn sample_json() -> &'static str {
        r#"{
            "sum_weight_central": 4.0,
            "sum_genw_presel": 100.0,
            "columns": ["mass", "weight", "genWeight", "pt"],
            "events": [
                [125.1, 1.0, 1.1, 55.2],
                [124.8, 3.0, 0.9, 43.0]
            ]
        }"#
    }

    #[test]
    fn test_partition_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_json().as_bytes()).unwrap();

        let partition = Partition::from_file(file.path()).unwrap();
        assert_eq!(partition.sum_weight_central, Some(4.0));
        assert_eq!(partition.sum_genw_presel, Some(100.0));
        assert_eq!(partition.columns.len(), 4);
        assert_eq!(partition.events.len(), 2);
        assert_eq!(partition.column_index("weight"), Some(1));
        assert_eq!(partition.column_index("pt"), Some(3));
        assert_eq!(partition.column_index("eta"), None);
    }

    #[test]
    fn test_partition_missing_metadata() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"sum_weight_central": 4.0, "columns": ["mass", "weight", "genWeight"], "events": []}"#,
        )
        .unwrap();

        let err = Partition::from_file(file.path()).unwrap_err();
        match err {
            ResampleError::MissingMetadata { field, .. } => {
                assert_eq!(field, "sum_genw_presel");
            }
            other => panic!("expected MissingMetadata, got {other}"),
        }
    }

    #[test]
    fn test_partition_missing_required_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"sum_weight_central": 1.0, "sum_genw_presel": 1.0, "columns": ["mass", "weight"], "events": []}"#,
        )
        .unwrap();

        let err = Partition::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ResampleError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_partition_row_arity_mismatch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"sum_weight_central": 1.0, "sum_genw_presel": 1.0,
                 "columns": ["mass", "weight", "genWeight"],
                 "events": [[125.0, 1.0]]}"#,
        )
        .unwrap();

        let err = Partition::from_file(file.path()).unwrap_err();
        match err {
            ResampleError::SchemaMismatch { found, .. } => {
                assert!(found.contains("row 0"));
            }
            other => panic!("expected SchemaMismatch, got {other}"),
        }
    }

    #[test]
    fn test_partition_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json at all").unwrap();

        let err = Partition::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ResampleError::PartitionRead { .. }));
    }
}
