//! Weighted event table
//!
//! The in-memory representation of the original sample: all partition rows
//! concatenated, plus the two normalization constants summed across source
//! files. The constants are properties of the original sample, determined
//! once at load time and treated as read-only for the lifetime of a
//! resampling run; recomputing them from resampled data would silently
//! corrupt the downstream normalization.

pub mod partition;

use crate::error::{ResampleError, Result};
use partition::{Partition, REQUIRED_COLUMNS};
use std::path::{Path, PathBuf};

/// One event row: the physical observable, the two weights, and any
/// passthrough analysis columns in table schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub mass: f64,
    pub weight: f64,
    pub gen_weight: f64,
    /// Passthrough column values, ordered per [`EventTable::extra_columns`].
    pub extra: Vec<f64>,
}

impl EventRecord {
    /// Flatten back into a row matching [`EventTable::columns`] order.
    pub fn to_values(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(3 + self.extra.len());
        values.push(self.mass);
        values.push(self.weight);
        values.push(self.gen_weight);
        values.extend_from_slice(&self.extra);
        values
    }
}

/// The original sample with its frozen normalization constants.
///
/// Row order across partitions is insignificant; partitions are read in
/// file-name order so that repeated loads of the same directory agree.
#[derive(Debug, Clone)]
pub struct EventTable {
    /// Normalized column order: `mass`, `weight`, `genWeight`, then
    /// passthrough columns in first-partition order.
    columns: Vec<String>,
    events: Vec<EventRecord>,
    sum_weight_central: f64,
    sum_genw_presel: f64,
    n_partitions: usize,
}

impl EventTable {
    /// Load every `*.json` partition under `dir` into a single table.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir).map_err(|e| ResampleError::PartitionRead {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(ResampleError::NoPartitions {
                dir: dir.to_path_buf(),
            });
        }

        let mut partitions = Vec::with_capacity(paths.len());
        for path in paths {
            let partition = Partition::from_file(&path)?;
            partitions.push((path, partition));
        }

        Self::from_partitions(partitions)
    }

    /// Aggregate already-read partitions: concatenate rows, sum the two
    /// scalars. Pure; no side effects.
    pub fn from_partitions(partitions: Vec<(PathBuf, Partition)>) -> Result<Self> {
        let first = partitions
            .first()
            .ok_or(ResampleError::NoPartitions { dir: PathBuf::new() })?;

        // Column sets must agree across partitions; order may differ.
        let mut expected: Vec<String> = first.1.columns.clone();
        expected.sort();

        let mut columns: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(
            first
                .1
                .columns
                .iter()
                .filter(|c| !REQUIRED_COLUMNS.contains(&c.as_str()))
                .cloned(),
        );
        let extra_names: Vec<String> = columns[REQUIRED_COLUMNS.len()..].to_vec();

        let mut events = Vec::new();
        let mut sum_weight_central = 0.0;
        let mut sum_genw_presel = 0.0;
        let n_partitions = partitions.len();

        for (path, partition) in &partitions {
            partition.validate(path)?;

            let mut found: Vec<String> = partition.columns.clone();
            found.sort();
            if found != expected {
                return Err(ResampleError::SchemaMismatch {
                    path: path.clone(),
                    expected: format!("[{}]", expected.join(", ")),
                    found: format!("[{}]", found.join(", ")),
                });
            }

            // validate() guarantees these indices exist.
            let mass_idx = partition.column_index("mass").unwrap_or(0);
            let weight_idx = partition.column_index("weight").unwrap_or(0);
            let genw_idx = partition.column_index("genWeight").unwrap_or(0);
            let extra_indices: Vec<usize> = extra_names
                .iter()
                .filter_map(|name| partition.column_index(name))
                .collect();

            for values in &partition.events {
                events.push(EventRecord {
                    mass: values[mass_idx],
                    weight: values[weight_idx],
                    gen_weight: values[genw_idx],
                    extra: extra_indices.iter().map(|&i| values[i]).collect(),
                });
            }

            sum_weight_central += partition.sum_weight_central.unwrap_or(0.0);
            sum_genw_presel += partition.sum_genw_presel.unwrap_or(0.0);
        }

        Ok(Self {
            columns,
            events,
            sum_weight_central,
            sum_genw_presel,
            n_partitions,
        })
    }

    /// Number of events in the table.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of source partitions the table was built from.
    pub fn n_partitions(&self) -> usize {
        self.n_partitions
    }

    /// Normalized column order used for all rows and written chunks.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Passthrough column names, in the order of [`EventRecord::extra`].
    pub fn extra_columns(&self) -> &[String] {
        &self.columns[REQUIRED_COLUMNS.len()..]
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn event(&self, index: usize) -> &EventRecord {
        &self.events[index]
    }

    /// Central event weights, in row order.
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.events.iter().map(|e| e.weight)
    }

    /// Sum of central weights over the original sample, from metadata.
    pub fn sum_weight_central(&self) -> f64 {
        self.sum_weight_central
    }

    /// Sum of generator weights before preselection, from metadata.
    pub fn sum_genw_presel(&self) -> f64 {
        self.sum_genw_presel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_partition(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_load_dir_aggregates_partitions() {
        let dir = tempfile::tempdir().unwrap();
        write_partition(
            dir.path(),
            "part_0.json",
            r#"{"sum_weight_central": 4.0, "sum_genw_presel": 100.0,
                "columns": ["mass", "weight", "genWeight", "pt"],
                "events": [[125.0, 1.0, 1.1, 50.0], [124.5, 3.0, 0.9, 40.0]]}"#,
        );
        write_partition(
            dir.path(),
            "part_1.json",
            r#"{"sum_weight_central": 2.0, "sum_genw_presel": 50.0,
                "columns": ["mass", "weight", "genWeight", "pt"],
                "events": [[126.0, 0.5, 1.0, 60.0]]}"#,
        );

        let table = EventTable::load_dir(dir.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.n_partitions(), 2);
        assert_eq!(table.sum_weight_central(), 6.0);
        assert_eq!(table.sum_genw_presel(), 150.0);
        assert_eq!(table.columns(), &["mass", "weight", "genWeight", "pt"]);
        assert_eq!(table.extra_columns(), &["pt"]);

        // part_0 sorts before part_1, so its rows come first
        assert_eq!(table.event(0).mass, 125.0);
        assert_eq!(table.event(0).weight, 1.0);
        assert_eq!(table.event(0).extra, vec![50.0]);
        assert_eq!(table.event(2).weight, 0.5);
    }

    #[test]
    fn test_load_dir_reordered_columns() {
        // Same column set in a different order must still land in the
        // normalized layout.
        let dir = tempfile::tempdir().unwrap();
        write_partition(
            dir.path(),
            "a.json",
            r#"{"sum_weight_central": 1.0, "sum_genw_presel": 10.0,
                "columns": ["mass", "weight", "genWeight"],
                "events": [[125.0, 1.0, 1.5]]}"#,
        );
        write_partition(
            dir.path(),
            "b.json",
            r#"{"sum_weight_central": 1.0, "sum_genw_presel": 10.0,
                "columns": ["genWeight", "mass", "weight"],
                "events": [[2.5, 126.0, 2.0]]}"#,
        );

        let table = EventTable::load_dir(dir.path()).unwrap();
        assert_eq!(table.event(1).mass, 126.0);
        assert_eq!(table.event(1).weight, 2.0);
        assert_eq!(table.event(1).gen_weight, 2.5);
    }

    #[test]
    fn test_load_dir_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_partition(
            dir.path(),
            "a.json",
            r#"{"sum_weight_central": 1.0, "sum_genw_presel": 10.0,
                "columns": ["mass", "weight", "genWeight", "pt"],
                "events": []}"#,
        );
        write_partition(
            dir.path(),
            "b.json",
            r#"{"sum_weight_central": 1.0, "sum_genw_presel": 10.0,
                "columns": ["mass", "weight", "genWeight", "eta"],
                "events": []}"#,
        );

        let err = EventTable::load_dir(dir.path()).unwrap_err();
        match err {
            ResampleError::SchemaMismatch { path, .. } => {
                assert!(path.ends_with("b.json"));
            }
            other => panic!("expected SchemaMismatch, got {other}"),
        }
    }

    #[test]
    fn test_load_dir_empty() {
        let dir = tempfile::tempdir().unwrap();
        let err = EventTable::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ResampleError::NoPartitions { .. }));
    }

    #[test]
    fn test_load_dir_ignores_non_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        write_partition(
            dir.path(),
            "part_0.json",
            r#"{"sum_weight_central": 1.0, "sum_genw_presel": 10.0,
                "columns": ["mass", "weight", "genWeight"],
                "events": [[125.0, 1.0, 1.0]]}"#,
        );

        let table = EventTable::load_dir(dir.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.n_partitions(), 1);
    }

    #[test]
    fn test_record_round_trip() {
        let record = EventRecord {
            mass: 125.0,
            weight: 0.9,
            gen_weight: 1.1,
            extra: vec![55.0, -1.2],
        };
        assert_eq!(record.to_values(), vec![125.0, 0.9, 1.1, 55.0, -1.2]);
    }
}
