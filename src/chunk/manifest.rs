//! Replica manifest files
//!
//! After a replica's chunks are published, a small `manifest.json` sidecar
//! records what was generated: timestamp, replica index, seed, drawn size,
//! and the chunk file names. Batch jobs and re-runs can check it cheaply
//! instead of re-reading every chunk.

use super::writer::write_atomic;
use crate::error::{ResampleError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest file name within a replica directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Summary of one published replica.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicaManifest {
    /// Generation timestamp, `YYYY-MM-DD HH:MM:SS UTC`.
    pub generated_at: String,
    pub replica_index: u64,
    /// Base seed of the run; absent for entropy-seeded runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Drawn replica size (total rows across all chunks).
    pub n_events: u64,
    pub chunk_capacity: usize,
    /// Published chunk file names, in chunk order.
    pub chunk_files: Vec<String>,
}

impl ReplicaManifest {
    pub fn new(
        replica_index: u64,
        seed: Option<u64>,
        n_events: u64,
        chunk_capacity: usize,
        chunk_paths: &[PathBuf],
    ) -> Self {
        Self {
            generated_at: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            replica_index,
            seed,
            n_events,
            chunk_capacity,
            chunk_files: chunk_paths
                .iter()
                .filter_map(|p| p.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// Publish the manifest into `dir`, atomically.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILENAME);
        let bytes = serde_json::to_vec_pretty(self).map_err(|e| ResampleError::Write {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        write_atomic(&path, &bytes)?;
        Ok(path)
    }

    /// Read a manifest back from a replica directory.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILENAME);
        let contents = fs::read_to_string(&path).map_err(|e| ResampleError::PartitionRead {
            path: path.clone(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|e| ResampleError::PartitionRead {
            path,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = ReplicaManifest::new(
            7,
            Some(42),
            25,
            10,
            &[
                PathBuf::from("/out/chunk_0.json"),
                PathBuf::from("/out/chunk_1.json"),
                PathBuf::from("/out/chunk_2.json"),
            ],
        );

        let path = manifest.write(dir.path()).unwrap();
        assert!(path.ends_with(MANIFEST_FILENAME));

        let loaded = ReplicaManifest::from_dir(dir.path()).unwrap();
        assert_eq!(loaded.replica_index, 7);
        assert_eq!(loaded.seed, Some(42));
        assert_eq!(loaded.n_events, 25);
        assert_eq!(loaded.chunk_capacity, 10);
        assert_eq!(
            loaded.chunk_files,
            vec!["chunk_0.json", "chunk_1.json", "chunk_2.json"]
        );
    }

    #[test]
    fn test_manifest_omits_missing_seed() {
        let manifest = ReplicaManifest::new(0, None, 0, 10, &[]);
        let json = serde_json::to_string(&manifest).unwrap();
        assert!(!json.contains("seed"));
        assert!(manifest.chunk_files.is_empty());
    }
}
