//! Atomic chunk persistence
//!
//! Chunks are published write-then-rename: the payload lands in a `.tmp`
//! sibling first and only an atomic rename makes it visible under its final
//! name. An invocation killed mid-write leaves at worst a stale `.tmp` file,
//! never a partial chunk that a downstream reader could mistake for a
//! complete one.

use super::{plan_chunks, ChunkPlan};
use crate::error::{ResampleError, Result};
use crate::table::EventRecord;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk chunk payload. Field names match the source partition layout so
/// chunks can be read back as partitions.
#[derive(Debug, Serialize)]
struct ChunkFile<'a> {
    sum_weight_central: f64,
    sum_genw_presel: f64,
    columns: &'a [String],
    events: Vec<Vec<f64>>,
}

/// Persists one replica's chunks under a destination directory.
pub struct ChunkWriter {
    dir: PathBuf,
    capacity: usize,
}

impl ChunkWriter {
    pub fn new(dir: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            dir: dir.into(),
            capacity,
        }
    }

    /// Destination directory chunks are published into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Split `rows` into chunks and publish each as `chunk_<i>.json`.
    ///
    /// Returns the published paths in chunk order. A zero-row replica
    /// creates the destination directory but publishes zero chunk files.
    pub fn write_replica(
        &self,
        columns: &[String],
        rows: &[EventRecord],
        sum_genw_presel: f64,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir).map_err(|e| ResampleError::Write {
            path: self.dir.clone(),
            source: e,
        })?;

        let plans = plan_chunks(rows, self.capacity, sum_genw_presel);
        let mut paths = Vec::with_capacity(plans.len());
        for plan in &plans {
            paths.push(self.write_chunk(columns, plan)?);
        }
        Ok(paths)
    }

    fn write_chunk(&self, columns: &[String], plan: &ChunkPlan<'_>) -> Result<PathBuf> {
        let payload = ChunkFile {
            sum_weight_central: plan.sum_weight_central,
            sum_genw_presel: plan.sum_genw_presel,
            columns,
            events: plan.rows.iter().map(|r| r.to_values()).collect(),
        };

        let path = self.dir.join(format!("chunk_{}.json", plan.index));
        let bytes = serde_json::to_vec(&payload).map_err(|e| ResampleError::Write {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        write_atomic(&path, &bytes)?;
        Ok(path)
    }
}

/// Write `bytes` to `path` via a temporary sibling and an atomic rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);
    fs::write(&tmp, bytes).map_err(|e| ResampleError::Write {
        path: tmp.clone(),
        source: e,
    })?;
    fs::rename(&tmp, path).map_err(|e| ResampleError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
