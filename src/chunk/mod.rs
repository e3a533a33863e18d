//! Replica chunking
//!
//! A replica's drawn rows are split into contiguous fixed-capacity slices,
//! each persisted as one storage unit. Chunking retains every drawn row,
//! duplicates included; downstream cross-section recovery depends on the
//! full resampled weight mass being represented.
//!
//! # Chunk Metadata
//!
//! Each chunk carries two scalars under the same names a source partition
//! uses, with different provenance:
//!
//! - `sum_weight_central`: the sum of `weight` over the rows in this chunk,
//!   i.e. the resampled weight mass of the chunk
//! - `sum_genw_presel`: the original sample's constant divided evenly by the
//!   replica's chunk count, so summing the field across a replica's chunks
//!   reconstructs the constant exactly

pub mod manifest;
pub mod writer;

use crate::table::EventRecord;

/// One planned chunk: a contiguous row slice plus its scaled metadata.
#[derive(Debug)]
pub struct ChunkPlan<'a> {
    /// Zero-based sequential chunk index within the replica.
    pub index: usize,
    pub rows: &'a [EventRecord],
    /// Resampled weight mass of this chunk.
    pub sum_weight_central: f64,
    /// Original-sample constant divided by the replica's chunk count.
    pub sum_genw_presel: f64,
}

/// Split a replica's rows into `ceil(n / capacity)` chunks, preserving draw
/// order, and compute each chunk's metadata.
///
/// Zero rows plan zero chunks. `capacity` must be at least 1.
pub fn plan_chunks(rows: &[EventRecord], capacity: usize, sum_genw_presel: f64) -> Vec<ChunkPlan<'_>> {
    assert!(capacity > 0, "chunk capacity must be at least 1");

    if rows.is_empty() {
        return Vec::new();
    }

    let num_chunks = (rows.len() + capacity - 1) / capacity;
    rows.chunks(capacity)
        .enumerate()
        .map(|(index, rows)| ChunkPlan {
            index,
            rows,
            sum_weight_central: rows.iter().map(|r| r.weight).sum(),
            sum_genw_presel: sum_genw_presel / num_chunks as f64,
        })
        .collect()
}
