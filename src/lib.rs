//! replicamc - Weighted Poisson bootstrap replica generator
//!
//! replicamc turns a single weighted Monte-Carlo event sample into many
//! statistically independent "replica" datasets for bootstrap-style
//! uncertainty estimation. Each replica's event count is a Poisson draw
//! around an expected yield, its rows are drawn with replacement using
//! weight-proportional probability, and its output chunks carry the
//! normalization metadata needed to recover a physical cross-section later.
//!
//! # Architecture
//!
//! - **Weighted event table**: source partitions concatenated once, with the
//!   two normalization constants summed across files and frozen
//! - **Replica size sampler**: Poisson(mu) draws, one per replica
//! - **Weighted bootstrap sampler**: with-replacement index draws, weighted
//!   or uniform
//! - **Chunk writer**: fixed-capacity slices published atomically with
//!   rescaled metadata
//! - **Orchestrator**: single-replica batch invocations or an in-process
//!   ensemble loop

pub mod chunk;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod sampler;
pub mod table;

// Re-export commonly used types
pub use config::Config;
pub use error::{ResampleError, Result};
pub use table::EventTable;
