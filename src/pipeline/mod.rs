//! Days-to-hire statistics recomputation pipeline
//!
//! raw postings → grouped extraction → per-group aggregation →
//! staged rows → committed snapshot.
//!
//! - `aggregator`: outlier-trimmed statistics for one sample
//! - `snapshot`: clearing and page-wise writing of the stats table
//! - `driver`: keyset-paginated run over both grouping scopes

pub mod aggregator;
pub mod driver;
pub mod snapshot;

pub use aggregator::{Aggregate, DEFAULT_MIN_POSTINGS, TrimmedStats, calculate_stats};
pub use driver::{PipelineSettings, RecomputeDriver, RecomputeReport, recompute_stats};
pub use snapshot::SnapshotWriter;
