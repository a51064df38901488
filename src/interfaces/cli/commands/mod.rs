mod config_gen;
mod import_export;
mod lookup;
mod recompute;

pub use config_gen::config_generate;
pub use import_export::{export_stats, import_postings};
pub use lookup::lookup_stats;
pub use recompute::{RecomputeOverrides, recompute};
