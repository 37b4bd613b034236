use std::path::Path;

pub mod centroids;
pub mod combiner;
pub mod config;
pub mod error;

pub use combiner::{CollectSummary, Collected, ParcelFeature, SourceShape};
pub use config::CombineConfig;
pub use error::{CombineError, Result};

pub fn collect_parcels(source_dir: &Path) -> Result<Collected> {
    combiner::collect(source_dir)
}

pub fn combine_parcels(config: &CombineConfig) -> Result<CollectSummary> {
    combiner::combine(config)
}
