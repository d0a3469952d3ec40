pub mod artifact;
pub mod encode;
pub mod store;
pub mod tree;

#[cfg(test)]
pub(crate) mod fixtures;

pub use store::ModelStore;

use crate::error::Result;
use crate::types::FeatureRecord;

/// Occupancy-bucket classifier as seen by the orchestrator.
pub trait OccupancyModel {
    fn predict(&self, record: &FeatureRecord) -> Result<String>;
    /// One `(class, probability)` pair per known class.
    fn predict_proba(&self, record: &FeatureRecord) -> Result<Vec<(String, f64)>>;
}

/// Box-office revenue regressor as seen by the orchestrator.
pub trait RevenueModel {
    fn predict(&self, record: &FeatureRecord) -> Result<f64>;
}
