// Domain layer - Core models and pure analytics inputs/outputs
pub mod history;
pub mod metric;
pub mod runner;
pub mod snapshot;
