pub mod aggregator;
pub mod classifier;
pub mod forms;
