pub mod config;
pub mod errors;
pub mod estimator;
pub mod library;
pub mod output;
pub mod registry;
pub mod runner;
pub mod trials;
pub mod tune_classifier;
pub mod tune_regressor;
pub use anyhow;
