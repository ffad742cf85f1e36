pub mod config;
pub mod data;
pub mod dataset;
pub mod error;
pub mod features;
pub mod forecaster;
pub mod indicator;
pub mod model;
pub mod pipeline;
pub mod signal;
