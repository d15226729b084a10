#![recursion_limit = "256"]

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;
pub mod error;

pub use domain::record::{DomainRecord, DomainType, Prediction};
pub use domain::traits::Detector;
pub use error::{DgaError, DgaResult};
pub use ml::detector::DgaDetector;
pub use ml::trainer::{TrainParams, TrainingReport};
