//! # stationarity-rs
//!
//! Augmented Dickey-Fuller unit-root test on a ridge-regularized regression.
//!
//! ```ignore
//! use stationarity_rs::stats::stationarity::adf::{ADFConfig, ADFTest};
//!
//! let mut test = ADFTest::new(&series, ADFConfig::default());
//! let result = test.run()?;
//! println!("{} stationary={}", result.statistic, test.is_stationary());
//! ```
//!
pub mod stats;

pub use stats::stationarity::adf::adf_test;
pub use stats::stationarity::adf::ADFConfig;
pub use stats::stationarity::adf::ADFResult;
pub use stats::stationarity::adf::ADFTest;
pub use stats::stationarity::error::ADFError;
