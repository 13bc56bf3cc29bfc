//! Stationarity and unit-root tests.

mod common;
pub mod error;
pub mod ridge;

pub mod adf;

pub use common::adf_critical_values;
pub use common::build_adf_design;
pub use common::difference;
pub use common::lagged_matrix;
pub use common::mean_center;
pub use common::AdfDesign;
pub use common::CriticalValues;
