//! # Stats
//!
//! $$
//! \Delta y_t=\gamma y_{t-1}+\sum_{i=1}^{p}\theta_i\Delta y_{t-i}+\varepsilon_t
//! $$
//!
pub mod stationarity;
