use std::error::Error;
use std::fmt;

/// Failures raised by the ADF pipeline.
///
/// Returned wrapped in [`anyhow::Error`]; use `err.downcast_ref::<ADFError>()`
/// to match on the kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ADFError {
  /// Fewer observations than the requested lag order needs.
  InsufficientData { required: usize, actual: usize },
  /// Lag matrix requested with zero columns or more columns than observations.
  InvalidLag { lag: usize, len: usize },
  /// Series contains NaN or infinite values.
  NonFiniteInput,
  /// Significance level without a tabulated critical value.
  InvalidSignificance(f64),
  /// Design rows and response length differ.
  DimensionMismatch { rows: usize, len: usize },
  /// Ridge fit produced no, non-finite, or zero-variance lagged level estimate.
  SingularDesign,
}

impl fmt::Display for ADFError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ADFError::InsufficientData { required, actual } => write!(
        f,
        "series must have at least {required} observations, got {actual}"
      ),
      ADFError::InvalidLag { lag, len } => {
        write!(f, "lag {lag} is invalid for a series of length {len}")
      }
      ADFError::NonFiniteInput => write!(f, "series must contain only finite values"),
      ADFError::InvalidSignificance(alpha) => {
        write!(f, "alpha must be one of 0.01, 0.05, 0.10, got {alpha}")
      }
      ADFError::DimensionMismatch { rows, len } => write!(
        f,
        "design has {rows} rows but response has {len} elements"
      ),
      ADFError::SingularDesign => write!(
        f,
        "ridge regression failed: singular design or degenerate standard error"
      ),
    }
  }
}

impl Error for ADFError {}
