use anyhow::bail;
use anyhow::Result;
use ndarray::s;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;
use statrs::statistics::Statistics;

use super::error::ADFError;

#[derive(Debug, Clone, Copy)]
pub struct CriticalValues {
  pub one_percent: f64,
  pub five_percent: f64,
  pub ten_percent: f64,
}

impl CriticalValues {
  pub fn value_at(self, alpha: f64) -> f64 {
    if alpha <= 0.01 {
      self.one_percent
    } else if alpha <= 0.05 {
      self.five_percent
    } else {
      self.ten_percent
    }
  }
}

/// Asymptotic MacKinnon-style values for a regression on a demeaned series.
pub fn adf_critical_values() -> CriticalValues {
  CriticalValues {
    one_percent: -3.43,
    five_percent: -2.86,
    ten_percent: -2.57,
  }
}

/// Response and regressors of the ADF regression.
///
/// `design` column 0 is the lagged level, columns `1..` are lagged differences.
#[derive(Debug, Clone)]
pub struct AdfDesign {
  pub response: Array1<f64>,
  pub design: Array2<f64>,
}

pub fn validate_series(y: &[f64], min_n: usize) -> Result<()> {
  if y.len() < min_n {
    bail!(ADFError::InsufficientData {
      required: min_n,
      actual: y.len(),
    });
  }
  if !y.iter().all(|v| v.is_finite()) {
    bail!(ADFError::NonFiniteInput);
  }
  Ok(())
}

/// Subtracts the sample mean in place and returns it.
pub fn mean_center(y: &mut [f64]) -> f64 {
  if y.is_empty() {
    return 0.0;
  }
  let mean = y.iter().mean();
  if mean != 0.0 {
    y.iter_mut().for_each(|v| *v -= mean);
  }
  mean
}

pub fn difference(y: &[f64]) -> Vec<f64> {
  y.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Matrix of successively lagged copies of `series`.
///
/// Shape is `(len - lag + 1) x lag` with entry `(i, j) = series[lag - j - 1 + i]`,
/// so column 0 is the most recent value in each window.
pub fn lagged_matrix(series: &[f64], lag: usize) -> Result<Array2<f64>> {
  if lag == 0 || lag > series.len() {
    bail!(ADFError::InvalidLag {
      lag,
      len: series.len(),
    });
  }

  let rows = series.len() - lag + 1;
  Ok(Array2::from_shape_fn((rows, lag), |(i, j)| {
    series[lag - j - 1 + i]
  }))
}

/// Builds the ADF regression from an already centered series.
pub fn build_adf_design(centered: &[f64], lag: usize) -> Result<AdfDesign> {
  validate_series(centered, lag.saturating_add(2))?;

  let n = centered.len() - 1;
  let dy = difference(centered);
  let k = lag + 1;
  let z = lagged_matrix(&dy, k)?;
  let rows = z.nrows();

  let response = z.column(0).to_owned();
  let mut design = Array2::<f64>::zeros((rows, k));
  // y_{t-1} aligned with the response window.
  design
    .column_mut(0)
    .assign(&ArrayView1::from(&centered[k - 1..n]));
  if k > 1 {
    design
      .slice_mut(s![.., 1..])
      .assign(&z.slice(s![.., 1..]));
  }

  Ok(AdfDesign { response, design })
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn difference_has_expected_values() {
    let x = [1.0, 4.0, 2.0, 2.5, -1.0];
    let d = difference(&x);
    assert_eq!(d.len(), x.len() - 1);
    for i in 0..d.len() {
      assert_abs_diff_eq!(d[i], x[i + 1] - x[i]);
    }
  }

  #[test]
  fn difference_of_single_point_is_empty() {
    assert!(difference(&[3.0]).is_empty());
  }

  #[test]
  fn lagged_matrix_shape_and_layout() {
    let s = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    for lag in 1..=s.len() {
      let m = lagged_matrix(&s, lag).unwrap();
      assert_eq!(m.dim(), (s.len() - lag + 1, lag));
      assert_eq!(m[[0, 0]], s[lag - 1]);
    }

    let m = lagged_matrix(&s, 3).unwrap();
    assert_eq!(
      m,
      array![
        [3.0, 2.0, 1.0],
        [4.0, 3.0, 2.0],
        [5.0, 4.0, 3.0],
        [6.0, 5.0, 4.0]
      ]
    );
  }

  #[test]
  fn lagged_matrix_rejects_bad_lag() {
    let s = [1.0, 2.0, 3.0];
    for lag in [0, 4] {
      let err = lagged_matrix(&s, lag).unwrap_err();
      assert_eq!(
        err.downcast_ref::<ADFError>(),
        Some(&ADFError::InvalidLag { lag, len: 3 })
      );
    }
  }

  #[test]
  fn mean_center_is_idempotent() {
    let mut x = vec![1.5, 3.0, -2.0, 7.25, 0.5, 4.0];
    let mean = mean_center(&mut x);
    assert_abs_diff_eq!(mean, 14.25 / 6.0, epsilon = 1e-12);
    let first = x.clone();

    mean_center(&mut x);
    assert_abs_diff_eq!(x.iter().sum::<f64>() / x.len() as f64, 0.0, epsilon = 1e-12);
    for (a, b) in x.iter().zip(&first) {
      assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
    }
  }

  #[test]
  fn design_matches_hand_built_regression() {
    // Centered version of [1, 3, 2, 5, 4, 6, 5, 8, 7, 9].
    let c = [-4.0, -2.0, -3.0, 0.0, -1.0, 1.0, 0.0, 3.0, 2.0, 4.0];
    let d = build_adf_design(&c, 1).unwrap();

    assert_eq!(d.response, array![-1.0, 3.0, -1.0, 2.0, -1.0, 3.0, -1.0, 2.0]);
    assert_eq!(
      d.design.column(0).to_owned(),
      array![-2.0, -3.0, 0.0, -1.0, 1.0, 0.0, 3.0, 2.0]
    );
    assert_eq!(
      d.design.column(1).to_owned(),
      array![2.0, -1.0, 3.0, -1.0, 2.0, -1.0, 3.0, -1.0]
    );
  }

  #[test]
  fn design_without_augmentation_is_single_column() {
    let c = [0.5, -1.0, 1.5, -0.5, -0.5];
    let d = build_adf_design(&c, 0).unwrap();
    assert_eq!(d.design.dim(), (4, 1));
    assert_eq!(d.design.column(0).to_owned(), array![0.5, -1.0, 1.5, -0.5]);
    assert_eq!(d.response, array![-1.5, 2.5, -2.0, 0.0]);
  }

  #[test]
  fn design_rejects_short_series() {
    let err = build_adf_design(&[1.0, 2.0, 3.0], 2).unwrap_err();
    assert_eq!(
      err.downcast_ref::<ADFError>(),
      Some(&ADFError::InsufficientData {
        required: 4,
        actual: 3
      })
    );
  }

  #[test]
  fn design_rejects_huge_lag_without_overflow() {
    let c = [1.0, -1.0, 0.5, -0.5];
    let err = build_adf_design(&c, usize::MAX).unwrap_err();
    assert_eq!(
      err.downcast_ref::<ADFError>(),
      Some(&ADFError::InsufficientData {
        required: usize::MAX,
        actual: 4
      })
    );
  }

  #[test]
  fn validate_series_rejects_nan() {
    let err = validate_series(&[1.0, f64::NAN, 2.0], 2).unwrap_err();
    assert_eq!(err.downcast_ref::<ADFError>(), Some(&ADFError::NonFiniteInput));
  }
}
