//! # Ridge
//!
//! $$
//! \hat\beta=\arg\min_\beta \lVert y-X\beta\rVert^2+\lambda\lVert\beta\rVert^2
//! =V\,\mathrm{diag}\!\left(\frac{s_i}{s_i^2+\lambda}\right)U^\top y
//! $$
//!
use anyhow::bail;
use anyhow::Result;
use impl_new_derive::ImplNew;
use nalgebra::DMatrix;
use nalgebra::DVector;
use ndarray::Array1;
use ndarray::Array2;

use super::error::ADFError;

/// L2 penalty used by the ADF regression.
pub const L_PENALTY: f64 = 0.0001;

/// Output of a ridge fit, index-aligned with the design columns.
#[derive(Debug, Clone)]
pub struct RidgeFit {
  pub coefficients: Vec<f64>,
  pub std_errors: Vec<f64>,
  pub residuals: Vec<f64>,
  pub sigma2: f64,
  pub nobs: usize,
  pub k: usize,
}

/// Regularized least-squares backend for the ADF regression.
pub trait RidgeSolver {
  fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<RidgeFit>;
}

/// Ridge regression through a thin SVD of the design.
#[derive(ImplNew, Debug, Clone, Copy)]
pub struct SvdRidge {
  /// L2 penalty.
  pub penalty: f64,
}

impl Default for SvdRidge {
  fn default() -> Self {
    Self { penalty: L_PENALTY }
  }
}

impl RidgeSolver for SvdRidge {
  fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<RidgeFit> {
    let (n, k) = x.dim();
    if n != y.len() {
      bail!(ADFError::DimensionMismatch {
        rows: n,
        len: y.len(),
      });
    }
    if n == 0 || k == 0 {
      bail!(ADFError::SingularDesign);
    }

    let x_mat = DMatrix::from_fn(n, k, |i, j| x[[i, j]]);
    let y_vec = DVector::from_iterator(n, y.iter().copied());

    let svd = x_mat.clone().svd(true, true);
    let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
      bail!(ADFError::SingularDesign)
    };
    let penalty = self.penalty;
    let shrink = svd.singular_values.map(|s| s / (s * s + penalty));

    // k x n operator mapping the response onto the coefficients.
    let z = v_t.transpose() * DMatrix::from_diagonal(&shrink) * u.transpose();
    let beta = &z * &y_vec;
    let residuals_vec = &y_vec - &x_mat * &beta;

    let sse = residuals_vec.iter().map(|r| r * r).sum::<f64>();
    let dof = if n > k { n - k } else { n };
    let sigma2 = (sse / dof as f64).max(0.0);

    let cov = (&z * z.transpose()) * sigma2;
    let std_errors: Vec<f64> = (0..k).map(|i| cov[(i, i)].max(0.0).sqrt()).collect();
    let coefficients: Vec<f64> = beta.iter().copied().collect();

    if !coefficients.iter().chain(&std_errors).all(|v| v.is_finite()) {
      tracing::warn!(n, k, penalty, "ridge fit produced non-finite values");
      bail!(ADFError::SingularDesign);
    }

    Ok(RidgeFit {
      coefficients,
      std_errors,
      residuals: residuals_vec.iter().copied().collect(),
      sigma2,
      nobs: n,
      k,
    })
  }
}
