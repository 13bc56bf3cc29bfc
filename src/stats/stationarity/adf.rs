use anyhow::bail;
use anyhow::Result;

use super::common::adf_critical_values;
use super::common::build_adf_design;
use super::common::mean_center;
use super::common::validate_series;
use super::error::ADFError;
use super::ridge::RidgeSolver;
use super::ridge::SvdRidge;

/// Default decision boundary for the ADF statistic.
pub const DEFAULT_P_VALUE: f64 = -3.45;

/// Configuration for the Augmented Dickey-Fuller test.
#[derive(Debug, Clone, Copy, Default)]
pub struct ADFConfig {
  /// Threshold the statistic must fall below. Defaults to [`DEFAULT_P_VALUE`].
  pub p_value_threshold: Option<f64>,
  /// Number of lagged-difference regressors. Defaults to `floor(cbrt(n))`.
  pub lag: Option<usize>,
}

impl ADFConfig {
  /// Uses the critical value at significance level `alpha` as the threshold.
  ///
  /// Only the tabulated levels 0.01, 0.05 and 0.10 are accepted.
  pub fn at_significance(alpha: f64) -> Result<Self> {
    if ![0.01, 0.05, 0.10].iter().any(|a| (alpha - a).abs() < 1e-12) {
      bail!(ADFError::InvalidSignificance(alpha));
    }
    Ok(Self {
      p_value_threshold: Some(adf_critical_values().value_at(alpha)),
      lag: None,
    })
  }

  pub fn with_lag(mut self, lag: usize) -> Self {
    self.lag = Some(lag);
    self
  }
}

/// Result of one ADF run.
#[derive(Debug, Clone, Copy)]
pub struct ADFResult {
  /// t-statistic of the lagged level coefficient.
  pub statistic: f64,
  /// Lagged level coefficient.
  pub gamma: f64,
  /// Standard error of `gamma`.
  pub std_err_gamma: f64,
  /// Number of lagged differences in the regression.
  pub used_lag: usize,
  /// Number of regression observations.
  pub nobs: usize,
  /// Threshold the statistic was compared against.
  pub threshold: f64,
  /// Whether `statistic < threshold`.
  pub is_stationary: bool,
}

/// Augmented Dickey-Fuller test over an owned copy of a series.
#[derive(Debug, Clone)]
pub struct ADFTest {
  series: Vec<f64>,
  p_value_threshold: f64,
  lag: usize,
  statistic: Option<f64>,
}

fn default_lag(n: usize) -> usize {
  (n as f64).cbrt().floor() as usize
}

impl ADFTest {
  #[must_use]
  pub fn new(series: &[f64], cfg: ADFConfig) -> Self {
    Self {
      series: series.to_vec(),
      p_value_threshold: cfg.p_value_threshold.unwrap_or(DEFAULT_P_VALUE),
      lag: cfg.lag.unwrap_or_else(|| default_lag(series.len())),
      statistic: None,
    }
  }

  /// Builds a test from sentinel arguments: a threshold of `0.0` selects
  /// [`DEFAULT_P_VALUE`] and a negative lag selects the automatic lag.
  #[must_use]
  pub fn with_sentinels(series: &[f64], p_value_threshold: f64, lag: i64) -> Self {
    let cfg = ADFConfig {
      p_value_threshold: (p_value_threshold != 0.0).then_some(p_value_threshold),
      lag: usize::try_from(lag).ok(),
    };
    Self::new(series, cfg)
  }

  pub fn series(&self) -> &[f64] {
    &self.series
  }

  pub fn p_value_threshold(&self) -> f64 {
    self.p_value_threshold
  }

  pub fn lag(&self) -> usize {
    self.lag
  }

  /// Statistic of the last successful run.
  pub fn statistic(&self) -> Option<f64> {
    self.statistic
  }

  /// Runs the test with the default ridge solver.
  pub fn run(&mut self) -> Result<ADFResult> {
    self.run_with(&SvdRidge::default())
  }

  /// Runs the test, delegating the regression to `solver`.
  ///
  /// The internal series copy is demeaned in place; repeated runs give the
  /// same statistic.
  pub fn run_with<S: RidgeSolver>(&mut self, solver: &S) -> Result<ADFResult> {
    self.statistic = None;
    // Finiteness only, before centering mutates the copy. Length is checked
    // when the design is built.
    validate_series(&self.series, 0)?;
    mean_center(&mut self.series);

    let design = build_adf_design(&self.series, self.lag)?;
    tracing::debug!(
      n = self.series.len(),
      lag = self.lag,
      rows = design.design.nrows(),
      cols = design.design.ncols(),
      "fitting ADF regression"
    );

    let fit = solver.fit(&design.design, &design.response)?;
    let (Some(&gamma), Some(&se)) = (fit.coefficients.first(), fit.std_errors.first()) else {
      tracing::warn!("ridge fit returned no lagged level estimate");
      bail!(ADFError::SingularDesign)
    };
    if !gamma.is_finite() || !se.is_finite() || se <= 0.0 {
      tracing::warn!(gamma, se, "degenerate lagged level estimate");
      bail!(ADFError::SingularDesign);
    }

    let statistic = gamma / se;
    self.statistic = Some(statistic);
    tracing::debug!(statistic, threshold = self.p_value_threshold, "ADF statistic");

    Ok(ADFResult {
      statistic,
      gamma,
      std_err_gamma: se,
      used_lag: self.lag,
      nobs: fit.nobs,
      threshold: self.p_value_threshold,
      is_stationary: statistic < self.p_value_threshold,
    })
  }

  /// `true` iff a statistic exists and lies strictly below the threshold.
  pub fn is_stationary(&self) -> bool {
    self
      .statistic
      .is_some_and(|s| s < self.p_value_threshold)
  }
}

/// Constructs and runs an [`ADFTest`] in one call.
pub fn adf_test(y: &[f64], cfg: ADFConfig) -> Result<ADFResult> {
  ADFTest::new(y, cfg).run()
}
