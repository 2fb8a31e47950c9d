//! Standard normal distribution
//!
//! N(x) is evaluated through the complementary error function so that the
//! tails stay accurate (relative, not just absolute) out to |x| ~ 10 and beyond.

use std::f64::consts::{PI, SQRT_2};

use ndarray::{Array1, ArrayView1};
use statrs::function::erf::erfc;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Element-wise standard normal CDF
pub fn norm_cdf_array(x: ArrayView1<f64>) -> Array1<f64> {
    x.mapv(norm_cdf)
}

/// Element-wise standard normal PDF
pub fn norm_pdf_array(x: ArrayView1<f64>) -> Array1<f64> {
    x.mapv(norm_pdf)
}
