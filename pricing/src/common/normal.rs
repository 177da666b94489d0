use probability::distribution::{Distribution, Gaussian};
use std::f64::consts::PI;

/// Φ(x), the standard normal cumulative distribution function.
pub fn cdf(x: f64) -> f64 {
    let normal = Gaussian::new(0.0, 1.0);
    normal.distribution(x)
}

/// φ(x) = (1/sqrt(2π))·e^(-x²/2), the standard normal density.
pub fn density(x: f64) -> f64 {
    (1.0 / (2.0 * PI).sqrt()) * (x.powi(2) / -2.0).exp()
}
