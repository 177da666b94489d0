use std::fmt;
use thiserror::Error;

/// The caller-supplied fields of a pricing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputField {
    Spot,
    Strike,
    Expiry,
    Volatility,
    RiskFreeRate,
    Dividend,
}

impl InputField {
    pub fn label(&self) -> &'static str {
        match self {
            InputField::Spot => "spot",
            InputField::Strike => "strike",
            InputField::Expiry => "expiry",
            InputField::Volatility => "volatility",
            InputField::RiskFreeRate => "risk-free rate",
            InputField::Dividend => "dividend",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Positive-only fields got zero, a negative or a non-finite value;
    /// rate and dividend only need to be finite.
    #[error("invalid {field}: {value}")]
    InvalidDomainInput { field: InputField, value: f64 },
    #[error("{output} is not a finite number")]
    NonFiniteResult { output: &'static str },
}
