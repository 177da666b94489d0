use crate::error::{InputField, PricingError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calendar days per year used to turn the expiry into a year fraction.
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Volatility, rate and dividend are quoted in percent.
pub const PERCENT: f64 = 100.0;

/// The six market and contract inputs, in the units a trader types them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PricingInputs {
    /// the underlying's price
    pub spot: f64,
    /// the strike or exercise price
    pub strike: f64,
    /// time to expiration in calendar days
    pub expiry_days: f64,
    /// annualized volatility in percent, 20 meaning 20%
    pub volatility_pct: f64,
    /// annualized risk-free rate in percent
    pub risk_free_rate_pct: f64,
    /// continuous dividend yield in percent per year
    pub dividend_pct: f64,
}

impl PricingInputs {
    pub fn new(
        spot: f64,
        strike: f64,
        expiry_days: f64,
        volatility_pct: f64,
        risk_free_rate_pct: f64,
        dividend_pct: f64,
    ) -> Self {
        Self {
            spot,
            strike,
            expiry_days,
            volatility_pct,
            risk_free_rate_pct,
            dividend_pct,
        }
    }

    /// Spot, strike, expiry and volatility must be finite and strictly positive,
    /// otherwise d1 takes the log of a non-positive number or divides by zero.
    /// Rate and dividend may take any finite value.
    pub fn validate(&self) -> Result<(), PricingError> {
        let positive = [
            (InputField::Spot, self.spot),
            (InputField::Strike, self.strike),
            (InputField::Expiry, self.expiry_days),
            (InputField::Volatility, self.volatility_pct),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PricingError::InvalidDomainInput { field, value });
            }
        }

        let finite = [
            (InputField::RiskFreeRate, self.risk_free_rate_pct),
            (InputField::Dividend, self.dividend_pct),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(PricingError::InvalidDomainInput { field, value });
            }
        }
        Ok(())
    }
}

/// Inputs converted into model units: decimal rates and a year fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedParameters {
    /// R
    pub rate: f64,
    /// V
    pub vol: f64,
    /// T, in years
    pub time: f64,
    /// D
    pub dividend: f64,
}

impl From<&PricingInputs> for NormalizedParameters {
    fn from(inputs: &PricingInputs) -> Self {
        Self {
            rate: inputs.risk_free_rate_pct / PERCENT,
            vol: inputs.volatility_pct / PERCENT,
            time: inputs.expiry_days / DAYS_PER_YEAR,
            dividend: inputs.dividend_pct / PERCENT,
        }
    }
}
