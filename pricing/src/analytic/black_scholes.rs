use crate::common::models::{NormalizedParameters, PricingInputs, DAYS_PER_YEAR, PERCENT};
use crate::common::normal::{cdf, density};
use crate::common::precision::{round_to, GREEK_DECIMALS, PREMIUM_DECIMALS};
use crate::error::PricingError;
use std::f64::consts::PI;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub trait OptionPricer {
    type Params;
    fn quote(params: &Self::Params) -> Result<Quote, PricingError>;
}

/// Premium and Greeks of one side of the contract, each rounded on its own:
/// the premium to 2 decimals, the Greeks to 3.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionMetrics {
    pub premium: f64,
    pub delta: f64,
    /// per calendar day
    pub theta: f64,
    /// per 1% move in volatility
    pub vega: f64,
    pub gamma: f64,
    /// per 1% move in the risk-free rate
    pub rho: f64,
}

/// Call and put metrics of one computation, together with the d1/d2 pair both
/// were derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quote {
    pub call: OptionMetrics,
    pub put: OptionMetrics,
    pub d1: f64,
    pub d2: f64,
}

impl Quote {
    /// The ten displayed figures in display order. Gamma and vega do not depend
    /// on the side and are shown once, from the call.
    pub fn labelled(&self) -> [(&'static str, f64); 10] {
        [
            ("call premium", self.call.premium),
            ("put premium", self.put.premium),
            ("call delta", self.call.delta),
            ("put delta", self.put.delta),
            ("call theta", self.call.theta),
            ("put theta", self.put.theta),
            ("call rho", self.call.rho),
            ("put rho", self.put.rho),
            ("gamma", self.call.gamma),
            ("vega", self.call.vega),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuxiliaryVariables {
    pub d1: f64,
    pub d2: f64,
}

impl AuxiliaryVariables {
    pub fn new(inputs: &PricingInputs, np: &NormalizedParameters) -> Self {
        let sigma_exp = np.vol * np.time.sqrt();
        let d1 = ((inputs.spot / inputs.strike).ln()
            + (np.rate - np.dividend + np.vol.powi(2) / 2.0) * np.time)
            / sigma_exp;
        let d2 = d1 - sigma_exp;
        Self { d1, d2 }
    }
}

/// Everything a single computation reads: the raw inputs, their normalized
/// form and the one d1/d2 pair. Every formula below is evaluated against the
/// same context.
#[derive(Clone, Copy, Debug)]
pub struct PricingContext {
    pub inputs: PricingInputs,
    pub params: NormalizedParameters,
    pub aux: AuxiliaryVariables,
}

impl PricingContext {
    pub fn new(inputs: PricingInputs) -> Self {
        let params = NormalizedParameters::from(&inputs);
        let aux = AuxiliaryVariables::new(&inputs, &params);
        Self {
            inputs,
            params,
            aux,
        }
    }

    /// e^(-D·T)
    fn dividend_discount(&self) -> f64 {
        (-self.params.dividend * self.params.time).exp()
    }

    /// e^(-R·T)
    fn rate_discount(&self) -> f64 {
        (-self.params.rate * self.params.time).exp()
    }

    pub fn call_premium(&self) -> f64 {
        let r1 = self.inputs.spot * self.dividend_discount() * cdf(self.aux.d1);
        let r2 = self.inputs.strike * self.rate_discount() * cdf(self.aux.d2);
        round_to(r1 - r2, PREMIUM_DECIMALS)
    }

    pub fn put_premium(&self) -> f64 {
        let value = self.inputs.strike * self.rate_discount() * cdf(-self.aux.d2)
            - self.inputs.spot * self.dividend_discount() * cdf(-self.aux.d1);
        round_to(value, PREMIUM_DECIMALS)
    }

    pub fn call_delta(&self) -> f64 {
        round_to(self.dividend_discount() * cdf(self.aux.d1), GREEK_DECIMALS)
    }

    pub fn put_delta(&self) -> f64 {
        round_to(
            self.dividend_discount() * (cdf(self.aux.d1) - 1.0),
            GREEK_DECIMALS,
        )
    }

    pub fn gamma(&self) -> f64 {
        let np = &self.params;
        let temp1 = density(self.aux.d1) * (-np.time * np.dividend).exp();
        let temp2 = self.inputs.spot * np.vol * np.time.sqrt();
        round_to(temp1 / temp2, GREEK_DECIMALS)
    }

    pub fn vega(&self) -> f64 {
        let np = &self.params;
        let temp = density(self.aux.d1)
            * (-np.time * np.dividend).exp()
            * self.inputs.spot
            * np.time.sqrt();
        round_to(temp / PERCENT, GREEK_DECIMALS)
    }

    pub fn call_rho(&self) -> f64 {
        let np = &self.params;
        let temp = self.inputs.strike
            * np.time
            * self.rate_discount()
            * cdf(self.aux.d2)
            * self.dividend_discount();
        round_to(temp / PERCENT, GREEK_DECIMALS)
    }

    pub fn put_rho(&self) -> f64 {
        let np = &self.params;
        let temp = -self.inputs.strike
            * np.time
            * self.rate_discount()
            * cdf(-self.aux.d2)
            * self.dividend_discount();
        round_to(temp / PERCENT, GREEK_DECIMALS)
    }

    /// The decay term shared by both thetas, before the carry terms.
    /// Evaluated from e^(-d1²/2) directly rather than from the density.
    fn theta_decay(&self) -> f64 {
        let np = &self.params;
        let ra = -(self.inputs.spot / (2.0 * PI).sqrt())
            * (self.aux.d1.powi(2) / -2.0).exp()
            * np.vol
            * (-np.time * np.dividend).exp();
        let rb = 2.0 * np.time.sqrt();
        ra / rb
    }

    /// R·K·e^(-R·T)·Φ(-d2)
    fn theta_carry(&self) -> f64 {
        self.params.rate * self.inputs.strike * self.rate_discount() * cdf(-self.aux.d2)
    }

    /// The dividend term uses the rounded `call_delta`.
    pub fn call_theta(&self, call_delta: f64) -> f64 {
        let r2 = self.params.dividend * self.inputs.spot * call_delta;
        round_to(
            (self.theta_decay() + r2 - self.theta_carry()) / DAYS_PER_YEAR,
            GREEK_DECIMALS,
        )
    }

    /// The dividend term uses Φ(-d1)·e^(-T·D), not the rounded put delta.
    pub fn put_theta(&self) -> f64 {
        let np = &self.params;
        let r2 = np.dividend
            * self.inputs.spot
            * cdf(-self.aux.d1)
            * (-np.time * np.dividend).exp();
        round_to(
            (self.theta_decay() - r2 + self.theta_carry()) / DAYS_PER_YEAR,
            GREEK_DECIMALS,
        )
    }

    pub fn call_metrics(&self) -> OptionMetrics {
        let delta = self.call_delta();
        OptionMetrics {
            premium: self.call_premium(),
            delta,
            theta: self.call_theta(delta),
            vega: self.vega(),
            gamma: self.gamma(),
            rho: self.call_rho(),
        }
    }

    pub fn put_metrics(&self) -> OptionMetrics {
        OptionMetrics {
            premium: self.put_premium(),
            delta: self.put_delta(),
            theta: self.put_theta(),
            vega: self.vega(),
            gamma: self.gamma(),
            rho: self.put_rho(),
        }
    }
}

fn finite(output: &'static str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::NonFiniteResult { output })
    }
}

fn ensure_finite(quote: &Quote) -> Result<(), PricingError> {
    finite("d1", quote.d1)?;
    finite("d2", quote.d2)?;
    for (label, value) in quote.labelled() {
        finite(label, value)?;
    }
    // gamma and vega are shared, but check the put copies as well
    finite("gamma", quote.put.gamma)?;
    finite("vega", quote.put.vega)?;
    Ok(())
}

/// European put and call premiums and Greeks for a stock paying a
/// continuous dividend yield.
/// https://en.wikipedia.org/wiki/Black%E2%80%93Scholes_model#Extensions_of_the_model
pub struct BlackScholesMerton;

impl OptionPricer for BlackScholesMerton {
    type Params = PricingInputs;

    fn quote(inputs: &PricingInputs) -> Result<Quote, PricingError> {
        if let Err(err) = inputs.validate() {
            warn!(%err, "rejected pricing inputs");
            return Err(err);
        }

        let ctx = PricingContext::new(*inputs);
        debug!(
            rate = ctx.params.rate,
            vol = ctx.params.vol,
            time = ctx.params.time,
            dividend = ctx.params.dividend,
            d1 = ctx.aux.d1,
            d2 = ctx.aux.d2,
            "computed auxiliary variables"
        );

        let quote = Quote {
            call: ctx.call_metrics(),
            put: ctx.put_metrics(),
            d1: ctx.aux.d1,
            d2: ctx.aux.d2,
        };
        if let Err(err) = ensure_finite(&quote) {
            warn!(%err, ?inputs, "pricing produced a non-finite output");
            return Err(err);
        }
        Ok(quote)
    }
}

/// Prices both sides from the six raw inputs: currency amounts, days and
/// percentages.
pub fn price(
    spot: f64,
    strike: f64,
    expiry_days: f64,
    volatility_pct: f64,
    risk_free_rate_pct: f64,
    dividend_pct: f64,
) -> Result<Quote, PricingError> {
    let inputs = PricingInputs::new(
        spot,
        strike,
        expiry_days,
        volatility_pct,
        risk_free_rate_pct,
        dividend_pct,
    );
    BlackScholesMerton::quote(&inputs)
}
