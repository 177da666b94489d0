//! Closed-form pricing of European options under Black-Scholes-Merton with a
//! continuous dividend yield.
//!
//! ```
//! let quote = pricing::price(100.0, 100.0, 365.0, 20.0, 5.0, 0.0).unwrap();
//! assert_eq!(quote.call.premium, 10.45);
//! assert_eq!(quote.put.premium, 5.57);
//! ```

pub mod analytic;
pub mod common;
pub mod error;

pub use analytic::black_scholes::{
    price, AuxiliaryVariables, BlackScholesMerton, OptionMetrics, OptionPricer, PricingContext,
    Quote,
};
pub use common::models::{NormalizedParameters, PricingInputs};
pub use error::{InputField, PricingError};
