//! Presentation of a quote as a labelled table or as JSON.

use crate::config::OutputFormat;
use crate::Result;
use pricing::{PricingInputs, Quote};
use serde::Serialize;
use std::fmt::Write;

/// Shortest decimal string that reads back to the same value, so rounded
/// figures print as 10.45 or 0.637 with no trailing zeros.
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

pub fn render_table(quote: &Quote) -> String {
    let mut table = String::new();
    for (label, value) in quote.labelled() {
        // writing into a String cannot fail
        let _ = writeln!(table, "{:<14}{:>12}", label, format_value(value));
    }
    table
}

#[derive(Serialize)]
struct QuoteReport<'a> {
    inputs: &'a PricingInputs,
    #[serde(flatten)]
    quote: &'a Quote,
}

pub fn render_json(inputs: &PricingInputs, quote: &Quote) -> Result<String> {
    let report = QuoteReport { inputs, quote };
    Ok(serde_json::to_string(&report)?)
}

pub fn render(format: OutputFormat, inputs: &PricingInputs, quote: &Quote) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(quote)),
        OutputFormat::Json => render_json(inputs, quote),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use pricing::{BlackScholesMerton, OptionPricer};

    fn atm_quote() -> (PricingInputs, Quote) {
        let inputs = PricingInputs::new(100.0, 100.0, 365.0, 20.0, 5.0, 0.0);
        let quote = BlackScholesMerton::quote(&inputs).unwrap();
        (inputs, quote)
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_value(10.45), "10.45");
        assert_eq!(format_value(0.54), "0.54");
        assert_eq!(format_value(-0.016), "-0.016");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(5903.73), "5903.73");
    }

    #[test]
    fn table_lists_ten_figures_in_order() {
        let (_, quote) = atm_quote();
        let table = render_table(&quote);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("call premium"));
        assert!(lines[0].ends_with("10.45"));
        assert!(lines[1].starts_with("put premium"));
        assert!(lines[1].ends_with("5.57"));
        assert!(lines[3].ends_with("-0.363"));
        assert!(lines[8].starts_with("gamma"));
        assert!(lines[8].ends_with("0.019"));
        assert!(lines[9].starts_with("vega"));
        assert!(lines[9].ends_with("0.375"));
    }

    #[test]
    fn json_carries_inputs_and_both_sides() {
        let (inputs, quote) = atm_quote();
        let json = render(OutputFormat::Json, &inputs, &quote).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["inputs"]["spot"], 100.0);
        assert_eq!(value["inputs"]["volatility_pct"], 20.0);
        assert_eq!(value["call"]["premium"], 10.45);
        assert_eq!(value["put"]["delta"], -0.363);
        assert_eq!(value["put"]["rho"], -0.419);
        assert_approx_eq!(value["d1"].as_f64().unwrap(), 0.35, 1e-12);
    }
}
