//! Re-prices on every line of input.
//!
//! Each line holds the six inputs in order (spot, strike, expiry in days,
//! volatility %, rate %, dividend %), separated by whitespace or commas.
//! Blank lines and lines starting with `#` are skipped. A line that fails to
//! parse or price is reported on the error writer and the stream carries on.

use crate::config::OutputFormat;
use crate::report::render;
use crate::{CliError, Result};
use pricing::{BlackScholesMerton, OptionPricer, PricingInputs};
use std::io::{BufRead, Write};
use tracing::{debug, info};

const FIELDS: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub priced: usize,
    pub rejected: usize,
}

/// `Ok(None)` for lines carrying no inputs.
pub fn parse_line(line_nr: usize, line: &str) -> Result<Option<PricingInputs>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let values = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|_| CliError::Parse {
                line: line_nr,
                message: format!("not a number: {:?}", token),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    match values[..] {
        [spot, strike, expiry, volatility, rate, dividend] => Ok(Some(PricingInputs::new(
            spot, strike, expiry, volatility, rate, dividend,
        ))),
        _ => Err(CliError::Parse {
            line: line_nr,
            message: format!("expected {} numbers, found {}", FIELDS, values.len()),
        }),
    }
}

fn quote_line(line_nr: usize, line: &str, format: OutputFormat) -> Result<Option<String>> {
    let Some(inputs) = parse_line(line_nr, line)? else {
        return Ok(None);
    };
    let quote = BlackScholesMerton::quote(&inputs)?;
    Ok(Some(render(format, &inputs, &quote)?))
}

/// Reads until end of input. Only I/O failures on the writers or the reader
/// end the stream early.
pub fn run<R, W, E>(reader: R, out: &mut W, err: &mut E, format: OutputFormat) -> Result<StreamSummary>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = StreamSummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_nr = idx + 1;

        match quote_line(line_nr, &line, format) {
            Ok(Some(rendered)) => {
                summary.priced += 1;
                if format == OutputFormat::Table && summary.priced > 1 {
                    writeln!(out)?;
                }
                write!(out, "{}", rendered)?;
                if format == OutputFormat::Json {
                    writeln!(out)?;
                }
                out.flush()?;
            }
            Ok(None) => debug!(line_nr, "skipped line"),
            Err(e @ CliError::Parse { .. }) => {
                summary.rejected += 1;
                writeln!(err, "{}", e)?;
            }
            Err(CliError::Pricing(e)) => {
                summary.rejected += 1;
                writeln!(err, "line {}: {}", line_nr, e)?;
            }
            Err(e) => return Err(e),
        }
    }

    info!(priced = summary.priced, rejected = summary.rejected, "stream finished");
    Ok(summary)
}
