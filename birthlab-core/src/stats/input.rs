//! Parsing of interactive inputs with fallback defaults.

use tracing::warn;

use super::compare::DEFAULT_ALPHA;

/// A significance level read from user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaInput {
    pub value: f64,
    /// True when the input did not parse and [`DEFAULT_ALPHA`] was used.
    pub defaulted: bool,
}

/// Parse a significance level, falling back to 0.05 when the text is not a number.
///
/// Range is not checked here; the comparator rejects values outside (0, 1).
pub fn parse_alpha_or_default(input: &str) -> AlphaInput {
    match input.trim().parse::<f64>() {
        Ok(value) => AlphaInput {
            value,
            defaulted: false,
        },
        Err(_) => {
            warn!(input, default = DEFAULT_ALPHA, "invalid alpha, using default");
            AlphaInput {
                value: DEFAULT_ALPHA,
                defaulted: true,
            }
        }
    }
}
