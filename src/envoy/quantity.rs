//! Parsing of `"<number> <unit>"` values such as `"3.500 kW"`.

use crate::error::ParseError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// digits/decimal points holding at least one digit, whitespace, then an ASCII word unit
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9.]*[0-9][0-9.]*)\s+((?-u:\w)+)").expect("quantity pattern is valid")
});

/// A number and its unit, both kept as the text the device reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    pub number: String,
    pub unit: String,
}

impl Quantity {
    /// The number text as a float.
    pub fn value(&self) -> Result<f64, ParseError> {
        self.number
            .parse::<f64>()
            .map_err(|e| ParseError::number_parse(&self.number, e))
    }

    pub fn as_tuple(&self) -> (&str, &str) {
        (&self.number, &self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.number, self.unit)
    }
}

/// Finds the first `<number> <unit>` occurrence in `raw`.
///
/// The number is a run of ASCII digits and decimal points containing at least
/// one digit. It is followed by at least one whitespace character and a unit
/// made of ASCII word characters (`[0-9A-Za-z_]`). Anything
/// before or after the match is ignored, so `"Today: 6.42 kWh"` yields
/// `("6.42", "kWh")`.
///
/// # Errors
///
/// [`ParseError::QuantityNotFound`] when no such occurrence exists.
pub fn parse_quantity(raw: &str) -> Result<Quantity, ParseError> {
    let captures = QUANTITY
        .captures(raw)
        .ok_or_else(|| ParseError::quantity_not_found(raw))?;

    Ok(Quantity {
        number: captures[1].to_string(),
        unit: captures[2].to_string(),
    })
}
