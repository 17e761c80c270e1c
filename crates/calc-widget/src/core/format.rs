//! Locale-aware number rendering for the result display
//!
//! Values are first reduced to their shortest round-trip decimal digits and
//! rounded there, so float noise past the 17th significant digit never shows
//! up. Grouping and separators come from ICU4X for the configured locale.

use std::fmt;

use icu_decimal::input::Decimal;
use icu_decimal::DecimalFormatter;
use icu_locale_core::{locale, Locale};
use icu_provider::DataError;

/// Distance from the nearest integer below which a value renders as an integer
pub const INTEGER_TOLERANCE: f64 = 1e-9;

/// Default cap on rendered fractional digits
pub const DEFAULT_MAX_FRACTION_DIGITS: usize = 8;

/// Locale used when none is configured
pub const DEFAULT_LOCALE: &str = "en-US";

/// Renders values for the result view
pub struct NumberFormat {
    locale: Locale,
    formatter: Option<DecimalFormatter>,
    max_fraction_digits: usize,
}

impl fmt::Debug for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberFormat")
            .field("locale", &self.locale.to_string())
            .field("grouped", &self.formatter.is_some())
            .field("max_fraction_digits", &self.max_fraction_digits)
            .finish()
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(locale!("en-US"), DEFAULT_MAX_FRACTION_DIGITS)
    }
}

fn decimal_formatter(locale: &Locale) -> Result<DecimalFormatter, DataError> {
    DecimalFormatter::try_new(locale.clone().into(), Default::default())
}

impl NumberFormat {
    /// Creates a formatter for the given locale and precision
    ///
    /// Without locale data the digits are still rounded but render ungrouped.
    #[must_use]
    pub fn new(locale: Locale, max_fraction_digits: usize) -> Self {
        let formatter = match decimal_formatter(&locale) {
            Ok(formatter) => Some(formatter),
            Err(err) => {
                tracing::warn!(%locale, %err, "no decimal data for locale, rendering ungrouped");
                None
            }
        };
        Self {
            locale,
            formatter,
            max_fraction_digits,
        }
    }

    /// Returns the locale
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Returns the fractional digit cap
    #[must_use]
    pub fn max_fraction_digits(&self) -> usize {
        self.max_fraction_digits
    }

    /// Formats a value, collapsing near-integers and grouping the integer part
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "∞" } else { "-∞" }.to_string();
        }

        let rounded = value.round();
        let digits = if (value - rounded).abs() < INTEGER_TOLERANCE {
            round_digits(rounded, 0)
        } else {
            round_digits(value, self.max_fraction_digits)
        };

        let Some(formatter) = &self.formatter else {
            return digits;
        };
        match digits.parse::<Decimal>() {
            Ok(decimal) => formatter.format(&decimal).to_string(),
            Err(err) => {
                tracing::warn!(digits, %err, "unparseable decimal digits");
                digits
            }
        }
    }
}

/// Shortest round-trip digits of `value`, rounded half away from zero to
/// at most `places` fractional digits with trailing zeros dropped
///
/// Zero never carries a sign.
fn round_digits(value: f64, places: usize) -> String {
    let text = value.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut kept: Vec<char> = int_part
        .chars()
        .chain(frac_part.chars().take(places))
        .collect();
    let frac_len = frac_part.len().min(places);

    if frac_part.as_bytes().get(places).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == '9' {
                *digit = '0';
            } else {
                *digit = char::from(*digit as u8 + 1);
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, '1');
        }
    }

    let (int_digits, frac_digits) = kept.split_at(kept.len() - frac_len);
    let int_digits: String = int_digits.iter().collect();
    let frac_digits: String = frac_digits.iter().collect();
    let frac_digits = frac_digits.trim_end_matches('0');

    let is_zero = int_digits.chars().all(|c| c == '0') && frac_digits.is_empty();
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&int_digits);
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }
    out
}

/// Plain text form of a result, as written back into the input buffer
///
/// No grouping and no exponent, so the tokenizer can read it again.
#[must_use]
pub fn format_raw(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
