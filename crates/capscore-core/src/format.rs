//! Locale-style number formatting for cards, tables and reports.
//!
//! Mirrors what a browser's `Intl.NumberFormat` produces with
//! `maximumFractionDigits`: values are rounded half away from zero, trailing
//! fractional zeros are dropped, and the integer part is grouped in threes.
//! The defaults (`.` for thousands, `,` for decimals) match es-CO.

use crate::config::FormatConfig;

/// Separator pair used when rendering numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separators {
    pub thousands: String,
    pub decimal: String,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            thousands: ".".to_string(),
            decimal: ",".to_string(),
        }
    }
}

impl From<&FormatConfig> for Separators {
    fn from(cfg: &FormatConfig) -> Self {
        Self {
            thousands: cfg.thousands_separator.clone(),
            decimal: cfg.decimal_separator.clone(),
        }
    }
}

// Beyond this the scaled value no longer fits an exact integer in f64.
const MAX_DECIMALS: u32 = 6;

/// Format `value` with at most `max_decimals` fractional digits.
pub fn format_number(value: f64, max_decimals: u32, seps: &Separators) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let decimals = max_decimals.min(MAX_DECIMALS);
    let scale = 10u64.pow(decimals);
    // f64::round rounds half away from zero.
    let scaled = (value.abs() * scale as f64).round() as u64;
    let int_part = scaled / scale;
    let mut frac_part = scaled % scale;

    let mut out = String::new();
    if value < 0.0 && scaled != 0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, &seps.thousands));

    if frac_part != 0 {
        let mut width = decimals as usize;
        while frac_part % 10 == 0 {
            frac_part /= 10;
            width -= 1;
        }
        out.push_str(&seps.decimal);
        out.push_str(&format!("{frac_part:0width$}"));
    }

    out
}

/// Whole-number rendering used on cards.
pub fn format_int(value: f64, seps: &Separators) -> String {
    format_number(value, 0, seps)
}

/// One-decimal rendering used in the detail table.
pub fn format_dec(value: f64, seps: &Separators) -> String {
    format_number(value, 1, seps)
}

fn group_thousands(n: u64, sep: &str) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * sep.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
