//! Unit conversion utilities
//!
//! Handles SI-prefixed quantities as typed into property fields ("1.5u",
//! "200n", "3k") and the conversion between user units and the integer
//! database units used by layout geometry.

use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;

const PREFIXES: [(char, f64); 10] = [
    ('f', 1e-15),
    ('p', 1e-12),
    ('n', 1e-9),
    ('u', 1e-6),
    ('µ', 1e-6),
    ('m', 1e-3),
    ('k', 1e3),
    ('M', 1e6),
    ('G', 1e9),
    ('T', 1e12),
];

fn prefix_scale(c: char) -> Option<f64> {
    PREFIXES.iter().find(|(p, _)| *p == c).map(|(_, s)| *s)
}

/// Parse an SI-prefixed quantity into its base value.
///
/// The number may be followed by one prefix letter and then any unit letters,
/// so `"1.5u"`, `"1.5um"` and `"1.5e-6"` all parse to `1.5e-6`.
pub fn parse_quantity(input: &str) -> Result<f64, CollaboratorError> {
    let invalid = || CollaboratorError::InvalidQuantity {
        input: input.to_string(),
    };
    let chars: Vec<char> = input.trim().chars().collect();

    let mut end = 0;
    while end < chars.len() {
        let c = chars[end];
        let after_exponent = end > 0 && matches!(chars[end - 1], 'e' | 'E');
        let sign = (c == '+' || c == '-') && (end == 0 || after_exponent);
        if c.is_ascii_digit() || c == '.' || sign {
            end += 1;
            continue;
        }
        if matches!(c, 'e' | 'E') && end > 0 {
            let next = chars.get(end + 1).copied();
            let next_next = chars.get(end + 2).copied();
            let is_exponent = match next {
                Some(d) if d.is_ascii_digit() => true,
                Some('+') | Some('-') => next_next.is_some_and(|d| d.is_ascii_digit()),
                _ => false,
            };
            if is_exponent {
                end += 1;
                continue;
            }
        }
        break;
    }

    let number: String = chars[..end].iter().collect();
    let value: f64 = number.parse().map_err(|_| invalid())?;

    let rest = &chars[end..];
    if rest.iter().any(|c| !c.is_alphabetic()) {
        return Err(invalid());
    }
    let scale = rest.first().and_then(|c| prefix_scale(*c)).unwrap_or(1.0);
    Ok(value * scale)
}

/// Format a value with the largest SI prefix that keeps the mantissa >= 1.
pub fn format_quantity(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let magnitude = value.abs();
    if (1.0..1e3).contains(&magnitude) {
        return trim_float(value);
    }
    let mut ordered: Vec<(char, f64)> = PREFIXES
        .iter()
        .copied()
        .filter(|(p, _)| *p != 'µ')
        .collect();
    ordered.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (prefix, scale) in ordered {
        if magnitude >= scale * (1.0 - 1e-9) {
            return format!("{}{}", trim_float(value / scale), prefix);
        }
    }
    trim_float(value)
}

fn trim_float(value: f64) -> String {
    let text = format!("{:.6}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

/// Database unit scale of a layout process.
///
/// `dbu` is the number of database units per user unit, e.g. 1000 for a
/// process drawn in microns with nanometre resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatabaseUnits {
    dbu: f64,
}

impl Default for DatabaseUnits {
    fn default() -> Self {
        Self { dbu: 1000.0 }
    }
}

impl DatabaseUnits {
    /// Create a scale; non-positive values fall back to the default.
    pub fn new(dbu: f64) -> Self {
        if dbu > 0.0 && dbu.is_finite() {
            Self { dbu }
        } else {
            Self::default()
        }
    }

    pub fn dbu(&self) -> f64 {
        self.dbu
    }

    /// Convert a user-unit length to the nearest database unit.
    pub fn to_dbu(&self, user: f64) -> i64 {
        (user * self.dbu).round() as i64
    }

    /// Convert database units back to user units.
    pub fn from_dbu(&self, dbu: i64) -> f64 {
        dbu as f64 / self.dbu
    }

    /// Parse a user-entered quantity (e.g. "0.5") straight to scene units.
    pub fn parse_to_scene(&self, input: &str) -> Result<f64, CollaboratorError> {
        let value = parse_quantity(input)?;
        Ok(self.to_dbu(value) as f64)
    }
}
