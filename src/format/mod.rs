//! Engineering-notation formatting.
//!
//! Values render as `{sign}{mantissa}{prefix}{unit}` with the prefix chosen
//! so the mantissa lies in `[1, 1000)`, e.g. `0.0032` A becomes `3.2mA`.
//! Prefixes stop at n and G; values outside that range keep the outermost
//! prefix with a mantissa outside `[1, 1000)`. The mantissa has at most two
//! decimals with trailing zeros stripped; a mantissa that rounds to 1000
//! moves up one prefix. Zero renders as `0 {unit}`.

use std::fmt;

/// SI prefixes by power-of-ten exponent.
const SI_PREFIXES: [(i32, &str); 7] = [
    (9, "G"),
    (6, "M"),
    (3, "k"),
    (0, ""),
    (-3, "m"),
    (-6, "μ"),
    (-9, "n"),
];

/// Largest and smallest exponents a prefix exists for.
const MAX_EXPONENT: i32 = 9;
const MIN_EXPONENT: i32 = -9;

fn prefix_for(exponent: i32) -> &'static str {
    SI_PREFIXES
        .iter()
        .find(|(exp, _)| *exp == exponent)
        .map(|(_, p)| *p)
        .unwrap_or("")
}

/// Scale a non-negative magnitude into `[1, 1000)` in steps of 1000,
/// returning the scaled value and its exponent.
fn scale(magnitude: f64) -> (f64, i32) {
    let mut scaled = magnitude;
    let mut exponent = 0;

    if scaled >= 1000.0 {
        while scaled >= 1000.0 && exponent < MAX_EXPONENT {
            scaled /= 1000.0;
            exponent += 3;
        }
    } else if scaled < 1.0 {
        while scaled < 1.0 && exponent > MIN_EXPONENT {
            scaled *= 1000.0;
            exponent -= 3;
        }
    }

    (scaled, exponent)
}

/// Two decimals, then strip trailing zeros and a dangling point.
fn fmt_mantissa(x: f64) -> String {
    let formatted = format!("{:.2}", x);
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        formatted
    }
}

/// Format `value` with `unit` in engineering notation.
pub fn to_engineering(value: f64, unit: &str) -> String {
    if value == 0.0 {
        return format!("0 {}", unit);
    }
    if value.is_nan() {
        return format!("NaN {}", unit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if value.is_infinite() {
        return format!("{}∞ {}", sign, unit);
    }

    let (mut scaled, mut exponent) = scale(value.abs());
    let mut mantissa = fmt_mantissa(scaled);
    // 999.996 rounds up to 1000: carry into the next prefix.
    if mantissa == "1000" && exponent < MAX_EXPONENT {
        scaled /= 1000.0;
        exponent += 3;
        mantissa = fmt_mantissa(scaled);
    }
    format!("{}{}{}{}", sign, mantissa, prefix_for(exponent), unit)
}

/// A value paired with its unit, displayed in engineering notation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineeringValue<'a> {
    pub value: f64,
    pub unit: &'a str,
}

impl<'a> EngineeringValue<'a> {
    pub fn new(value: f64, unit: &'a str) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for EngineeringValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_engineering(self.value, self.unit))
    }
}

/// Parse an engineering-notation string back to a number.
///
/// Accepts the output of [`to_engineering`] (with `unit` matching) as well
/// as plain numbers with an optional SI prefix, e.g. `4.7k`, `-12.5mV`, `3u`.
pub fn parse_engineering(text: &str, unit: &str) -> Option<f64> {
    let text = text.trim();
    let text = if unit.is_empty() {
        text
    } else {
        text.strip_suffix(unit).unwrap_or(text)
    };
    let text = text.trim_end();
    if text.is_empty() {
        return None;
    }
    if let Some(sign) = text.strip_suffix('∞') {
        return match sign {
            "" | "+" => Some(f64::INFINITY),
            "-" => Some(f64::NEG_INFINITY),
            _ => None,
        };
    }

    let (num_str, multiplier) = match text.chars().last() {
        Some(last) => {
            let mult = match last {
                'n' => 1e-9,
                'u' | 'μ' | 'µ' => 1e-6,
                'm' => 1e-3,
                'k' | 'K' => 1e3,
                'M' => 1e6,
                'G' => 1e9,
                _ => 1.0,
            };
            if mult != 1.0 {
                (&text[..text.len() - last.len_utf8()], mult)
            } else {
                (text, 1.0)
            }
        }
        None => (text, 1.0),
    };

    num_str.trim().parse::<f64>().ok().map(|v| v * multiplier)
}
