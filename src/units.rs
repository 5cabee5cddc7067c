//! Reading and printing quantities: RKM resistor codes and engineering prefixes.

use crate::error::{DividerError, Result};

// Three decimals, or three significant digits below one ohm.
fn format_rval(r: f64, unit: char) -> String {
    let decimals = if r > 0.0 && r < 1.0 {
        (2 - r.log10().floor() as i32).max(3)
    } else {
        3
    };
    let scale = 10f64.powi(decimals);
    let rounded = (r * scale).round() / scale;
    let mut val = format!("{}", rounded);
    if val.contains('.') {
        val.replace('.', &unit.to_string())
    } else {
        val.push(unit);
        val
    }
}

/// Prints a resistance as an RKM code: `470R`, `4K7`, `10K`, `2M2`, `0R47`, `0R0047`.
pub fn format_resistance(r: f64) -> String {
    if r < 1000.0 {
        format_rval(r, 'R')
    } else if r < 1_000_000.0 {
        format_rval(r / 1000.0, 'K')
    } else if r < 1_000_000_000.0 {
        format_rval(r / 1_000_000.0, 'M')
    } else {
        format_rval(r / 1_000_000_000.0, 'G')
    }
}

/// Scales `value` by the first prefix whose threshold its magnitude is below, or by the
/// last entry otherwise, and prints it with three decimals.
fn engineering(value: f64, unit: &str, prefixes: &[(f64, f64, &str)]) -> String {
    let magnitude = value.abs();
    let (scale, prefix) = prefixes
        .iter()
        .find(|(below, _, _)| magnitude < *below)
        .or_else(|| prefixes.last())
        .map(|(_, scale, prefix)| (*scale, *prefix))
        .unwrap_or((1.0, ""));
    format!("{:.3} {}{}", value * scale, prefix, unit)
}

/// `5.000 V`, `330.000 mV`, `12.000 kV`.
pub fn format_voltage(volts: f64) -> String {
    if volts == 0.0 {
        return engineering(volts, "V", &[]);
    }
    engineering(
        volts,
        "V",
        &[(1e-3, 1e6, "µ"), (1.0, 1e3, "m"), (1e3, 1.0, ""), (f64::INFINITY, 1e-3, "k")],
    )
}

/// `1.250 A`, `4.166 mA`, `12.000 µA`, `3.000 nA`.
pub fn format_current(amps: f64) -> String {
    if amps == 0.0 {
        return engineering(amps, "A", &[]);
    }
    engineering(
        amps,
        "A",
        &[(1e-6, 1e9, "n"), (1e-3, 1e6, "µ"), (1.0, 1e3, "m"), (f64::INFINITY, 1.0, "")],
    )
}

/// `2.000 W`, `8.333 mW`, `40.000 µW`.
pub fn format_power(watts: f64) -> String {
    if watts == 0.0 {
        return engineering(watts, "W", &[]);
    }
    engineering(
        watts,
        "W",
        &[(1e-3, 1e6, "µ"), (1.0, 1e3, "m"), (f64::INFINITY, 1.0, "")],
    )
}

fn multiplier(c: char) -> Option<f64> {
    match c {
        'R' | 'r' => Some(1.0),
        'm' => Some(1e-3),
        'k' | 'K' => Some(1e3),
        'M' => Some(1e6),
        'G' | 'g' => Some(1e9),
        _ => None,
    }
}

fn strip_unit(s: &str) -> &str {
    if let Some(rest) = s.strip_suffix('Ω') {
        return rest;
    }
    for word in &["ohms", "ohm"] {
        let cut = s.len().saturating_sub(word.len());
        if let Some(tail) = s.get(cut..) {
            if cut > 0 && tail.eq_ignore_ascii_case(word) {
                return &s[..cut];
            }
        }
    }
    s
}

/// Reads a resistance from text.
///
/// Accepts plain numbers (`"4700"`), SI suffixes (`"4.7k"`, `"1M"`, `"2.2 kΩ"`, `"470 ohm"`)
/// and RKM codes where the multiplier replaces the decimal point (`"4k7"`, `"0R47"`). A comma
/// is read as a decimal point.
///
/// # Examples
/// ```
///     # use divider_calc::parse_resistance;
///     assert_eq!(parse_resistance("4k7").unwrap(), 4700.0);
///     assert_eq!(parse_resistance("1 MΩ").unwrap(), 1_000_000.0);
///     assert!(parse_resistance("-10").is_err());
/// ```
pub fn parse_resistance(input: &str) -> Result<f64> {
    let invalid = || DividerError::InvalidValue {
        input: input.to_string(),
    };

    let compact: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let body = strip_unit(&compact);
    if body.is_empty() {
        return Err(invalid());
    }

    let value = if let Ok(plain) = body.parse::<f64>() {
        plain
    } else {
        let (idx, c) = body
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .ok_or_else(invalid)?;
        let mult = multiplier(c).ok_or_else(invalid)?;
        let (head, tail) = (&body[..idx], &body[idx + c.len_utf8()..]);
        let number = if tail.is_empty() {
            head.to_string()
        } else if !head.contains('.') && tail.chars().all(|d| d.is_ascii_digit()) {
            format!("{}.{}", if head.is_empty() { "0" } else { head }, tail)
        } else {
            return Err(invalid());
        };
        number.parse::<f64>().map_err(|_| invalid())? * mult
    };

    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rkm_codes() {
        assert_eq!(format_resistance(470.0), "470R");
        assert_eq!(format_resistance(4700.0), "4K7");
        assert_eq!(format_resistance(10_000.0), "10K");
        assert_eq!(format_resistance(2_200_000.0), "2M2");
        assert_eq!(format_resistance(0.47), "0R47");
        assert_eq!(format_resistance(1e9), "1G");
        assert_eq!(format_resistance(0.0012), "0R0012");
        assert_eq!(format_resistance(0.0047), "0R0047");
        assert_eq!(format_resistance(0.00988), "0R00988");
    }

    #[test]
    fn milliohm_codes_read_back_unchanged() {
        let values = crate::series::Series::E12.values_in_range(0.001, 0.1).unwrap();
        assert_eq!(values.len(), 25);
        for r in values {
            let code = format_resistance(r);
            assert_eq!(parse_resistance(&code).unwrap(), r, "{} shown as {}", r, code);
        }
    }

    #[test]
    fn engineering_prefixes() {
        assert_eq!(format_voltage(5.0), "5.000 V");
        assert_eq!(format_voltage(0.33), "330.000 mV");
        assert_eq!(format_voltage(12_000.0), "12.000 kV");
        assert_eq!(format_voltage(0.0), "0.000 V");
        assert_eq!(format_current(0.5), "500.000 mA");
        assert_eq!(format_current(2e-9), "2.000 nA");
        assert_eq!(format_current(1.25), "1.250 A");
        assert_eq!(format_power(0.012), "12.000 mW");
        assert_eq!(format_power(4e-5), "40.000 µW");
    }

    #[test]
    fn parses_plain_and_suffixed_values() {
        assert_eq!(parse_resistance("4700").unwrap(), 4700.0);
        assert_eq!(parse_resistance(" 470R ").unwrap(), 470.0);
        assert_relative_eq!(parse_resistance("4.7k").unwrap(), 4700.0);
        assert_relative_eq!(parse_resistance("2,2 kΩ").unwrap(), 2200.0);
        assert_eq!(parse_resistance("1M").unwrap(), 1_000_000.0);
        assert_eq!(parse_resistance("100 ohms").unwrap(), 100.0);
        assert_eq!(parse_resistance("1e6").unwrap(), 1_000_000.0);
        assert_relative_eq!(parse_resistance("10mΩ").unwrap(), 0.01);
    }

    #[test]
    fn parses_rkm_codes() {
        assert_relative_eq!(parse_resistance("4k7").unwrap(), 4700.0);
        assert_relative_eq!(parse_resistance("0R47").unwrap(), 0.47);
        assert_relative_eq!(parse_resistance("R22").unwrap(), 0.22);
        assert_relative_eq!(parse_resistance("2M2").unwrap(), 2_200_000.0);
    }

    #[test]
    fn rejects_garbage() {
        for bad in &["", "ohm", "abc", "4x7", "4.7k3", "-1k", "inf", "1k2k"] {
            assert!(parse_resistance(bad).is_err(), "accepted {:?}", bad);
        }
    }
}
