//! Ohm's law for a single resistor: any two of V, I and R give the third.

use crate::error::{DividerError, Result};

/// `V = I * R`
pub fn voltage(current: f64, resistance: f64) -> f64 {
    current * resistance
}

/// `I = V / R`
///
/// # Errors
/// `DividerError::InvalidParameter` when `resistance` is zero.
pub fn current(voltage: f64, resistance: f64) -> Result<f64> {
    if resistance == 0.0 {
        return Err(DividerError::invalid_parameter(
            "resistance",
            "resistance cannot be zero",
        ));
    }
    Ok(voltage / resistance)
}

/// `R = V / I`
///
/// # Errors
/// `DividerError::InvalidParameter` when `current` is zero.
pub fn resistance(voltage: f64, current: f64) -> Result<f64> {
    if current == 0.0 {
        return Err(DividerError::invalid_parameter(
            "current",
            "current cannot be zero",
        ));
    }
    Ok(voltage / current)
}

/// `P = V * I`
pub fn power(voltage: f64, current: f64) -> f64 {
    voltage * current
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn any_two_give_the_third() {
        assert_relative_eq!(voltage(0.002, 4700.0), 9.4);
        assert_relative_eq!(current(12.0, 2400.0).unwrap(), 0.005);
        assert_relative_eq!(resistance(5.0, 0.001).unwrap(), 5000.0);
        assert_relative_eq!(power(12.0, 2.0), 24.0);
    }

    #[test]
    fn zero_divisor_names_the_input() {
        assert!(matches!(
            current(5.0, 0.0),
            Err(DividerError::InvalidParameter { param: "resistance", .. })
        ));
        assert!(matches!(
            resistance(5.0, 0.0),
            Err(DividerError::InvalidParameter { param: "current", .. })
        ));
    }
}
