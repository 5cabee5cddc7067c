//! A candidate two-arm divider and the quantities derived from it.

use std::cmp::Ordering;
use std::fmt;

use crate::arm::Arm;
use crate::units::{format_current, format_power};

/// Output of an unloaded divider: `v_in * r_lower / (r_upper + r_lower)`.
pub fn divider_output(v_in: f64, r_upper: f64, r_lower: f64) -> f64 {
    v_in * r_lower / (r_upper + r_lower)
}

/// Relative deviation of `actual` from `required`, in percent.
pub fn error_percent(actual: f64, required: f64) -> f64 {
    ((actual - required) / required).abs() * 100.0
}

/// One candidate divider. The upper arm connects to the input, the lower arm to ground and
/// the output is taken at their junction.
///
/// Every derived quantity is computed once by [`Network::new`]; a `Network` is never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    upper: Arm,
    lower: Arm,
    v_in: f64,
    v_out_required: f64,
    v_out_actual: f64,
    error_percent: f64,
    total_resistance: f64,
    current: f64,
    power_dissipation: f64,
}

impl Network {
    /// Evaluates `upper` over `lower` fed from `v_in`.
    pub fn new(upper: Arm, lower: Arm, v_in: f64, v_out_required: f64) -> Self {
        let r_upper = upper.resistance();
        let r_lower = lower.resistance();
        let v_out_actual = divider_output(v_in, r_upper, r_lower);
        let total_resistance = r_upper + r_lower;
        let current = v_in / total_resistance;
        Network {
            upper,
            lower,
            v_in,
            v_out_required,
            v_out_actual,
            error_percent: error_percent(v_out_actual, v_out_required),
            total_resistance,
            current,
            power_dissipation: v_in * current,
        }
    }

    /// The arm between the input and the output node.
    pub fn upper(&self) -> &Arm {
        &self.upper
    }

    /// The arm between the output node and ground.
    pub fn lower(&self) -> &Arm {
        &self.lower
    }

    /// Resistor values of the upper arm, in ohms.
    pub fn upper_values(&self) -> &[f64] {
        self.upper.values()
    }

    /// Resistor values of the lower arm, in ohms.
    pub fn lower_values(&self) -> &[f64] {
        self.lower.values()
    }

    /// `true` when the upper arm is two resistors in parallel.
    pub fn upper_parallel(&self) -> bool {
        self.upper.is_parallel()
    }

    /// `true` when the lower arm is two resistors in parallel.
    pub fn lower_parallel(&self) -> bool {
        self.lower.is_parallel()
    }

    /// Effective resistance of the upper arm, in ohms.
    pub fn upper_resistance(&self) -> f64 {
        self.upper.resistance()
    }

    /// Effective resistance of the lower arm, in ohms.
    pub fn lower_resistance(&self) -> f64 {
        self.lower.resistance()
    }

    /// Input voltage, in volts.
    pub fn v_in(&self) -> f64 {
        self.v_in
    }

    /// The output voltage asked for, in volts.
    pub fn v_out_required(&self) -> f64 {
        self.v_out_required
    }

    /// The output voltage this network gives, in volts.
    pub fn v_out_actual(&self) -> f64 {
        self.v_out_actual
    }

    /// `|v_out_actual - v_out_required| / v_out_required * 100`, never negative.
    pub fn error_percent(&self) -> f64 {
        self.error_percent
    }

    /// `Rup + Rlow`, in ohms.
    pub fn total_resistance(&self) -> f64 {
        self.total_resistance
    }

    /// Current through the divider, in amps.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Power dissipated by the whole divider, in watts.
    pub fn power_dissipation(&self) -> f64 {
        self.power_dissipation
    }

    /// Physical resistors in both arms, 2 to 4.
    pub fn resistor_count(&self) -> usize {
        self.upper.len() + self.lower.len()
    }

    /// Topology label per arm, upper first: `1` for a lone resistor, `+` for series and
    /// `||` for parallel. `"+/1"` is a split upper arm over a single lower resistor.
    pub fn schema_type(&self) -> String {
        fn label(arm: &Arm) -> &'static str {
            match (arm.len(), arm.is_parallel()) {
                (1, _) => "1",
                (_, false) => "+",
                (_, true) => "||",
            }
        }
        format!("{}/{}", label(&self.upper), label(&self.lower))
    }

    /// The one-line description kept when a result is saved.
    pub fn summary(&self) -> String {
        format!(
            "Vin={:.2} V, Vout required={:.4} V: {}",
            self.v_in, self.v_out_required, self
        )
    }

    /// Orders `self` against `other` by [`rank_order`].
    pub fn cmp_rank(&self, other: &Network) -> Ordering {
        rank_order(self, other)
    }
}

/// The ranking of candidate networks: smallest error first, then fewer resistors, then lower
/// power dissipation. Networks equal on all three keys compare `Equal`.
pub fn rank_order(a: &Network, b: &Network) -> Ordering {
    a.error_percent
        .total_cmp(&b.error_percent)
        .then_with(|| a.resistor_count().cmp(&b.resistor_count()))
        .then_with(|| a.power_dissipation.total_cmp(&b.power_dissipation))
}

impl fmt::Display for Network {
    /// `Vout=4.9655 V (0.690%), upper=5K1, lower=3K6, 2 resistors, I=1.379 mA, P=16.552 mW`
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Vout={:.4} V ({:.3}%), upper={}, lower={}, {} resistors, I={}, P={}",
            self.v_out_actual,
            self.error_percent,
            self.upper,
            self.lower,
            self.resistor_count(),
            format_current(self.current),
            format_power(self.power_dissipation),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm::Topology;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn two(upper: f64, lower: f64) -> Network {
        Network::new(Arm::single(upper), Arm::single(lower), 12.0, 5.0)
    }

    #[test]
    fn derived_quantities() {
        let n = two(5100.0, 3600.0);
        assert_relative_eq!(n.v_out_actual(), 12.0 * 3600.0 / 8700.0);
        assert_relative_eq!(n.total_resistance(), 8700.0);
        assert_relative_eq!(n.current(), 12.0 / 8700.0);
        assert_relative_eq!(n.power_dissipation(), 144.0 / 8700.0);
        assert_abs_diff_eq!(n.error_percent(), 0.6897, epsilon = 1e-4);
        assert_eq!(n.resistor_count(), 2);
        assert!(!n.upper_parallel() && !n.lower_parallel());
    }

    #[test]
    fn arms_use_their_topology() {
        let n = Network::new(
            Arm::pair(1000.0, 1000.0, Topology::Parallel),
            Arm::pair(250.0, 250.0, Topology::Series),
            10.0,
            5.0,
        );
        assert_relative_eq!(n.upper_resistance(), 500.0);
        assert_relative_eq!(n.lower_resistance(), 500.0);
        assert_relative_eq!(n.v_out_actual(), 5.0);
        assert_abs_diff_eq!(n.error_percent(), 0.0, epsilon = 1e-9);
        assert_eq!(n.resistor_count(), 4);
        assert_eq!(n.upper_values(), &[1000.0, 1000.0]);
        assert_eq!(n.schema_type(), "||/+");
    }

    #[test]
    fn output_falls_as_upper_arm_grows() {
        let outputs: Vec<f64> = [100.0, 220.0, 470.0, 1000.0, 2200.0]
            .iter()
            .map(|r| two(*r, 1000.0).v_out_actual())
            .collect();
        assert!(outputs.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn error_is_never_negative() {
        assert!(two(1000.0, 100.0).error_percent() > 0.0);
        assert!(two(100.0, 1000.0).error_percent() > 0.0);
    }

    #[test]
    fn ranking_keys_apply_in_order() {
        let exact_two = two(1400.0, 1000.0);
        let exact_three = Network::new(
            Arm::pair(1200.0, 200.0, Topology::Series),
            Arm::single(1000.0),
            12.0,
            5.0,
        );
        let exact_two_hungry = two(140.0, 100.0);
        let rough = two(5100.0, 3600.0);

        assert_eq!(rank_order(&exact_two, &rough), Ordering::Less);
        assert_eq!(rank_order(&exact_two, &exact_three), Ordering::Less);
        assert_eq!(rank_order(&exact_two_hungry, &exact_two), Ordering::Greater);
        assert_eq!(exact_two.cmp_rank(&exact_two.clone()), Ordering::Equal);
    }

    #[test]
    fn summary_lists_both_arms() {
        let n = Network::new(
            Arm::pair(4700.0, 2200.0, Topology::Series),
            Arm::pair(10_000.0, 10_000.0, Topology::Parallel),
            12.0,
            5.0,
        );
        assert_eq!(n.schema_type(), "+/||");
        let text = n.summary();
        assert!(text.starts_with("Vin=12.00 V, Vout required=5.0000 V: Vout="));
        assert!(text.contains("upper=4K7 + 2K2"));
        assert!(text.contains("lower=10K || 10K"));
        assert!(text.contains("4 resistors"));
    }
}
