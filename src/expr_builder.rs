use std::f64::EPSILON;
use std::str::FromStr;

use crate::error::{DividerError, Result};
use crate::network::Network;

/// Names a bound expression may use.
pub const VARIABLES: &[&str] = &["Rup", "Rlow", "Rtot", "I", "P", "Vout", "Err", "N"];

// Two-character operators first so "<=" is not read as "<".
const OPERATORS: &[(&str, Cmp)] = &[
    ("<=", Cmp::Le),
    (">=", Cmp::Ge),
    ("==", Cmp::Eq),
    ("!=", Cmp::Ne),
    ("<", Cmp::Lt),
    (">", Cmp::Gt),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cmp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Cmp {
    fn holds(self, a: f64, b: f64) -> bool {
        match self {
            Cmp::Lt => a < b,
            Cmp::Le => a <= b,
            Cmp::Gt => a > b,
            Cmp::Ge => a >= b,
            Cmp::Eq => (a - b).abs() < EPSILON,
            Cmp::Ne => (a - b).abs() > EPSILON,
        }
    }
}

fn variables(values: [f64; 8]) -> meval::Context<'static> {
    let mut ctx = meval::Context::new();
    for (name, value) in VARIABLES.iter().zip(values.iter()) {
        ctx.var(*name, *value);
    }
    ctx
}

fn network_context(n: &Network) -> meval::Context<'static> {
    variables([
        n.upper_resistance(),
        n.lower_resistance(),
        n.total_resistance(),
        n.current(),
        n.power_dissipation(),
        n.v_out_actual(),
        n.error_percent(),
        n.resistor_count() as f64,
    ])
}

struct Bound {
    cmp: Cmp,
    expr: meval::Expr,
    target: f64,
}

impl Bound {
    fn holds(&self, ctx: &meval::Context) -> bool {
        self.expr
            .eval_with_context(ctx)
            .map(|val| self.cmp.holds(val, self.target))
            .unwrap_or(false)
    }
}

impl FromStr for Bound {
    type Err = DividerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: String| DividerError::invalid_bound(s, message);

        let &(op, cmp) = OPERATORS
            .iter()
            .find(|(op, _)| s.contains(*op))
            .ok_or_else(|| invalid("must contain one of <, <=, >, >=, == or !=".to_string()))?;

        let mut split = s.splitn(2, op);
        let expr = split
            .next()
            .unwrap_or_default()
            .trim()
            .parse::<meval::Expr>()
            .map_err(|e| invalid(e.to_string()))?;
        let target = split
            .next()
            .unwrap_or_default()
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(format!("target is not a number: {}", e)))?;

        // Unknown variable names only surface on evaluation.
        expr.eval_with_context(&variables([1.0; 8]))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Bound { cmp, expr, target })
    }
}

/// Builder for the `accept` argument of [`search_with`](crate::search_with) from textual
/// bounds on each candidate network.
///
/// # Examples
/// ```
///     # use divider_calc::*;
///     let accept = BoundBuilder::new()
///         .bound("Rtot >= 10e3").unwrap()
///         .bound("P <= 0.01").unwrap()
///         .finish();
///     let params = SearchParams::default()
///         .with_series(Series::E12)
///         .with_range(1e3, 1e5);
///     let found = search_with(&params, accept).unwrap();
///     assert!(found.iter().all(|n| n.total_resistance() >= 10e3));
/// ```
#[derive(Default)]
pub struct BoundBuilder {
    bounds: Vec<Bound>,
}

impl BoundBuilder {
    /// Init a new builder.
    pub fn new() -> Self {
        BoundBuilder { bounds: Vec::new() }
    }

    /// Add a new bound of the form `expr op target`, where `expr` is a
    /// [meval expression](https://docs.rs/meval/#supported-expressions) over the variables
    /// below, `op` is one of <, >, <=, >=, == or != and `target` is an `f64` literal.
    ///
    /// | variable | meaning |
    /// |----------|---------|
    /// | `Rup`, `Rlow` | effective resistance of the upper and lower arm, Ω |
    /// | `Rtot` | `Rup + Rlow`, Ω |
    /// | `I` | divider current, A |
    /// | `P` | dissipated power, W |
    /// | `Vout` | achieved output voltage, V |
    /// | `Err` | output error, % |
    /// | `N` | number of resistors |
    ///
    /// A network is kept only if every bound holds.
    ///
    /// # Errors
    /// `DividerError::InvalidBound` for a missing operator, an expression meval cannot parse or
    /// evaluate, or a target that is not a number.
    pub fn bound(mut self, expr: &str) -> Result<Self> {
        self.bounds.push(expr.parse()?);
        Ok(self)
    }

    /// Finishes the building and converts the bounds into a predicate for `search_with`.
    pub fn finish(self) -> impl Fn(&Network) -> bool {
        let bounds = self.bounds;
        move |network: &Network| {
            if bounds.is_empty() {
                return true;
            }
            let ctx = network_context(network);
            bounds.iter().all(|b| b.holds(&ctx))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm::{Arm, Topology};

    fn divider(upper: f64, lower: f64) -> Network {
        Network::new(Arm::single(upper), Arm::single(lower), 12.0, 5.0)
    }

    #[test]
    fn operators_split_at_the_longest_match() {
        let ge: Bound = "Rtot >= 1000".parse().unwrap();
        assert_eq!(ge.cmp, Cmp::Ge);
        assert_eq!(ge.target, 1000.0);

        let lt: Bound = "I*1000 < 2.5".parse().unwrap();
        assert_eq!(lt.cmp, Cmp::Lt);

        let ne: Bound = "N != 4".parse().unwrap();
        assert_eq!(ne.cmp, Cmp::Ne);
    }

    #[test]
    fn malformed_bounds_are_rejected() {
        for bad in &["Rtot", "Rtot >= ", "Rtot >= lots", "Rtot +* 2 > 1", "Q > 1"] {
            let err = BoundBuilder::new().bound(bad).err();
            assert!(
                matches!(err, Some(DividerError::InvalidBound { .. })),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn every_bound_must_hold() {
        let accept = BoundBuilder::new()
            .bound("Rtot >= 10000")
            .unwrap()
            .bound("N == 2")
            .unwrap()
            .finish();

        assert!(accept(&divider(14_000.0, 10_000.0)));
        assert!(!accept(&divider(1400.0, 1000.0)));
        assert!(!accept(&Network::new(
            Arm::pair(12_000.0, 2000.0, Topology::Series),
            Arm::single(10_000.0),
            12.0,
            5.0,
        )));
    }

    #[test]
    fn power_and_current_are_in_si_units() {
        let n = divider(14_000.0, 10_000.0);
        let cool = BoundBuilder::new().bound("P <= 0.01").unwrap().finish();
        let warm = BoundBuilder::new().bound("P*1000 > 7").unwrap().finish();
        let ratio = BoundBuilder::new().bound("Rlow / Rup < 0.75").unwrap().finish();
        assert!(cool(&n));
        assert!(!warm(&n));
        assert!(ratio(&n));
    }

    #[test]
    fn no_bounds_accept_everything() {
        let accept = BoundBuilder::new().finish();
        assert!(accept(&divider(1.0, 1.0)));
    }
}
