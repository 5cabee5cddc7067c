//! One side of a divider: a single resistor, or two combined in series or parallel.

use std::fmt;

/// How the two resistors of an arm are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Series,
    Parallel,
}

impl Topology {
    /// Both topologies, series first.
    pub const ALL: [Topology; 2] = [Topology::Series, Topology::Parallel];

    /// `true` for [`Topology::Parallel`].
    pub fn is_parallel(self) -> bool {
        self == Topology::Parallel
    }

    /// Separator used when listing the values of an arm.
    pub fn joiner(self) -> &'static str {
        match self {
            Topology::Series => " + ",
            Topology::Parallel => " || ",
        }
    }
}

impl Default for Topology {
    fn default() -> Self {
        Topology::Series
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Topology::Series => "series",
            Topology::Parallel => "parallel",
        })
    }
}

impl From<bool> for Topology {
    /// `true` selects [`Topology::Parallel`].
    fn from(parallel: bool) -> Self {
        if parallel {
            Topology::Parallel
        } else {
            Topology::Series
        }
    }
}

/// Effective resistance of `values` joined by `topology`.
///
/// An empty slice is 0 and a single value is returned unchanged whatever the topology. Series
/// values add. A parallel pair is `a * b / (a + b)`; longer parallel lists combine as the
/// reciprocal of the summed conductances.
///
/// # Examples
/// ```
///     # use divider_calc::{arm_resistance, Topology};
///     assert_eq!(arm_resistance(&[1000.0, 2200.0], Topology::Series), 3200.0);
///     assert_eq!(arm_resistance(&[1000.0, 1000.0], Topology::Parallel), 500.0);
/// ```
pub fn arm_resistance(values: &[f64], topology: Topology) -> f64 {
    match values {
        [] => 0.0,
        [r] => *r,
        _ => match (topology, values) {
            (Topology::Series, _) => values.iter().sum(),
            (Topology::Parallel, [a, b]) => a * b / (a + b),
            (Topology::Parallel, _) => 1.0 / values.iter().map(|r| 1.0 / r).sum::<f64>(),
        },
    }
}

/// The resistors making up one arm. Holds one or two values by value; the topology only
/// matters for two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arm {
    values: [f64; 2],
    len: usize,
    topology: Topology,
}

impl Arm {
    /// A single-resistor arm.
    pub fn single(r: f64) -> Self {
        Arm {
            values: [r, 0.0],
            len: 1,
            topology: Topology::Series,
        }
    }

    /// Two resistors, in the given order, joined by `topology`.
    pub fn pair(a: f64, b: f64, topology: Topology) -> Self {
        Arm {
            values: [a, b],
            len: 2,
            topology,
        }
    }

    /// The resistor values in the order they were given.
    pub fn values(&self) -> &[f64] {
        &self.values[..self.len]
    }

    /// Number of physical resistors.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `Series` for a single resistor.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// `true` for two resistors in parallel.
    pub fn is_parallel(&self) -> bool {
        self.topology.is_parallel()
    }

    /// Effective resistance of the arm, see [`arm_resistance`].
    pub fn resistance(&self) -> f64 {
        arm_resistance(self.values(), self.topology)
    }
}

impl fmt::Display for Arm {
    /// Lists the values in RKM notation, e.g. `4K7 || 10K`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for r in self.values() {
            if !first {
                f.write_str(self.topology.joiner())?;
            }
            first = false;
            f.write_str(&crate::units::format_resistance(*r))?;
        }
        Ok(())
    }
}
