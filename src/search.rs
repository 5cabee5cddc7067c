//! Enumeration of divider networks built from one standard series.
//!
//! A search walks four families of candidates, every one of them evaluated against the
//! tolerance and collected into a single append-only sink:
//!
//! 1. one resistor per arm, over the full cross product of the candidate values;
//! 2. two resistors in the upper arm (series and parallel) over one lower resistor;
//! 3. one upper resistor over two in the lower arm (series and parallel);
//! 4. two resistors in each arm, all four topology combinations.
//!
//! Families 2 and 3 enumerate both orders of a pair, so mirrored arms such as `1K + 2K2` and
//! `2K2 + 1K` are both reported. Family 4 only visits index pairs `(i, j)` with `j >= i` on
//! each side, and above [`STRIDE_THRESHOLD`] candidates it steps every index by two under the
//! default [`Pruning`]. That skip is not bounded: the best four-resistor network can be missed
//! on wide ranges of fine series. [`Pruning::Exhaustive`] turns it off.

use itertools::{iproduct, Itertools};
use tracing::{debug, info, info_span};

use crate::arm::{Arm, Topology};
use crate::error::{DividerError, Result};
use crate::network::{divider_output, error_percent, rank_order, Network};
use crate::series::Series;

/// Candidate count above which [`Pruning::Adaptive`] starts striding by default.
pub const STRIDE_THRESHOLD: usize = 50;

/// How the four-resistor family trades completeness for time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pruning {
    /// Step indices by `stride` once more than `threshold` candidate values exist.
    Adaptive { threshold: usize, stride: usize },
    /// Visit every index pair whatever the candidate count.
    Exhaustive,
}

impl Default for Pruning {
    fn default() -> Self {
        Pruning::Adaptive {
            threshold: STRIDE_THRESHOLD,
            stride: 2,
        }
    }
}

impl Pruning {
    /// Index step for a candidate set of `candidates` values. Never zero.
    pub fn stride_for(self, candidates: usize) -> usize {
        match self {
            Pruning::Adaptive { threshold, stride } if candidates > threshold => stride.max(1),
            _ => 1,
        }
    }
}

/// Everything a search needs. `Default` matches the usual bench setup: 12 V down to 5 V within
/// 1 % from E24 values between 100 Ω and 1 MΩ, keeping the best 100.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub v_in: f64,
    pub v_out_required: f64,
    pub tolerance_percent: f64,
    pub series: Series,
    pub min_resistance: f64,
    pub max_resistance: f64,
    pub max_results: usize,
    pub pruning: Pruning,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            v_in: 12.0,
            v_out_required: 5.0,
            tolerance_percent: 1.0,
            series: Series::E24,
            min_resistance: 100.0,
            max_resistance: 1_000_000.0,
            max_results: 100,
            pruning: Pruning::default(),
        }
    }
}

impl SearchParams {
    /// Defaults for everything but the two voltages.
    pub fn new(v_in: f64, v_out_required: f64) -> Self {
        SearchParams {
            v_in,
            v_out_required,
            ..Default::default()
        }
    }

    /// Accepted output error, in percent.
    pub fn with_tolerance(mut self, tolerance_percent: f64) -> Self {
        self.tolerance_percent = tolerance_percent;
        self
    }

    /// Series the candidate values are drawn from.
    pub fn with_series(mut self, series: Series) -> Self {
        self.series = series;
        self
    }

    /// Inclusive bounds, in ohms, on every individual resistor.
    pub fn with_range(mut self, min_resistance: f64, max_resistance: f64) -> Self {
        self.min_resistance = min_resistance;
        self.max_resistance = max_resistance;
        self
    }

    /// Cap on the number of networks returned.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Policy for the four-resistor family, see [`Pruning`].
    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// Checks the voltages: the output must be positive and below the input.
    pub fn validate(&self) -> Result<()> {
        if !(self.v_out_required > 0.0) {
            return Err(DividerError::invalid_parameter(
                "v_out_required",
                format!("output voltage must be positive, got {} V", self.v_out_required),
            ));
        }
        if !(self.v_out_required < self.v_in) {
            return Err(DividerError::invalid_parameter(
                "v_out_required",
                format!(
                    "output voltage {} V must be less than input voltage {} V",
                    self.v_out_required, self.v_in
                ),
            ));
        }
        Ok(())
    }
}

/// Index pairs `(i, j)` over `0..len` with `j >= i`, both advancing by `stride`.
///
/// ```
///     # use divider_calc::SymmetricPairs;
///     let pairs: Vec<_> = SymmetricPairs::new(3, 1).collect();
///     assert_eq!(pairs, vec![(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]);
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricPairs {
    len: usize,
    stride: usize,
    i: usize,
    j: usize,
}

impl SymmetricPairs {
    /// A zero `stride` is treated as 1.
    pub fn new(len: usize, stride: usize) -> Self {
        SymmetricPairs {
            len,
            stride: stride.max(1),
            i: 0,
            j: 0,
        }
    }
}

impl Iterator for SymmetricPairs {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        if self.i >= self.len {
            return None;
        }
        let item = (self.i, self.j);
        self.j += self.stride;
        if self.j >= self.len {
            self.i += self.stride;
            self.j = self.i;
        }
        Some(item)
    }
}

/// Index quadruples for the four-resistor family: an upper pair crossed with a lower pair.
pub fn quad_indices(
    len: usize,
    stride: usize,
) -> impl Iterator<Item = ((usize, usize), (usize, usize))> {
    SymmetricPairs::new(len, stride).cartesian_product(SymmetricPairs::new(len, stride))
}

/// Append-only collection of the networks that pass the tolerance, sealed once into the
/// ranked result.
pub(crate) struct Matches<'a> {
    v_in: f64,
    v_out_required: f64,
    tolerance_percent: f64,
    accept: &'a dyn Fn(&Network) -> bool,
    found: Vec<Network>,
}

impl<'a> Matches<'a> {
    pub(crate) fn new(params: &SearchParams, accept: &'a dyn Fn(&Network) -> bool) -> Self {
        Matches {
            v_in: params.v_in,
            v_out_required: params.v_out_required,
            tolerance_percent: params.tolerance_percent,
            accept,
            found: Vec::new(),
        }
    }

    /// Keeps the divider made of `upper` over `lower` if it is within tolerance and accepted.
    pub(crate) fn offer(&mut self, upper: Arm, lower: Arm) -> bool {
        let v_out = divider_output(self.v_in, upper.resistance(), lower.resistance());
        if !(error_percent(v_out, self.v_out_required) <= self.tolerance_percent) {
            return false;
        }
        let network = Network::new(upper, lower, self.v_in, self.v_out_required);
        if !(self.accept)(&network) {
            return false;
        }
        self.found.push(network);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.found.len()
    }

    /// Ranks everything collected and keeps the best `max_results`.
    pub(crate) fn seal(mut self, max_results: usize) -> Vec<Network> {
        self.found.sort_by(rank_order);
        self.found.truncate(max_results);
        self.found
    }
}

fn two_resistors(values: &[f64], matches: &mut Matches) {
    for (&r1, &r2) in values.iter().cartesian_product(values) {
        matches.offer(Arm::single(r1), Arm::single(r2));
    }
}

fn split_upper(values: &[f64], matches: &mut Matches) {
    for (&r1a, &r1b, &r2) in iproduct!(values, values, values) {
        for &topology in &Topology::ALL {
            matches.offer(Arm::pair(r1a, r1b, topology), Arm::single(r2));
        }
    }
}

fn split_lower(values: &[f64], matches: &mut Matches) {
    for (&r1, &r2a, &r2b) in iproduct!(values, values, values) {
        for &topology in &Topology::ALL {
            matches.offer(Arm::single(r1), Arm::pair(r2a, r2b, topology));
        }
    }
}

fn split_both(values: &[f64], stride: usize, matches: &mut Matches) {
    for ((i1, i2), (i3, i4)) in quad_indices(values.len(), stride) {
        for (&upper, &lower) in Topology::ALL.iter().cartesian_product(&Topology::ALL) {
            matches.offer(
                Arm::pair(values[i1], values[i2], upper),
                Arm::pair(values[i3], values[i4], lower),
            );
        }
    }
}

/// Finds the dividers closest to `params.v_out_required`, best first.
///
/// Every returned network is within `params.tolerance_percent` of the target, and at most
/// `params.max_results` are returned. An empty list is a normal outcome: nothing within
/// tolerance, no series value inside the resistance range, or a tolerance that is not positive.
///
/// # Errors
/// `DividerError::InvalidParameter` when the output voltage is not positive or not below the
/// input voltage. Nothing is enumerated in that case.
///
/// # Examples
/// ```
///     # use divider_calc::*;
///     let params = SearchParams::new(10.0, 5.0)
///         .with_series(Series::E3)
///         .with_range(100.0, 1000.0)
///         .with_max_results(5);
///     let found = search(&params).unwrap();
///
///     assert_eq!(found.len(), 5);
///     assert_eq!(found[0].error_percent(), 0.0);
///     assert_eq!(found[0].resistor_count(), 2);
/// ```
pub fn search(params: &SearchParams) -> Result<Vec<Network>> {
    search_with(params, |_| true)
}

/// [`search`], additionally dropping every in-tolerance network for which `accept` is false.
///
/// `accept` only filters; the ranking is unchanged. See `BoundBuilder` for building one from
/// textual bounds.
pub fn search_with<F>(params: &SearchParams, accept: F) -> Result<Vec<Network>>
where
    F: Fn(&Network) -> bool,
{
    params.validate()?;

    let _span = info_span!(
        "divider_search",
        v_in = params.v_in,
        v_out = params.v_out_required,
        tolerance = params.tolerance_percent,
        series = %params.series
    )
    .entered();

    if !(params.tolerance_percent > 0.0) || params.max_results == 0 {
        debug!(
            tolerance = params.tolerance_percent,
            max_results = params.max_results,
            "nothing can be returned"
        );
        return Ok(Vec::new());
    }

    let values = match params
        .series
        .values_in_range(params.min_resistance, params.max_resistance)
    {
        Ok(values) => values,
        Err(err @ DividerError::EmptyRange { .. }) => {
            debug!(%err, "no candidate values");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err),
    };
    let stride = params.pruning.stride_for(values.len());
    info!(candidates = values.len(), stride, "searching divider combinations");

    let mut matches = Matches::new(params, &accept);

    two_resistors(&values, &mut matches);
    debug!(found = matches.len(), "two resistors");

    split_upper(&values, &mut matches);
    debug!(found = matches.len(), "split upper arm");

    split_lower(&values, &mut matches);
    debug!(found = matches.len(), "split lower arm");

    split_both(&values, stride, &mut matches);
    debug!(found = matches.len(), "split both arms");

    let total = matches.len();
    let ranked = matches.seal(params.max_results);
    info!(total, kept = ranked.len(), "search finished");
    Ok(ranked)
}
