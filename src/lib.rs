//! A voltage divider designer working from standard resistor values.
//!
//! Given an input voltage, the output voltage wanted and a tolerance, it searches a standard
//! series (E3 to E192) for divider networks whose output lands within tolerance of the target,
//! and presents them in order of increasing inaccuracy. Each arm of the divider is one
//! resistor, or two joined in series or in parallel, so a network holds 2 to 4 resistors.
//!
//! The upper arm sits between the input and the output node, the lower arm between the output
//! node and ground:
//!
//! ```text
//! Vout = Vin * Rlow / (Rup + Rlow)
//! ```
//!
//! Matches with equal error are ordered by resistor count, then by the power the divider
//! burns.
//!
//! # Example
//! Dropping 12V to 5V for an ADC input, from E24 values between 1K and 100K, and ignoring
//! anything drawing more than a milliamp:
//! ```rust no_run
//! extern crate divider_calc;
//!
//! use divider_calc::*;
//!
//! fn main() {
//!     let params = SearchParams::new(12.0, 5.0)
//!         .with_tolerance(0.5)
//!         .with_series(Series::E24)
//!         .with_range(1e3, 1e5)
//!         .with_max_results(5);
//!
//!     let found = search_with(
//!         &params,
//!         BoundBuilder::new()
//!             .bound("I <= 1e-3")
//!             .expect("Error: bad bound")
//!             .finish(),
//!     )
//!     .expect("Error: invalid voltages");
//!
//!     for (idx, network) in found.iter().enumerate() {
//!         println!("Match {}: {}", idx + 1, network);
//!     }
//! }
//! ```
//!
//! The search takes time roughly proportional to the fourth power of the number of series
//! values in the range; see [`Pruning`] for how wide ranges are thinned.

extern crate itertools;
#[macro_use]
extern crate lazy_static;

mod arm;
mod error;
mod network;
pub mod ohm;
mod search;
mod series;
mod units;

#[cfg(feature = "expr_builder")]
mod expr_builder;

pub use arm::{arm_resistance, Arm, Topology};
pub use error::{DividerError, Result};
pub use network::{divider_output, error_percent, rank_order, Network};
pub use search::{
    quad_indices, search, search_with, Pruning, SearchParams, SymmetricPairs, STRIDE_THRESHOLD,
};
pub use series::{Series, MAX_DECADE, MIN_DECADE};
pub use units::{format_current, format_power, format_resistance, format_voltage, parse_resistance};

#[cfg(feature = "expr_builder")]
pub use expr_builder::{BoundBuilder, VARIABLES};
