//! Standard preferred-value series and the candidate values they produce over a range.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::error::{DividerError, Result};

/// Lowest decade (as a power of ten) a series is scaled to.
pub const MIN_DECADE: i32 = -3;
/// Highest decade (as a power of ten) a series is scaled to.
pub const MAX_DECADE: i32 = 12;

lazy_static! {
    static ref E3: SeriesTable = SeriesTable::new(&[100, 220, 470]);
    static ref E6: SeriesTable = SeriesTable::extend(&E3, &[150, 330, 680]);
    static ref E12: SeriesTable = SeriesTable::extend(&E6, &[120, 180, 270, 390, 560, 820]);
    static ref E24: SeriesTable = SeriesTable::extend(
        &E12,
        &[110, 130, 160, 200, 240, 300, 360, 430, 510, 620, 750, 910],
    );
    static ref E48: SeriesTable = SeriesTable::new(&[
        100, 105, 110, 115, 121, 127, 133, 140, 147, 154, 162, 169, 178, 187, 196, 205,
        215, 226, 237, 249, 261, 274, 287, 301, 316, 332, 348, 365, 383, 402, 422, 442,
        464, 487, 511, 536, 562, 590, 619, 649, 681, 715, 750, 787, 825, 866, 909, 953,
    ]);
    static ref E96: SeriesTable = SeriesTable::new(&[
        100, 102, 105, 107, 110, 113, 115, 118, 121, 124, 127, 130, 133, 137, 140, 143,
        147, 150, 154, 158, 162, 165, 169, 174, 178, 182, 187, 191, 196, 200, 205, 210,
        215, 221, 226, 232, 237, 243, 249, 255, 261, 267, 274, 280, 287, 294, 301, 309,
        316, 324, 332, 340, 348, 357, 365, 374, 383, 392, 402, 412, 422, 432, 442, 453,
        464, 475, 487, 499, 511, 523, 536, 549, 562, 576, 590, 604, 619, 634, 649, 665,
        681, 698, 715, 732, 750, 768, 787, 806, 825, 845, 866, 887, 909, 931, 953, 976,
    ]);
    static ref E192: SeriesTable = SeriesTable::new(&[
        100, 101, 102, 104, 105, 106, 107, 109, 110, 111, 113, 114, 115, 117, 118, 120,
        121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 142, 143, 145,
        147, 149, 150, 152, 154, 156, 158, 160, 162, 164, 165, 167, 169, 172, 174, 176,
        178, 180, 182, 184, 187, 189, 191, 193, 196, 198, 200, 203, 205, 208, 210, 213,
        215, 218, 221, 223, 226, 229, 232, 234, 237, 240, 243, 246, 249, 252, 255, 258,
        261, 264, 267, 271, 274, 277, 280, 284, 287, 291, 294, 298, 301, 305, 309, 312,
        316, 320, 324, 328, 332, 336, 340, 344, 348, 352, 357, 361, 365, 370, 374, 379,
        383, 388, 392, 397, 402, 407, 412, 417, 422, 427, 432, 437, 442, 448, 453, 459,
        464, 470, 475, 481, 487, 493, 499, 505, 511, 517, 523, 530, 536, 542, 549, 556,
        562, 569, 576, 583, 590, 597, 604, 612, 619, 626, 634, 642, 649, 657, 665, 673,
        681, 690, 698, 706, 715, 723, 732, 741, 750, 759, 768, 777, 787, 796, 806, 816,
        825, 835, 845, 856, 866, 876, 887, 898, 909, 920, 931, 942, 953, 965, 976, 988,
    ]);
}

/// The mantissas of one decade, in hundredths (`470` is 4.7), sorted ascending.
///
/// Integer mantissas keep decade scaling exact: 110 * 10^0 is exactly 110.0, where
/// 1.1 * 100.0 in floating point is not.
#[derive(Debug)]
struct SeriesTable {
    mantissas: Box<[u16]>,
}

impl SeriesTable {
    fn new(series: &[u16]) -> Self {
        SeriesTable {
            mantissas: series
                .iter()
                .cloned()
                .sorted()
                .dedup()
                .collect::<Vec<u16>>()
                .into_boxed_slice(),
        }
    }

    fn extend(base: &SeriesTable, add: &[u16]) -> Self {
        SeriesTable::new(&base.iter().chain(add.iter().cloned()).collect::<Vec<u16>>())
    }

    fn iter(&self) -> impl Iterator<Item = u16> + Clone + '_ {
        self.mantissas.iter().cloned()
    }

    fn len(&self) -> usize {
        self.mantissas.len()
    }
}

/// `mantissa` hundredths scaled to `decade`, i.e. `mantissa / 100 * 10^decade`.
fn scale(mantissa: u16, decade: i32) -> f64 {
    let exp = decade - 2;
    if exp >= 0 {
        f64::from(mantissa) * 10f64.powi(exp)
    } else {
        f64::from(mantissa) / 10f64.powi(-exp)
    }
}

/// An IEC 60063 preferred-number series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    E3,
    E6,
    E12,
    E24,
    E48,
    E96,
    E192,
}

impl Series {
    /// Every supported series, coarsest first.
    pub const ALL: [Series; 7] = [
        Series::E3,
        Series::E6,
        Series::E12,
        Series::E24,
        Series::E48,
        Series::E96,
        Series::E192,
    ];

    fn table(self) -> &'static SeriesTable {
        match self {
            Series::E3 => &*E3,
            Series::E6 => &*E6,
            Series::E12 => &*E12,
            Series::E24 => &*E24,
            Series::E48 => &*E48,
            Series::E96 => &*E96,
            Series::E192 => &*E192,
        }
    }

    /// The series name as printed on datasheets, e.g. `"E24"`.
    pub fn name(self) -> &'static str {
        match self {
            Series::E3 => "E3",
            Series::E6 => "E6",
            Series::E12 => "E12",
            Series::E24 => "E24",
            Series::E48 => "E48",
            Series::E96 => "E96",
            Series::E192 => "E192",
        }
    }

    /// Number of values in one decade.
    pub fn per_decade(self) -> usize {
        self.table().len()
    }

    /// The mantissas of the series in `[1, 10)`, ascending.
    pub fn base_values(self) -> impl Iterator<Item = f64> {
        self.table().iter().map(|m| f64::from(m) / 100.0)
    }

    /// Every value of the series inside `[min, max]`, ascending and without duplicates.
    ///
    /// The series is scaled over the decades `10^MIN_DECADE ..= 10^MAX_DECADE`; a non-positive
    /// `min` starts at the lowest of them.
    ///
    /// # Errors
    /// `DividerError::EmptyRange` when no value falls inside the range, including when the
    /// range is reversed or a bound is not finite.
    ///
    /// # Examples
    /// ```
    /// # use divider_calc::Series;
    /// let values = Series::E6.values_in_range(100.0, 1000.0).unwrap();
    /// assert_eq!(values, vec![100.0, 150.0, 220.0, 330.0, 470.0, 680.0, 1000.0]);
    /// ```
    pub fn values_in_range(self, min: f64, max: f64) -> Result<Vec<f64>> {
        let empty = || DividerError::EmptyRange {
            series: self,
            min,
            max,
        };
        if !(min.is_finite() && max.is_finite()) || max <= 0.0 || min > max {
            return Err(empty());
        }

        // A decade of slack either side covers log10 rounding near a power of ten.
        let low = if min > 0.0 {
            (min.log10().floor() as i32 - 1).max(MIN_DECADE)
        } else {
            MIN_DECADE
        };
        let high = (max.log10().floor() as i32 + 1).min(MAX_DECADE);

        let table = self.table();
        let values: Vec<f64> = (low..=high)
            .flat_map(|decade| table.iter().map(move |m| scale(m, decade)))
            .filter(|r| *r >= min && *r <= max)
            .sorted_by(|a, b| a.total_cmp(b))
            .dedup()
            .collect();

        if values.is_empty() {
            Err(empty())
        } else {
            Ok(values)
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Series {
    type Err = DividerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix('E')
            .or_else(|| s.strip_prefix('e'))
            .unwrap_or(s);
        Series::ALL
            .iter()
            .cloned()
            .find(|series| &series.name()[1..] == digits)
            .ok_or_else(|| DividerError::InvalidValue {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_have_their_nominal_size() {
        let sizes: Vec<usize> = Series::ALL.iter().map(|s| s.per_decade()).collect();
        assert_eq!(sizes, vec![3, 6, 12, 24, 48, 96, 192]);
    }

    #[test]
    fn fine_tables_hold_iec_values() {
        let has = |series: Series, v: f64| series.base_values().any(|b| b == v);

        for v in &[1.0, 1.21, 2.37, 4.64, 6.81, 9.53] {
            assert!(has(Series::E48, *v), "E48 lacks {}", v);
        }
        for v in &[1.02, 2.49, 4.99, 7.32, 9.76] {
            assert!(has(Series::E96, *v), "E96 lacks {}", v);
        }
        for v in &[1.01, 4.7, 6.12, 9.2, 9.88] {
            assert!(has(Series::E192, *v), "E192 lacks {}", v);
        }

        // 4.7 belongs to E3..E24 and E192 only.
        assert!(!has(Series::E48, 4.7));
        assert!(!has(Series::E96, 4.7));
        assert!(has(Series::E24, 4.7));
    }

    #[test]
    fn base_values_lie_in_one_decade() {
        for series in Series::ALL.iter() {
            let values: Vec<f64> = series.base_values().collect();
            assert!(values.windows(2).all(|w| w[0] < w[1]), "{} not sorted", series);
            assert!(values.iter().all(|v| *v >= 1.0 && *v < 10.0));
        }
    }

    #[test]
    fn smaller_series_nest_inside_e24() {
        let e24: Vec<f64> = Series::E24.base_values().collect();
        for series in &[Series::E3, Series::E6, Series::E12] {
            assert!(series.base_values().all(|v| e24.contains(&v)));
        }
    }

    #[test]
    fn decade_scaling_is_exact() {
        let values = Series::E24.values_in_range(100.0, 1_000_000.0).unwrap();
        assert_eq!(values.len(), 24 * 4 + 1);
        assert_eq!(values[0], 100.0);
        assert!(values.contains(&110.0));
        assert!(values.contains(&5100.0));
        assert!(values.contains(&7500.0));
        assert_eq!(*values.last().unwrap(), 1_000_000.0);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let values = Series::E12.values_in_range(120.0, 180.0).unwrap();
        assert_eq!(values, vec![120.0, 150.0, 180.0]);
    }

    #[test]
    fn sub_ohm_values_are_generated() {
        let values = Series::E3.values_in_range(0.1, 1.0).unwrap();
        assert_eq!(values, vec![0.1, 0.22, 0.47, 1.0]);
    }

    #[test]
    fn non_positive_minimum_starts_at_lowest_decade() {
        let values = Series::E3.values_in_range(0.0, 0.005).unwrap();
        assert_eq!(values, vec![0.001, 0.0022, 0.0047]);
    }

    #[test]
    fn empty_ranges_are_errors() {
        let gap = Series::E3.values_in_range(500.0, 900.0);
        assert!(matches!(gap, Err(DividerError::EmptyRange { .. })));

        let reversed = Series::E24.values_in_range(1000.0, 100.0);
        assert!(matches!(reversed, Err(DividerError::EmptyRange { .. })));

        let nan = Series::E24.values_in_range(f64::NAN, 100.0);
        assert!(matches!(nan, Err(DividerError::EmptyRange { .. })));
    }

    #[test]
    fn parses_series_names() {
        assert_eq!("E24".parse::<Series>().unwrap(), Series::E24);
        assert_eq!("e96".parse::<Series>().unwrap(), Series::E96);
        assert_eq!(" 12 ".parse::<Series>().unwrap(), Series::E12);
        assert!("E7".parse::<Series>().is_err());
    }
}
