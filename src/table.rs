//! Two-column tables of intervals and their dissonance values.

use std::{
    io::{self, Write},
    iter::Peekable,
    slice,
};

/// An arithmetic range of intervals `start + k * delta` with `k = 0, 1, ...` bounded by `end` (inclusive).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sweep {
    start: f64,
    delta: f64,
    end: f64,
}

impl Sweep {
    /// Creates a new [`Sweep`].
    ///
    /// # Panics
    ///
    /// Panics if `delta` is not a finite positive number.
    ///
    /// ```should_panic
    /// # use disscalc::table::Sweep;
    /// Sweep::new(1.0, 0.0, 2.0);
    /// ```
    pub fn new(start: f64, delta: f64, end: f64) -> Self {
        assert!(
            delta.is_finite() && delta > 0.0,
            "Delta must be finite and positive but was {}",
            delta
        );
        Self { start, delta, end }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Iterates over all points of the sweep in ascending order.
    ///
    /// Each point is computed from its index, so rounding errors do not add up over long sweeps.
    ///
    /// # Examples
    ///
    /// ```
    /// # use disscalc::table::Sweep;
    /// let points = Sweep::new(1.0, 0.25, 2.0).points().collect::<Vec<_>>();
    /// assert_eq!(points, [1.0, 1.25, 1.5, 1.75, 2.0]);
    ///
    /// // Empty if start lies above end
    /// assert_eq!(Sweep::new(3.0, 1.0, 2.0).points().count(), 0);
    /// ```
    pub fn points(&self) -> SweepPoints {
        SweepPoints {
            sweep: *self,
            index: 0,
        }
    }
}

/// Iterator returned by [`Sweep::points`].
#[derive(Clone, Debug)]
pub struct SweepPoints {
    sweep: Sweep,
    index: u64,
}

impl Iterator for SweepPoints {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.sweep.start + self.index as f64 * self.sweep.delta;
        if point <= self.sweep.end {
            self.index += 1;
            Some(point)
        } else {
            None
        }
    }
}

/// Merges the points of `sweep` with the `extra` points into a single, strictly ascending sequence.
///
/// `extra` must be sorted in ascending order and must not contain duplicates.
/// An extra point that coincides with a sweep point is yielded only once. Coinciding means bit-identical: a sweep point
/// like `1.0 + 14.0 * 0.01 = 1.1400000000000001` and the extra point `1.14` are yielded as two separate points.
///
/// # Examples
///
/// ```
/// # use disscalc::table::{self, Sweep};
/// let points = table::merge_points(Sweep::new(1.0, 1.0, 3.0), &[0.5, 2.0, 2.5, 4.0]).collect::<Vec<_>>();
/// assert_eq!(points, [0.5, 1.0, 2.0, 2.5, 3.0, 4.0]);
/// ```
pub fn merge_points(sweep: Sweep, extra: &[f64]) -> MergedPoints<'_> {
    debug_assert!(
        extra.windows(2).all(|window| window[0] < window[1]),
        "Extra points must be strictly ascending"
    );

    MergedPoints {
        sweep: sweep.points().peekable(),
        extra: extra.iter().peekable(),
        last: None,
    }
}

/// Iterator returned by [`merge_points`].
pub struct MergedPoints<'a> {
    sweep: Peekable<SweepPoints>,
    extra: Peekable<slice::Iter<'a, f64>>,
    last: Option<f64>,
}

impl MergedPoints<'_> {
    fn next_candidate(&mut self) -> Option<f64> {
        match (self.sweep.peek(), self.extra.peek()) {
            (Some(&sweep_point), Some(&&extra_point)) => {
                if extra_point < sweep_point {
                    self.extra.next().copied()
                } else if extra_point == sweep_point {
                    self.extra.next();
                    self.sweep.next()
                } else {
                    self.sweep.next()
                }
            }
            (Some(_), None) => self.sweep.next(),
            (None, Some(_)) => self.extra.next().copied(),
            (None, None) => None,
        }
    }
}

impl Iterator for MergedPoints<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let candidate = self.next_candidate()?;
            // Huge starts with tiny deltas can make consecutive sweep points collapse
            if self.last.is_some_and(|last| candidate <= last) {
                continue;
            }
            self.last = Some(candidate);
            return Some(candidate);
        }
    }
}

/// A single line of a dissonance table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Row {
    pub interval: f64,
    pub dissonance: f64,
}

/// Writes `rows` as delimiter-separated values, one row per line. Returns the number of rows written.
///
/// # Examples
///
/// ```
/// # use disscalc::table::{self, Row};
/// let rows = [
///     Row { interval: 1.0, dissonance: 0.0 },
///     Row { interval: 1.5, dissonance: 0.25 },
/// ];
///
/// let mut output = Vec::new();
/// assert_eq!(table::write_dsv(&mut output, rows, '\t').unwrap(), 2);
/// assert_eq!(String::from_utf8(output).unwrap(), "1\t0\n1.5\t0.25\n");
/// ```
pub fn write_dsv(
    mut out: impl Write,
    rows: impl IntoIterator<Item = Row>,
    delimiter: char,
) -> io::Result<usize> {
    let mut num_rows = 0;
    for row in rows {
        writeln!(out, "{}{}{}", row.interval, delimiter, row.dissonance)?;
        num_rows += 1;
    }
    Ok(num_rows)
}

/// Evaluates `evaluator` at every point of [`merge_points`] and writes the results via [`write_dsv`].
pub fn write_table(
    out: impl Write,
    sweep: Sweep,
    extra: &[f64],
    delimiter: char,
    mut evaluator: impl FnMut(f64) -> f64,
) -> io::Result<usize> {
    let rows = merge_points(sweep, extra).map(|interval| Row {
        interval,
        dissonance: evaluator(interval),
    });
    write_dsv(out, rows, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sweep_hits_both_bounds() {
        let points = Sweep::new(1.0, 0.01, 2.0).points().collect::<Vec<_>>();

        assert_eq!(points.len(), 101);
        assert_eq!(points[0], 1.0);
        assert_eq!(points[1], 1.01);
        assert_eq!(points[100], 2.0);
    }

    #[test]
    fn sweep_stops_below_end_if_end_is_not_a_multiple() {
        let points = Sweep::new(0.5, 0.5, 2.7).points().collect::<Vec<_>>();
        assert_eq!(points, [0.5, 1.0, 1.5, 2.0, 2.5]);
    }

    #[test]
    fn sweep_with_start_equal_to_end_has_one_point() {
        let points = Sweep::new(1.5, 0.1, 1.5).points().collect::<Vec<_>>();
        assert_eq!(points, [1.5]);
    }

    #[test]
    fn negative_start_is_swept_through() {
        let points = Sweep::new(-1.0, 1.0, 1.0).points().collect::<Vec<_>>();
        assert_eq!(points, [-1.0, 0.0, 1.0]);
    }

    #[test]
    fn coinciding_extra_point_is_emitted_once() {
        let points = merge_points(Sweep::new(1.0, 1.0, 3.0), &[2.0, 2.5]).collect::<Vec<_>>();
        assert_eq!(points, [1.0, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn nearly_coinciding_extra_point_is_emitted_separately() {
        let points = merge_points(Sweep::new(1.0, 0.01, 2.0), &[1.14, 1.25]).collect::<Vec<_>>();

        assert_eq!(points.len(), 102);
        assert_eq!(points[14], 1.14);
        assert_eq!(points[15], 1.0 + 14.0 * 0.01);
        assert_eq!(points.iter().filter(|&&point| point == 1.25).count(), 1);
    }

    #[test]
    fn extra_points_outside_of_sweep_are_kept_in_order() {
        let points =
            merge_points(Sweep::new(1.0, 0.5, 2.0), &[0.25, 0.75, 1.25, 3.0, 5.0]).collect::<Vec<_>>();
        assert_eq!(points, [0.25, 0.75, 1.0, 1.25, 1.5, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn extra_point_at_start_and_end() {
        let points = merge_points(Sweep::new(1.0, 0.5, 2.0), &[1.0, 2.0]).collect::<Vec<_>>();
        assert_eq!(points, [1.0, 1.5, 2.0]);
    }

    #[test]
    fn empty_sweep_flushes_extra_points() {
        let points = merge_points(Sweep::new(3.0, 1.0, 2.0), &[1.5, 2.5]).collect::<Vec<_>>();
        assert_eq!(points, [1.5, 2.5]);
    }

    #[test]
    fn no_extra_points_yield_plain_sweep() {
        let sweep = Sweep::new(1.0, 0.1, 1.5);
        assert!(merge_points(sweep, &[]).eq(sweep.points()));
    }

    #[test]
    fn collapsing_sweep_points_stay_strictly_ascending() {
        let points = merge_points(Sweep::new(1e17, 1.0, 1e17 + 64.0), &[]).collect::<Vec<_>>();

        assert!(!points.is_empty());
        assert!(points.windows(2).all(|window| window[0] < window[1]));
    }

    #[test]
    fn write_table_evaluates_every_point() {
        let mut evaluated = Vec::new();
        let mut output = Vec::new();

        let num_rows = write_table(&mut output, Sweep::new(1.0, 1.0, 3.0), &[2.0, 2.5], ',', |x| {
            evaluated.push(x);
            x * 2.0
        })
        .unwrap();

        assert_eq!(num_rows, 4);
        assert_eq!(evaluated, [1.0, 2.0, 2.5, 3.0]);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "1,2\n2,4\n2.5,5\n3,6\n"
        );
    }
}
