use crate::utils::parsing::{ints_n, parse_lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 15, tags = ["2022", "geometry", "intervals"])]
pub struct Solver;

pub const ROW: i64 = 2_000_000;
pub const LIMIT: i64 = 4_000_000;

#[derive(Debug, Clone, Copy)]
pub struct Sensor {
    x: i64,
    y: i64,
    beacon: (i64, i64),
    range: i64,
}

impl Sensor {
    fn covers(&self, x: i64, y: i64) -> bool {
        (self.x - x).abs() + (self.y - y).abs() <= self.range
    }

    /// Columns this sensor rules out on `row`, inclusive
    fn span(&self, row: i64) -> Option<(i64, i64)> {
        let reach = self.range - (self.y - row).abs();
        (reach >= 0).then(|| (self.x - reach, self.x + reach))
    }
}

/// Sorted, merged column intervals covered on `row`
fn covered(sensors: &[Sensor], row: i64) -> Vec<(i64, i64)> {
    let mut merged: Vec<(i64, i64)> = Vec::new();
    for (lo, hi) in sensors.iter().filter_map(|s| s.span(row)).sorted_unstable() {
        match merged.last_mut() {
            Some(last) if lo <= last.1 + 1 => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }
    merged
}

/// Count of positions on `row` where a beacon cannot be
pub fn positions_without_beacon(sensors: &[Sensor], row: i64) -> i64 {
    let spans = covered(sensors, row);
    let cells: i64 = spans.iter().map(|(lo, hi)| hi - lo + 1).sum();
    let beacons = sensors
        .iter()
        .map(|s| s.beacon)
        .filter(|&(bx, by)| by == row && spans.iter().any(|&(lo, hi)| (lo..=hi).contains(&bx)))
        .unique()
        .count() as i64;
    cells - beacons
}

/// Tuning frequency of the only uncovered position in `0..=limit` on both axes
///
/// A lone gap must touch the outer edge of at least two sensors, so it is
/// searched for at crossings of the diagonals just outside each range. If
/// that finds nothing the rows are scanned directly.
pub fn tuning_frequency(sensors: &[Sensor], limit: i64) -> Option<i64> {
    let uncovered = |x: i64, y: i64| {
        (0..=limit).contains(&x)
            && (0..=limit).contains(&y)
            && !sensors.iter().any(|s| s.covers(x, y))
    };

    // y - x = a and y + x = b for each border diagonal
    let rising: Vec<i64> = sensors
        .iter()
        .flat_map(|s| [s.y - s.x + s.range + 1, s.y - s.x - s.range - 1])
        .unique()
        .collect();
    let falling: Vec<i64> = sensors
        .iter()
        .flat_map(|s| [s.y + s.x + s.range + 1, s.y + s.x - s.range - 1])
        .unique()
        .collect();

    let crossing = rising
        .iter()
        .cartesian_product(&falling)
        .filter(|&(a, b)| (b - a) % 2 == 0)
        .map(|(a, b)| ((b - a) / 2, (a + b) / 2))
        .find(|&(x, y)| uncovered(x, y));

    let (x, y) = crossing.or_else(|| {
        (0..=limit).find_map(|row| {
            let mut x = 0;
            for (lo, hi) in covered(sensors, row) {
                if lo > x {
                    break;
                }
                x = x.max(hi + 1);
            }
            (x <= limit).then_some((x, row))
        })
    })?;
    Some(x * 4_000_000 + y)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Sensor>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let [x, y, bx, by] = ints_n::<i64, 4>(line)?;
            Ok(Sensor {
                x,
                y,
                beacon: (bx, by),
                range: (x - bx).abs() + (y - by).abs(),
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(positions_without_beacon(shared, ROW).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        tuning_frequency(shared, LIMIT)
            .map(|f| f.to_string())
            .ok_or_else(|| SolveError::SolveFailed("every position is covered".into()))
    }
}
