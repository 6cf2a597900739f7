use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 24, tags = ["2022", "grid", "bfs"])]
pub struct Solver;

/// Position in interior coordinates; the entrance sits at row -1 and the exit
/// at row `height`
type Pos = (isize, isize);

#[derive(Debug)]
pub struct Valley {
    /// Interior tiles without the surrounding walls
    tiles: Vec<Vec<u8>>,
    height: isize,
    width: isize,
    entrance: Pos,
    exit: Pos,
}

impl Valley {
    /// Blizzards wrap around, so the tile a blizzard came from is found by
    /// walking back `time` steps against its direction
    fn is_clear(&self, (r, c): Pos, time: usize) -> bool {
        if (r, c) == self.entrance || (r, c) == self.exit {
            return true;
        }
        if !(0..self.height).contains(&r) || !(0..self.width).contains(&c) {
            return false;
        }
        let t = time as isize;
        let at = |row: isize, col: isize| {
            self.tiles[row.rem_euclid(self.height) as usize][col.rem_euclid(self.width) as usize]
        };
        at(r, c - t) != b'>' && at(r, c + t) != b'<' && at(r - t, c) != b'v' && at(r + t, c) != b'^'
    }

    /// Minute of arrival at `to` when leaving `from` at minute `start`
    fn crossing(&self, from: Pos, to: Pos, start: usize) -> Result<usize, SolveError> {
        // waiting at `from` is always allowed, so the reachable set at a given
        // phase of the blizzard period only grows; once every phase could have
        // filled the valley the goal is unreachable
        let (h, w) = (self.height as usize, self.width as usize);
        let period = h / gcd(h, w) * w;
        let limit = start + period * (h * w + 2);
        let mut frontier = HashSet::from([from]);
        for time in start..limit {
            if frontier.contains(&to) {
                return Ok(time);
            }
            frontier = frontier
                .iter()
                .flat_map(|&(r, c)| [(r, c), (r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)])
                .filter(|&p| self.is_clear(p, time + 1))
                .collect();
        }
        Err(SolveError::SolveFailed(
            format!("no way from {from:?} to {to:?}").into(),
        ))
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

impl AocParser for Solver {
    type SharedData<'a> = Valley;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rows: Vec<&[u8]> = input
            .lines()
            .map(|l| l.trim().as_bytes())
            .filter(|l| !l.is_empty())
            .collect();
        let (Some(&top), Some(&bottom)) = (rows.first(), rows.last()) else {
            return Err(ParseError::MissingData("empty valley".into()));
        };
        if rows.len() < 3 || top.len() < 3 {
            return Err(ParseError::InvalidFormat("valley too small".into()));
        }

        let gap = |row: &[u8], which: &str| {
            row.iter()
                .position(|&b| b == b'.')
                .map(|c| c as isize - 1)
                .ok_or_else(|| ParseError::InvalidFormat(format!("no opening in the {which} wall")))
        };
        let width = top.len() - 2;
        let tiles: Vec<Vec<u8>> = rows[1..rows.len() - 1]
            .iter()
            .map(|row| row.get(1..=width).map(<[u8]>::to_vec))
            .collect::<Option<_>>()
            .ok_or_else(|| ParseError::InvalidFormat("ragged valley rows".into()))?;
        let height = tiles.len() as isize;

        Ok(Valley {
            entrance: (-1, gap(top, "top")?),
            exit: (height, gap(bottom, "bottom")?),
            tiles,
            height,
            width: width as isize,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .crossing(shared.entrance, shared.exit, 0)
            .map(|t| t.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let there = shared.crossing(shared.entrance, shared.exit, 0)?;
        let back = shared.crossing(shared.exit, shared.entrance, there)?;
        let again = shared.crossing(shared.entrance, shared.exit, back)?;
        Ok(again.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        #.######
        #>>.<^<#
        #.<..<<#
        #>v.><>#
        #<^v^^>#
        ######.#
    "};

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "18");
    }

    #[test]
    fn part2_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "54");
    }

    #[test]
    fn legs_of_the_round_trip() {
        let valley = Solver::parse(EXAMPLE).unwrap();
        let there = valley.crossing(valley.entrance, valley.exit, 0).unwrap();
        let back = valley.crossing(valley.exit, valley.entrance, there).unwrap();
        assert_eq!((there, back - there), (18, 23));
    }

    #[test]
    fn openings_are_found() {
        let valley = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(valley.entrance, (-1, 0));
        assert_eq!(valley.exit, (4, 5));
    }
}
