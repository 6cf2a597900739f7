use crate::utils::parsing::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 8, tags = ["2022", "grid"])]
pub struct Solver;

pub struct Forest {
    heights: Vec<Vec<u8>>,
}

const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Forest {
    fn rows(&self) -> usize {
        self.heights.len()
    }

    fn cols(&self) -> usize {
        self.heights.first().map_or(0, Vec::len)
    }

    /// Trees from (r, c) outward in direction `d`, excluding (r, c) itself
    fn line_of_sight(&self, r: usize, c: usize, d: (isize, isize)) -> impl Iterator<Item = u8> + '_ {
        (1..)
            .map(move |k| {
                let nr = r.checked_add_signed(d.0 * k)?;
                let nc = c.checked_add_signed(d.1 * k)?;
                self.heights.get(nr)?.get(nc).copied()
            })
            .take_while(Option::is_some)
            .flatten()
    }

    fn visible(&self, r: usize, c: usize) -> bool {
        let h = self.heights[r][c];
        DIRECTIONS
            .iter()
            .any(|&d| self.line_of_sight(r, c, d).all(|t| t < h))
    }

    fn scenic_score(&self, r: usize, c: usize) -> usize {
        let h = self.heights[r][c];
        DIRECTIONS
            .iter()
            .map(|&d| {
                let mut seen = 0;
                for t in self.line_of_sight(r, c, d) {
                    seen += 1;
                    if t >= h {
                        break;
                    }
                }
                seen
            })
            .product()
    }

    fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows()).flat_map(move |r| (0..self.cols()).map(move |c| (r, c)))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Forest;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let heights = parse_lines(input, |line| {
            line.trim()
                .bytes()
                .map(|b| match b {
                    b'0'..=b'9' => Ok(b - b'0'),
                    _ => Err(anyhow!("invalid tree height {:?}", b as char)),
                })
                .collect::<anyhow::Result<Vec<u8>>>()
        })?;

        let width = heights.first().map_or(0, Vec::len);
        if width == 0 || heights.iter().any(|row| row.len() != width) {
            return Err(ParseError::InvalidFormat("forest must be a non-empty rectangle".into()));
        }
        Ok(Forest { heights })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared.cells().filter(|&(r, c)| shared.visible(r, c)).count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared
            .cells()
            .map(|(r, c)| shared.scenic_score(r, c))
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        30373
        25512
        65332
        33549
        35390
    "};

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "21");
    }

    #[test]
    fn part2_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "8");
    }

    #[test]
    fn scenic_scores() {
        let forest = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(forest.scenic_score(1, 2), 4);
        assert_eq!(forest.scenic_score(3, 2), 8);
        assert_eq!(forest.scenic_score(0, 0), 0);
    }

    #[test]
    fn ragged_grid_rejected() {
        assert!(Solver::parse("123\n12\n").is_err());
    }
}
