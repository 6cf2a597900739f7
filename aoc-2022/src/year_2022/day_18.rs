use crate::utils::parsing::{ints_n, parse_lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 18, tags = ["2022", "grid", "flood-fill"])]
pub struct Solver;

type Cube = [i32; 3];

const FACES: [Cube; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];

fn neighbours(c: Cube) -> impl Iterator<Item = Cube> {
    FACES
        .into_iter()
        .map(move |d| [c[0] + d[0], c[1] + d[1], c[2] + d[2]])
}

impl AocParser for Solver {
    type SharedData<'a> = HashSet<Cube>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let cubes = parse_lines(input, ints_n::<i32, 3>)?;
        Ok(cubes.into_iter().collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let area = shared
            .iter()
            .flat_map(|&c| neighbours(c))
            .filter(|n| !shared.contains(n))
            .count();
        Ok(area.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.is_empty() {
            return Ok("0".to_string());
        }
        // steam fills a box one unit larger than the droplet on every side
        let mut lo = [i32::MAX; 3];
        let mut hi = [i32::MIN; 3];
        for c in shared.iter() {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(c[axis] - 1);
                hi[axis] = hi[axis].max(c[axis] + 1);
            }
        }
        let inside = |c: &Cube| (0..3).all(|axis| (lo[axis]..=hi[axis]).contains(&c[axis]));

        let mut steam = HashSet::from([lo]);
        let mut stack = vec![lo];
        let mut exterior = 0;
        while let Some(cur) = stack.pop() {
            for n in neighbours(cur) {
                if shared.contains(&n) {
                    exterior += 1;
                } else if inside(&n) && steam.insert(n) {
                    stack.push(n);
                }
            }
        }
        Ok(exterior.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        2,2,2
        1,2,2
        3,2,2
        2,1,2
        2,3,2
        2,2,1
        2,2,3
        2,2,4
        2,2,6
        1,2,5
        3,2,5
        2,1,5
        2,3,5
    "};

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "64");
    }

    #[test]
    fn part2_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "58");
    }

    #[test]
    fn two_adjacent_cubes() {
        assert_eq!(solve::<Solver>("1,1,1\n2,1,1\n", 1), "10");
        assert_eq!(solve::<Solver>("1,1,1\n2,1,1\n", 2), "10");
    }
}
