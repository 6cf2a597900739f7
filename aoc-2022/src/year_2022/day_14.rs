use crate::utils::parsing::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 14, tags = ["2022", "simulation", "grid"])]
pub struct Solver;

type Point = (i32, i32);

const SOURCE: Point = (500, 0);

#[derive(Debug, Clone)]
pub struct Cave {
    rock: HashSet<Point>,
    max_y: i32,
}

impl Cave {
    /// Drop sand until it either falls past the lowest rock or, with a floor
    /// two below that rock, the source itself is covered
    fn fill(&self, with_floor: bool) -> usize {
        let mut blocked = self.rock.clone();
        let floor = self.max_y + 2;
        let mut resting = 0;
        // path of the previous grain; the next one follows it until it diverges
        let mut path = vec![SOURCE];

        while let Some(&(mut x, mut y)) = path.last() {
            if blocked.contains(&SOURCE) {
                break;
            }
            loop {
                if !with_floor && y > self.max_y {
                    return resting;
                }
                let next = [(x, y + 1), (x - 1, y + 1), (x + 1, y + 1)]
                    .into_iter()
                    .find(|p| !blocked.contains(p) && !(with_floor && p.1 >= floor));
                match next {
                    Some(p) => {
                        path.push(p);
                        (x, y) = p;
                    }
                    None => {
                        blocked.insert((x, y));
                        resting += 1;
                        path.pop();
                        break;
                    }
                }
            }
        }
        resting
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Cave;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let paths = parse_lines(input, |line| {
            line.split("->")
                .map(|point| {
                    let (x, y) = point
                        .trim()
                        .split_once(',')
                        .ok_or_else(|| anyhow!("expected `x,y`, got {point:?}"))?;
                    Ok((x.parse::<i32>()?, y.parse::<i32>()?))
                })
                .collect::<anyhow::Result<Vec<Point>>>()
        })?;

        let mut rock = HashSet::new();
        for path in &paths {
            for w in path.windows(2) {
                let ((x1, y1), (x2, y2)) = (w[0], w[1]);
                if x1 != x2 && y1 != y2 {
                    return Err(ParseError::InvalidFormat(format!(
                        "diagonal rock segment {x1},{y1} -> {x2},{y2}"
                    )));
                }
                for x in x1.min(x2)..=x1.max(x2) {
                    for y in y1.min(y2)..=y1.max(y2) {
                        rock.insert((x, y));
                    }
                }
            }
            if let [single] = path[..] {
                rock.insert(single);
            }
        }

        let max_y = rock
            .iter()
            .map(|p| p.1)
            .max()
            .ok_or_else(|| ParseError::MissingData("no rock paths".into()))?;
        Ok(Cave { rock, max_y })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.fill(false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.fill(true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        498,4 -> 498,6 -> 496,6
        503,4 -> 502,4 -> 502,9 -> 494,9
    "};

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "24");
    }

    #[test]
    fn part2_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "93");
    }
}
