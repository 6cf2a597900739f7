use crate::utils::parsing::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 9, tags = ["2022", "simulation"])]
pub struct Solver;

type Pos = (i32, i32);

#[derive(Debug, Clone, Copy)]
pub struct Motion {
    step: Pos,
    count: u32,
}

/// Number of distinct cells visited by the last of `knots` knots
fn tail_visits(motions: &[Motion], knots: usize) -> usize {
    let mut rope = vec![(0, 0); knots];
    let mut visited: HashSet<Pos> = HashSet::from([(0, 0)]);

    for m in motions {
        for _ in 0..m.count {
            rope[0].0 += m.step.0;
            rope[0].1 += m.step.1;
            for i in 1..knots {
                let (hx, hy) = rope[i - 1];
                let (tx, ty) = &mut rope[i];
                let (dx, dy) = (hx - *tx, hy - *ty);
                if dx.abs() <= 1 && dy.abs() <= 1 {
                    break;
                }
                *tx += dx.signum();
                *ty += dy.signum();
            }
            if let Some(&tail) = rope.last() {
                visited.insert(tail);
            }
        }
    }
    visited.len()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Motion>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (dir, count) = line
                .trim()
                .split_once(' ')
                .ok_or_else(|| anyhow!("expected `<dir> <count>`"))?;
            let step = match dir {
                "U" => (0, 1),
                "D" => (0, -1),
                "L" => (-1, 0),
                "R" => (1, 0),
                _ => return Err(anyhow!("unknown direction {dir:?}")),
            };
            Ok(Motion {
                step,
                count: count.parse()?,
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_visits(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_visits(shared, 10).to_string())
    }
}
