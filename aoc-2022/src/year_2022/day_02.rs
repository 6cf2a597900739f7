use crate::utils::parsing::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 2, tags = ["2022", "simulation"])]
pub struct Solver;

/// One strategy guide line, both columns as 0 (rock), 1 (paper) or 2 (scissors)
#[derive(Debug, Clone, Copy)]
pub struct Round {
    opponent: u8,
    column: u8,
}

/// Score of a single round: shape value plus 0/3/6 for loss/draw/win
fn score(opponent: u8, own: u8) -> u32 {
    let outcome = (own + 4 - opponent) % 3;
    u32::from(own) + 1 + u32::from(outcome) * 3
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Round>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| match line.trim().as_bytes() {
            [a @ b'A'..=b'C', b' ', x @ b'X'..=b'Z'] => Ok(Round {
                opponent: a - b'A',
                column: x - b'X',
            }),
            _ => Err(anyhow!("expected `<A-C> <X-Z>`, got {:?}", line)),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared.iter().map(|r| score(r.opponent, r.column)).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // X loses, Y draws, Z wins
        let total: u32 = shared
            .iter()
            .map(|r| score(r.opponent, (r.opponent + r.column + 2) % 3))
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "A Y\nB X\nC Z\n";

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "15");
    }

    #[test]
    fn part2_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "12");
    }

    #[test]
    fn scores_every_outcome() {
        assert_eq!(score(0, 0), 4);
        assert_eq!(score(0, 1), 8);
        assert_eq!(score(0, 2), 3);
        assert_eq!(score(2, 0), 7);
    }

    #[test]
    fn rejects_unknown_moves() {
        assert!(Solver::parse("A W").is_err());
    }
}
