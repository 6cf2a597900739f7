use crate::utils::parsing::line_error;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 1, tags = ["2022", "parsing"])]
pub struct Solver;

impl AocParser for Solver {
    /// Calorie total per elf, largest first
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut totals = Vec::new();
        let mut current: Option<u64> = None;

        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                totals.extend(current.take());
                continue;
            }
            let calories: u64 = line.parse().map_err(|e| line_error(idx, e))?;
            *current.get_or_insert(0) += calories;
        }
        totals.extend(current);

        if totals.is_empty() {
            return Err(ParseError::MissingData("no calorie entries".into()));
        }
        totals.sort_unstable_by(|a, b| b.cmp(a));
        Ok(totals)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared[0].to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().take(3).sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        1000
        2000
        3000

        4000

        5000
        6000

        7000
        8000
        9000

        10000
    "};

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "24000");
    }

    #[test]
    fn part2_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "45000");
    }

    #[test]
    fn fewer_than_three_elves() {
        assert_eq!(solve::<Solver>("5\n\n7", 2), "12");
    }

    #[test]
    fn bad_line_is_reported() {
        assert!(matches!(
            Solver::parse("1\n\nabc"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 3)")
        ));
    }
}
