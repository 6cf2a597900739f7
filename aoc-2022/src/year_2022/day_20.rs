use crate::utils::parsing::parse_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 20, tags = ["2022", "simulation"])]
pub struct Solver;

const DECRYPTION_KEY: i64 = 811_589_153;

/// Mix `numbers` `rounds` times and sum the values 1000, 2000 and 3000
/// places after the zero
fn grove_coordinates(numbers: &[i64], rounds: usize) -> Result<i64, SolveError> {
    let len = numbers.len();
    // positions hold indices into `numbers`
    let mut order: Vec<usize> = (0..len).collect();

    if len > 1 {
        let cycle = (len - 1) as i64;
        for _ in 0..rounds {
            for (i, &n) in numbers.iter().enumerate() {
                let from = order.iter().position(|&o| o == i).unwrap_or(0);
                order.remove(from);
                let to = (from as i64 + n).rem_euclid(cycle) as usize;
                order.insert(to, i);
            }
        }
    }

    let zero = numbers
        .iter()
        .position(|&n| n == 0)
        .and_then(|z| order.iter().position(|&o| o == z))
        .ok_or_else(|| SolveError::SolveFailed("no zero in the file".into()))?;
    Ok([1000, 2000, 3000]
        .iter()
        .map(|k| numbers[order[(zero + k) % len]])
        .sum())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| Ok(line.trim().parse::<i64>()?))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        grove_coordinates(shared, 1).map(|v| v.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let decrypted: Vec<i64> = shared.iter().map(|n| n * DECRYPTION_KEY).collect();
        grove_coordinates(&decrypted, 10).map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "1\n2\n-3\n3\n-2\n0\n4\n";

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "3");
    }

    #[test]
    fn part2_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "1623178306");
    }

    #[test]
    fn missing_zero_fails() {
        assert!(grove_coordinates(&[1, 2, 3], 1).is_err());
    }
}
