use crate::utils::parsing::{line_error, parse_lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2022, day = 25, tags = ["2022", "numerals"])]
pub struct Solver;

/// Value of a SNAFU numeral, or `None` on an unknown digit or overflow
pub fn snafu_to_decimal(s: &str) -> Option<i64> {
    s.trim().chars().try_fold(0i64, |acc, c| {
        let digit = match c {
            '2' => 2,
            '1' => 1,
            '0' => 0,
            '-' => -1,
            '=' => -2,
            _ => return None,
        };
        acc.checked_mul(5)?.checked_add(digit)
    })
}

/// SNAFU numeral for `n`
pub fn decimal_to_snafu(mut n: i64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n != 0 {
        // balanced digits: remainders 3 and 4 become -2 and -1 with a carry
        let (digit, carry) = match n.rem_euclid(5) {
            0 => ('0', 0),
            1 => ('1', 0),
            2 => ('2', 0),
            3 => ('=', 1),
            _ => ('-', 1),
        };
        digits.push(digit);
        n = n.div_euclid(5) + carry;
    }
    digits.iter().rev().collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let numbers = parse_lines(input, |line| {
            snafu_to_decimal(line).ok_or_else(|| anyhow::anyhow!("not a SNAFU number: {line:?}"))
        })?;
        if numbers.is_empty() {
            return Err(line_error(0, "no fuel requirements"));
        }
        Ok(numbers)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared
            .iter()
            .try_fold(0i64, |acc, &n| acc.checked_add(n))
            .ok_or_else(|| SolveError::SolveFailed("fuel total overflows".into()))?;
        Ok(decimal_to_snafu(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use indoc::indoc;
    use proptest::prelude::*;

    const EXAMPLE: &str = indoc! {"
        1=-0-2
        12111
        2=0=
        21
        2=01
        111
        20012
        112
        1=-1=
        1-12
        12
        1=
        122
    "};

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "2=-1=0");
    }

    #[test]
    fn single_part_only() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert!(matches!(
            <Solver as aoc_solver::SolverExt>::solve_part_checked_range(&mut shared, 2),
            Err(SolveError::PartOutOfRange(2))
        ));
    }

    #[test]
    fn known_conversions() {
        for (snafu, n) in [("1=-0-2", 1747), ("12111", 906), ("2=", 8), ("1121-1110-1=0", 314159265), ("0", 0)] {
            assert_eq!(snafu_to_decimal(snafu), Some(n));
            assert_eq!(decimal_to_snafu(n), snafu);
        }
        assert_eq!(snafu_to_decimal("3"), None);
    }

    proptest! {
        #[test]
        fn snafu_roundtrip(n in -1_000_000_000_000i64..1_000_000_000_000) {
            prop_assert_eq!(snafu_to_decimal(&decimal_to_snafu(n)), Some(n));
        }
    }
}
