use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 6, tags = ["2022", "sliding-window"])]
pub struct Solver;

/// Number of characters processed when the first `size` distinct ones end
pub fn marker_end(signal: &[u8], size: usize) -> Option<usize> {
    signal
        .windows(size)
        .position(|w| {
            w.iter()
                .fold(0u32, |seen, c| seen | 1 << (c - b'a'))
                .count_ones() as usize
                == size
        })
        .map(|start| start + size)
}

fn find_marker(signal: &[u8], size: usize) -> Result<String, SolveError> {
    marker_end(signal, size)
        .map(|end| end.to_string())
        .ok_or_else(|| SolveError::SolveFailed(format!("no marker of {size} distinct characters").into()))
}

impl AocParser for Solver {
    type SharedData<'a> = &'a [u8];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let signal = input.trim().as_bytes();
        if let Some(c) = signal.iter().find(|c| !c.is_ascii_lowercase()) {
            return Err(ParseError::InvalidFormat(format!(
                "unexpected character {:?}",
                *c as char
            )));
        }
        Ok(signal)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_marker(shared, 4)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_marker(shared, 14)
    }
}
