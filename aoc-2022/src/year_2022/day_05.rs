use crate::utils::parsing::{ints_n, line_error};
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 5, tags = ["2022", "simulation", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct Move {
    count: usize,
    from: usize,
    to: usize,
}

#[derive(Debug, Clone)]
pub struct Cargo {
    /// Stacks bottom to top
    stacks: Vec<Vec<u8>>,
    moves: Vec<Move>,
}

impl Cargo {
    fn rearrange(&self, keep_order: bool) -> Result<String, SolveError> {
        let mut stacks = self.stacks.clone();
        for m in &self.moves {
            let from = &mut stacks[m.from];
            let at = from.len().checked_sub(m.count).ok_or_else(|| {
                SolveError::SolveFailed(
                    format!("cannot move {} crates from stack {}", m.count, m.from + 1).into(),
                )
            })?;
            let mut lifted = from.split_off(at);
            if !keep_order {
                lifted.reverse();
            }
            stacks[m.to].extend(lifted);
        }
        Ok(stacks
            .iter()
            .filter_map(|s| s.last())
            .map(|&c| c as char)
            .collect())
    }
}

/// Read the crate drawing; each stack's crates sit above its label
fn parse_drawing(lines: &[&str]) -> anyhow::Result<Vec<Vec<u8>>> {
    let (labels, rows) = lines
        .split_last()
        .ok_or_else(|| anyhow!("missing stack drawing"))?;
    let columns: Vec<usize> = labels
        .bytes()
        .enumerate()
        .filter(|&(i, b)| b.is_ascii_digit() && (i == 0 || labels.as_bytes()[i - 1] == b' '))
        .map(|(i, _)| i)
        .collect();
    if columns.is_empty() {
        return Err(anyhow!("missing stack numbers"));
    }

    let mut stacks = vec![Vec::new(); columns.len()];
    for row in rows.iter().rev() {
        for (&col, stack) in columns.iter().zip(stacks.iter_mut()) {
            match row.as_bytes().get(col) {
                Some(c) if c.is_ascii_uppercase() => stack.push(*c),
                Some(b' ') | None => {}
                Some(c) => return Err(anyhow!("unexpected crate {:?}", *c as char)),
            }
        }
    }
    Ok(stacks)
}

impl AocParser for Solver {
    type SharedData<'a> = Cargo;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = input.lines().collect();
        let split = lines
            .iter()
            .position(|l| l.trim().is_empty())
            .ok_or_else(|| ParseError::MissingData("no blank line after drawing".into()))?;

        let stacks = parse_drawing(&lines[..split])
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        let moves = lines
            .iter()
            .enumerate()
            .skip(split + 1)
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(idx, line)| {
                let [count, from, to] = ints_n::<usize, 3>(line).map_err(|e| line_error(idx, e))?;
                if from == 0 || to == 0 || from > stacks.len() || to > stacks.len() {
                    return Err(line_error(idx, "stack out of range"));
                }
                Ok(Move {
                    count,
                    from: from - 1,
                    to: to - 1,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Cargo { stacks, moves })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.rearrange(false)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.rearrange(true)
    }
}
