use crate::utils::parsing::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 3, tags = ["2022", "bitset"])]
pub struct Solver;

/// Rucksack contents as item-priority bitsets, one per compartment
#[derive(Debug, Clone, Copy)]
pub struct Rucksack {
    left: u64,
    right: u64,
}

fn priority(item: u8) -> anyhow::Result<u32> {
    match item {
        b'a'..=b'z' => Ok(u32::from(item - b'a') + 1),
        b'A'..=b'Z' => Ok(u32::from(item - b'A') + 27),
        _ => Err(anyhow!("invalid item {:?}", item as char)),
    }
}

fn item_set(items: &[u8]) -> anyhow::Result<u64> {
    items
        .iter()
        .try_fold(0u64, |set, &item| Ok(set | 1 << priority(item)?))
}

/// Priority of the single item present in `set`
fn single_priority(set: u64) -> Result<u32, SolveError> {
    if set.count_ones() == 1 {
        Ok(set.trailing_zeros())
    } else {
        Err(SolveError::SolveFailed(
            format!("expected exactly one shared item, found {}", set.count_ones()).into(),
        ))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Rucksack>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let bytes = line.trim().as_bytes();
            if bytes.len() % 2 != 0 {
                return Err(anyhow!("odd number of items ({})", bytes.len()));
            }
            let (left, right) = bytes.split_at(bytes.len() / 2);
            Ok(Rucksack {
                left: item_set(left)?,
                right: item_set(right)?,
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .map(|r| single_priority(r.left & r.right))
            .sum::<Result<u32, _>>()
            .map(|total| total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() % 3 != 0 {
            return Err(SolveError::SolveFailed(
                format!("{} rucksacks do not split into groups of three", shared.len()).into(),
            ));
        }
        shared
            .chunks_exact(3)
            .map(|group| {
                let badge = group
                    .iter()
                    .map(|r| r.left | r.right)
                    .fold(u64::MAX, |acc, set| acc & set);
                single_priority(badge)
            })
            .sum::<Result<u32, _>>()
            .map(|total| total.to_string())
    }
}
