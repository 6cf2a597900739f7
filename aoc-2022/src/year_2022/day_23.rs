use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 23, tags = ["2022", "grid", "simulation"])]
pub struct Solver;

type Elf = (i32, i32);

const AROUND: [Elf; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Proposal order: north, south, west, east. Each entry is the move and the
/// three cells that must be empty for it.
const PROPOSALS: [(Elf, [Elf; 3]); 4] = [
    ((-1, 0), [(-1, -1), (-1, 0), (-1, 1)]),
    ((1, 0), [(1, -1), (1, 0), (1, 1)]),
    ((0, -1), [(-1, -1), (0, -1), (1, -1)]),
    ((0, 1), [(-1, 1), (0, 1), (1, 1)]),
];

fn offset((r, c): Elf, (dr, dc): Elf) -> Elf {
    (r + dr, c + dc)
}

/// Run one round starting with proposal `first`; returns whether any elf moved
fn round(elves: &mut HashSet<Elf>, first: usize) -> bool {
    let mut proposed: HashMap<Elf, Vec<Elf>> = HashMap::new();
    for &elf in elves.iter() {
        if AROUND.iter().all(|&d| !elves.contains(&offset(elf, d))) {
            continue;
        }
        let choice = (0..4)
            .map(|k| PROPOSALS[(first + k) % 4])
            .find(|(_, checks)| checks.iter().all(|&d| !elves.contains(&offset(elf, d))));
        if let Some((step, _)) = choice {
            proposed.entry(offset(elf, step)).or_default().push(elf);
        }
    }

    let mut moved = false;
    for (target, from) in proposed {
        if let [elf] = from[..] {
            elves.remove(&elf);
            elves.insert(target);
            moved = true;
        }
    }
    moved
}

fn empty_ground(elves: &HashSet<Elf>) -> usize {
    let (mut lo, mut hi) = ((i32::MAX, i32::MAX), (i32::MIN, i32::MIN));
    for &(r, c) in elves {
        lo = (lo.0.min(r), lo.1.min(c));
        hi = (hi.0.max(r), hi.1.max(c));
    }
    if elves.is_empty() {
        return 0;
    }
    let area = (hi.0 - lo.0 + 1) as usize * (hi.1 - lo.1 + 1) as usize;
    area - elves.len()
}

impl AocParser for Solver {
    type SharedData<'a> = HashSet<Elf>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut elves = HashSet::new();
        for (r, line) in input.lines().enumerate() {
            for (c, b) in line.trim_end().bytes().enumerate() {
                match b {
                    b'#' => {
                        elves.insert((r as i32, c as i32));
                    }
                    b'.' => {}
                    _ => {
                        return Err(ParseError::InvalidFormat(format!(
                            "(line {}) unexpected tile {:?}",
                            r + 1,
                            b as char
                        )));
                    }
                }
            }
        }
        Ok(elves)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut elves = shared.clone();
        for r in 0..10 {
            round(&mut elves, r % 4);
        }
        Ok(empty_ground(&elves).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut elves = shared.clone();
        let mut r = 0;
        while round(&mut elves, r % 4) {
            r += 1;
        }
        Ok((r + 1).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        ....#..
        ..###.#
        #...#.#
        .#...##
        #.###..
        ##.#.##
        .#..#..
    "};

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "110");
    }

    #[test]
    fn part2_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "20");
    }

    #[test]
    fn small_example_settles() {
        let mut elves = Solver::parse(".....\n..##.\n..#..\n.....\n..##.\n.....\n").unwrap();
        for r in 0..3 {
            round(&mut elves, r % 4);
        }
        let expected: HashSet<Elf> = [(0, 2), (1, 4), (2, 0), (3, 4), (5, 2)].into();
        assert_eq!(elves, expected);
        assert!(!round(&mut elves, 3));
    }
}
