use crate::utils::parsing::line_error;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 7, tags = ["2022", "tree"])]
pub struct Solver;

const DISK_SIZE: u64 = 70_000_000;
const NEEDED_FREE: u64 = 30_000_000;
const SMALL_DIR_LIMIT: u64 = 100_000;

#[derive(Debug)]
pub struct DirSizes {
    /// Total size of every directory, root included
    sizes: Vec<u64>,
    root: u64,
}

/// Replays a terminal transcript, tracking the current path as a stack of
/// running directory totals
#[derive(Default)]
struct Walker {
    path: Vec<u64>,
    done: Vec<u64>,
}

impl Walker {
    fn leave(&mut self) -> bool {
        match self.path.pop() {
            Some(size) => {
                self.done.push(size);
                if let Some(parent) = self.path.last_mut() {
                    *parent += size;
                }
                true
            }
            None => false,
        }
    }

    fn to_root(&mut self) {
        while self.path.len() > 1 {
            self.leave();
        }
        if self.path.is_empty() {
            self.path.push(0);
        }
    }

    fn finish(mut self) -> DirSizes {
        while self.leave() {}
        // root is the bottom of the path, so it is folded last
        let root = self.done.last().copied().unwrap_or(0);
        DirSizes {
            sizes: self.done,
            root,
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = DirSizes;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut walker = Walker::default();

        for (idx, line) in input.lines().enumerate() {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (None, _, _) => {}
                (Some("$"), Some("cd"), Some("/")) => walker.to_root(),
                (Some("$"), Some("cd"), Some("..")) => {
                    if walker.path.len() <= 1 {
                        return Err(line_error(idx, "cannot leave the root directory"));
                    }
                    walker.leave();
                }
                (Some("$"), Some("cd"), Some(_)) => {
                    if walker.path.is_empty() {
                        walker.path.push(0);
                    }
                    walker.path.push(0);
                }
                (Some("$"), Some("ls"), None) | (Some("dir"), Some(_), None) => {}
                (Some(size), Some(_), None) => {
                    let size: u64 = size.parse().map_err(|e| line_error(idx, e))?;
                    match walker.path.last_mut() {
                        Some(current) => *current += size,
                        None => walker.path.push(size),
                    }
                }
                _ => return Err(line_error(idx, format!("unrecognised line {line:?}"))),
            }
        }

        Ok(walker.finish())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .sizes
            .iter()
            .filter(|&&s| s <= SMALL_DIR_LIMIT)
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let free = DISK_SIZE.saturating_sub(shared.root);
        let missing = NEEDED_FREE.saturating_sub(free);
        shared
            .sizes
            .iter()
            .filter(|&&s| s >= missing)
            .min()
            .map(|s| s.to_string())
            .ok_or_else(|| SolveError::SolveFailed("no directory frees enough space".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        $ cd /
        $ ls
        dir a
        14848514 b.txt
        8504156 c.dat
        dir d
        $ cd a
        $ ls
        dir e
        29116 f
        2557 g
        62596 h.lst
        $ cd e
        $ ls
        584 i
        $ cd ..
        $ cd ..
        $ cd d
        $ ls
        4060174 j
        8033020 d.log
        5626152 d.ext
        7214296 k
    "};

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "95437");
    }

    #[test]
    fn part2_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "24933642");
    }

    #[test]
    fn totals_every_directory() {
        let dirs = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(dirs.root, 48381165);
        let mut sizes = dirs.sizes.clone();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![584, 94853, 24933642, 48381165]);
    }
}
