use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 22, tags = ["2022", "grid", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward(u32),
    Left,
    Right,
}

/// Facing order used by the password: right, down, left, up
const DELTAS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pose {
    row: usize,
    col: usize,
    facing: usize,
}

#[derive(Debug)]
pub struct Notes {
    /// Board rows padded with spaces to a common width
    grid: Vec<Vec<u8>>,
    path: Vec<Step>,
}

impl Notes {
    fn tile(&self, row: isize, col: isize) -> u8 {
        if row < 0 || col < 0 {
            return b' ';
        }
        self.grid
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or(b' ')
    }

    /// Neighbouring pose in the facing direction, if it is on the board
    fn ahead(&self, pose: Pose) -> Option<Pose> {
        let (dr, dc) = DELTAS[pose.facing];
        let (row, col) = (pose.row as isize + dr, pose.col as isize + dc);
        (self.tile(row, col) != b' ').then_some(Pose {
            row: row as usize,
            col: col as usize,
            facing: pose.facing,
        })
    }

    /// Flat wrapping: come back in on the far side of the same row or column
    fn flat_wrap(&self, pose: Pose) -> Option<Pose> {
        let (dr, dc) = DELTAS[pose.facing];
        let (mut row, mut col) = (pose.row as isize, pose.col as isize);
        while self.tile(row - dr, col - dc) != b' ' {
            row -= dr;
            col -= dc;
        }
        Some(Pose {
            row: row as usize,
            col: col as usize,
            facing: pose.facing,
        })
    }

    /// Follow the path and return the final password
    fn walk(&self, wrap: impl Fn(Pose) -> Option<Pose>) -> Result<usize, SolveError> {
        let col = self
            .grid
            .first()
            .and_then(|row| row.iter().position(|&b| b == b'.'))
            .ok_or_else(|| SolveError::SolveFailed("no open tile on the top row".into()))?;
        let mut pose = Pose {
            row: 0,
            col,
            facing: 0,
        };

        for step in &self.path {
            match *step {
                Step::Left => pose.facing = (pose.facing + 3) % 4,
                Step::Right => pose.facing = (pose.facing + 1) % 4,
                Step::Forward(n) => {
                    for _ in 0..n {
                        let next = self
                            .ahead(pose)
                            .or_else(|| wrap(pose))
                            .ok_or_else(|| SolveError::SolveFailed("walked off the board".into()))?;
                        if self.grid[next.row][next.col] == b'#' {
                            break;
                        }
                        pose = next;
                    }
                }
            }
        }
        Ok(1000 * (pose.row + 1) + 4 * (pose.col + 1) + pose.facing)
    }
}

type V3 = [i32; 3];

fn neg(v: V3) -> V3 {
    [-v[0], -v[1], -v[2]]
}

fn dot(a: V3, b: V3) -> i32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn combine(terms: &[(V3, i32)]) -> V3 {
    let mut out = [0; 3];
    for (v, k) in terms {
        for axis in 0..3 {
            out[axis] += v[axis] * k;
        }
    }
    out
}

/// One face of the folded cube: its top-left board tile and the directions
/// its outward normal, board-right and board-down point in space
#[derive(Debug, Clone, Copy)]
struct Face {
    row: usize,
    col: usize,
    normal: V3,
    right: V3,
    down: V3,
}

/// The board folded into a cube centred on the origin. Tile centres sit at
/// doubled coordinates so every one of them is an integer point.
#[derive(Debug)]
pub struct Cube {
    size: usize,
    faces: Vec<Face>,
    by_block: HashMap<(usize, usize), usize>,
}

impl Cube {
    pub fn fold(notes: &Notes) -> Result<Self, SolveError> {
        let not_cube = |why: &str| SolveError::SolveFailed(format!("board is not a cube net: {why}").into());

        let tiles = notes.grid.iter().flatten().filter(|&&b| b != b' ').count();
        let size = (tiles / 6).isqrt();
        if size == 0 || size * size * 6 != tiles {
            return Err(not_cube("tile count is not six squares"));
        }
        let rows = notes.grid.len();
        let width = notes.grid.first().map_or(0, Vec::len);
        let is_face = |br: usize, bc: usize| notes.tile((br * size) as isize, (bc * size) as isize) != b' ';

        let first = (0..rows.div_ceil(size))
            .flat_map(|br| (0..width.div_ceil(size)).map(move |bc| (br, bc)))
            .find(|&(br, bc)| is_face(br, bc))
            .ok_or_else(|| not_cube("empty board"))?;

        let mut faces = vec![Face {
            row: first.0 * size,
            col: first.1 * size,
            normal: [0, 0, 1],
            right: [1, 0, 0],
            down: [0, 1, 0],
        }];
        let mut by_block = HashMap::from([(first, 0)]);
        let mut queue = VecDeque::from([first]);

        while let Some((br, bc)) = queue.pop_front() {
            let f = faces[by_block[&(br, bc)]];
            for (facing, (dr, dc)) in DELTAS.iter().enumerate() {
                let (Some(nbr), Some(nbc)) = (br.checked_add_signed(*dr), bc.checked_add_signed(*dc)) else {
                    continue;
                };
                if by_block.contains_key(&(nbr, nbc)) || !is_face(nbr, nbc) {
                    continue;
                }
                // roll the cube over the shared edge
                let (normal, right, down) = match facing {
                    0 => (f.right, neg(f.normal), f.down),
                    1 => (f.down, f.right, neg(f.normal)),
                    2 => (neg(f.right), f.normal, f.down),
                    _ => (neg(f.down), f.right, f.normal),
                };
                by_block.insert((nbr, nbc), faces.len());
                faces.push(Face {
                    row: nbr * size,
                    col: nbc * size,
                    normal,
                    right,
                    down,
                });
                queue.push_back((nbr, nbc));
            }
        }

        if faces.len() != 6 {
            return Err(not_cube("faces are not all connected"));
        }
        for (i, a) in faces.iter().enumerate() {
            if faces[i + 1..].iter().any(|b| b.normal == a.normal) {
                return Err(not_cube("two faces overlap when folded"));
            }
        }

        Ok(Self {
            size,
            faces,
            by_block,
        })
    }

    /// Step over a cube edge that has no neighbour on the board
    fn wrap(&self, pose: Pose) -> Option<Pose> {
        let s = self.size as i32;
        let from = self.faces[*self.by_block.get(&(pose.row / self.size, pose.col / self.size))?];
        let i = (pose.row - from.row) as i32;
        let j = (pose.col - from.col) as i32;

        let heading = [from.right, from.down, neg(from.right), neg(from.down)][pose.facing];
        // tile centre, then the same tile rolled over the edge onto the face
        // whose normal is the heading
        let p = combine(&[
            (from.normal, s - 1),
            (from.right, 2 * j - (s - 1)),
            (from.down, 2 * i - (s - 1)),
            (heading, 1),
        ]);
        let to = self.faces.iter().find(|f| f.normal == heading)?;

        let col = (dot(p, to.right) + s - 1) / 2;
        let row = (dot(p, to.down) + s - 1) / 2;
        let inward = neg(from.normal);
        let facing = [to.right, to.down, neg(to.right), neg(to.down)]
            .iter()
            .position(|&d| d == inward)?;

        Some(Pose {
            row: to.row + usize::try_from(row).ok()?,
            col: to.col + usize::try_from(col).ok()?,
            facing,
        })
    }
}

fn parse_path(path: &str) -> Result<Vec<Step>, ParseError> {
    let mut steps = Vec::new();
    let mut number: Option<u32> = None;
    for c in path.trim().chars() {
        match c {
            '0'..='9' => {
                let digit = c.to_digit(10).unwrap_or(0);
                number = Some(number.unwrap_or(0) * 10 + digit);
            }
            'L' | 'R' => {
                steps.extend(number.take().map(Step::Forward));
                steps.push(if c == 'L' { Step::Left } else { Step::Right });
            }
            _ => return Err(ParseError::InvalidFormat(format!("unexpected path character {c:?}"))),
        }
    }
    steps.extend(number.map(Step::Forward));
    Ok(steps)
}

impl AocParser for Solver {
    type SharedData<'a> = Notes;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (board, path) = input
            .split_once("\n\n")
            .ok_or_else(|| ParseError::MissingData("no blank line before the path".into()))?;

        let width = board.lines().map(str::len).max().unwrap_or(0);
        let grid: Vec<Vec<u8>> = board
            .lines()
            .map(|line| {
                let mut row = line.as_bytes().to_vec();
                row.resize(width, b' ');
                row
            })
            .collect();
        if let Some(b) = grid.iter().flatten().find(|b| !matches!(b, b' ' | b'.' | b'#')) {
            return Err(ParseError::InvalidFormat(format!("unexpected board tile {:?}", *b as char)));
        }

        Ok(Notes {
            grid,
            path: parse_path(path)?,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .walk(|pose| shared.flat_wrap(pose))
            .map(|p| p.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cube = Cube::fold(shared)?;
        shared.walk(|pose| cube.wrap(pose)).map(|p| p.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
                ...#
                .#..
                #...
                ....
        ...#.......#
        ........#...
        ..#....#....
        ..........#.
                ...#....
                .....#..
                .#......
                ......#.

        10R5L5R10L4R5L5
    "};

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "6032");
    }

    #[test]
    fn part2_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "5031");
    }

    #[test]
    fn path_tokens() {
        assert_eq!(
            parse_path("10R5L").unwrap(),
            vec![Step::Forward(10), Step::Right, Step::Forward(5), Step::Left]
        );
    }

    /// Build an open board from a net drawn with one character per face
    fn open_net(layout: &[&str], size: usize) -> Notes {
        let rows: Vec<String> = layout
            .iter()
            .flat_map(|line| {
                let row: String = line
                    .chars()
                    .map(|c| if c == '#' { ".".repeat(size) } else { " ".repeat(size) })
                    .collect();
                std::iter::repeat_n(row, size)
            })
            .collect();
        Solver::parse(&format!("{}\n\n1", rows.join("\n"))).unwrap()
    }

    fn assert_edges_reverse(notes: &Notes) {
        let cube = Cube::fold(notes).unwrap();
        for (row, line) in notes.grid.iter().enumerate() {
            for (col, &tile) in line.iter().enumerate() {
                if tile == b' ' {
                    continue;
                }
                for facing in 0..4 {
                    let pose = Pose { row, col, facing };
                    if notes.ahead(pose).is_some() {
                        continue;
                    }
                    let there = cube.wrap(pose).unwrap();
                    assert_ne!(notes.grid[there.row][there.col], b' ');
                    let back = cube
                        .wrap(Pose {
                            facing: (there.facing + 2) % 4,
                            ..there
                        })
                        .unwrap();
                    assert_eq!(
                        Pose {
                            facing: (back.facing + 2) % 4,
                            ..back
                        },
                        pose
                    );
                }
            }
        }
    }

    #[test]
    fn wrapping_is_reversible_on_other_nets() {
        assert_edges_reverse(&open_net(&[" ##", " # ", "## ", "#  "], 4));
        assert_edges_reverse(&open_net(&["  # ", "### ", "  ##"], 3));
        assert_edges_reverse(&Solver::parse(EXAMPLE).unwrap());
    }

    #[test]
    fn non_cube_board_fails_to_fold() {
        let notes = open_net(&["####", "#   ", "#   "], 2);
        assert!(Cube::fold(&notes).is_err());
    }
}
