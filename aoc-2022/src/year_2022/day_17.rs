use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 17, tags = ["2022", "simulation", "cycle-detection"])]
pub struct Solver;

/// Rock rows bottom to top; bit 6 is the leftmost column, already shifted to
/// start two columns from the left wall
const ROCKS: [&[u8]; 5] = [
    &[0b0011110],
    &[0b0001000, 0b0011100, 0b0001000],
    &[0b0011100, 0b0000100, 0b0000100],
    &[0b0010000, 0b0010000, 0b0010000, 0b0010000],
    &[0b0011000, 0b0011000],
];

/// How far down the column profile reaches when keying a state
const PROFILE_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jet {
    Left,
    Right,
}

struct Chamber<'a> {
    jets: &'a [Jet],
    jet: usize,
    rows: Vec<u8>,
}

impl Chamber<'_> {
    fn fits(&self, rock: &[u8], y: usize) -> bool {
        rock.iter()
            .enumerate()
            .all(|(dy, &bits)| self.rows.get(y + dy).is_none_or(|&row| row & bits == 0))
    }

    fn drop_rock(&mut self, rock: &[u8]) {
        let mut shape = rock.to_vec();
        let mut y = self.rows.len() + 3;
        loop {
            let pushed: Option<Vec<u8>> = match self.jets[self.jet] {
                Jet::Left => shape
                    .iter()
                    .all(|&r| r & 0b1000000 == 0)
                    .then(|| shape.iter().map(|&r| r << 1).collect()),
                Jet::Right => shape
                    .iter()
                    .all(|&r| r & 1 == 0)
                    .then(|| shape.iter().map(|&r| r >> 1).collect()),
            };
            self.jet = (self.jet + 1) % self.jets.len();
            if let Some(pushed) = pushed.filter(|p| self.fits(p, y)) {
                shape = pushed;
            }
            if y == 0 || !self.fits(&shape, y - 1) {
                break;
            }
            y -= 1;
        }

        for (dy, bits) in shape.into_iter().enumerate() {
            match self.rows.get_mut(y + dy) {
                Some(row) => *row |= bits,
                None => self.rows.push(bits),
            }
        }
    }

    /// Depth of the topmost filled cell in each column, capped
    fn profile(&self) -> [u8; 7] {
        let mut depths = [PROFILE_DEPTH as u8; 7];
        for (col, depth) in depths.iter_mut().enumerate() {
            let bit = 1 << (6 - col);
            if let Some(d) = self
                .rows
                .iter()
                .rev()
                .take(PROFILE_DEPTH)
                .position(|row| row & bit != 0)
            {
                *depth = d as u8;
            }
        }
        depths
    }
}

/// Tower height after `count` rocks, skipping ahead once the state repeats
fn tower_height(jets: &[Jet], count: u64) -> u64 {
    let mut chamber = Chamber {
        jets,
        jet: 0,
        rows: Vec::new(),
    };
    let mut seen: HashMap<(usize, usize, [u8; 7]), (u64, u64)> = HashMap::new();
    let mut skipped = 0;
    let mut dropped = 0;

    while dropped < count {
        let rock = (dropped % ROCKS.len() as u64) as usize;
        chamber.drop_rock(ROCKS[rock]);
        dropped += 1;

        if skipped == 0 {
            let key = (rock, chamber.jet, chamber.profile());
            let height = chamber.rows.len() as u64;
            if let Some(&(prev_dropped, prev_height)) = seen.get(&key) {
                let period = dropped - prev_dropped;
                let cycles = (count - dropped) / period;
                skipped = cycles * (height - prev_height);
                dropped += cycles * period;
            } else {
                seen.insert(key, (dropped, height));
            }
        }
    }
    chamber.rows.len() as u64 + skipped
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Jet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let jets = input
            .trim()
            .bytes()
            .map(|b| match b {
                b'<' => Ok(Jet::Left),
                b'>' => Ok(Jet::Right),
                _ => Err(ParseError::InvalidFormat(format!("unexpected jet {:?}", b as char))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if jets.is_empty() {
            return Err(ParseError::MissingData("empty jet pattern".into()));
        }
        Ok(jets)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 2022).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 1_000_000_000_000).to_string())
    }
}
