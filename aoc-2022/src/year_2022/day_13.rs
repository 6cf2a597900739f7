use crate::utils::parsing::line_error;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 13, tags = ["2022", "parsing", "recursion"])]
pub struct Solver;

/// Equality follows the packet order, so `1` equals `[1]`
#[derive(Debug, Clone)]
pub enum Packet {
    Int(u32),
    List(Vec<Packet>),
}

impl Ord for Packet {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Packet::Int(a), Packet::Int(b)) => a.cmp(b),
            (Packet::List(a), Packet::List(b)) => a.cmp(b),
            (Packet::Int(a), Packet::List(b)) => [Packet::Int(*a)][..].cmp(&b[..]),
            (Packet::List(a), Packet::Int(b)) => a[..].cmp(&[Packet::Int(*b)][..]),
        }
    }
}

impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Packet {}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Recursive-descent reader over packet bytes
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, b: u8) -> anyhow::Result<()> {
        match self.peek() {
            Some(found) if found == b => {
                self.pos += 1;
                Ok(())
            }
            found => Err(anyhow!(
                "expected {:?} at column {}, found {:?}",
                b as char,
                self.pos + 1,
                found.map(char::from)
            )),
        }
    }

    fn packet(&mut self) -> anyhow::Result<Packet> {
        match self.peek() {
            Some(b'[') => {
                self.pos += 1;
                let mut items = Vec::new();
                if self.peek() == Some(b']') {
                    self.pos += 1;
                    return Ok(Packet::List(items));
                }
                loop {
                    items.push(self.packet()?);
                    match self.peek() {
                        Some(b',') => self.pos += 1,
                        _ => break,
                    }
                }
                self.expect(b']')?;
                Ok(Packet::List(items))
            }
            Some(b'0'..=b'9') => {
                let start = self.pos;
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
                let digits = std::str::from_utf8(&self.bytes[start..self.pos])?;
                Ok(Packet::Int(digits.parse()?))
            }
            found => Err(anyhow!(
                "unexpected {:?} at column {}",
                found.map(char::from),
                self.pos + 1
            )),
        }
    }
}

impl FromStr for Packet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut reader = Reader {
            bytes: s.trim().as_bytes(),
            pos: 0,
        };
        let packet = reader.packet()?;
        if reader.pos != reader.bytes.len() {
            return Err(anyhow!("trailing data at column {}", reader.pos + 1));
        }
        Ok(packet)
    }
}

fn divider(n: u32) -> Packet {
    Packet::List(vec![Packet::List(vec![Packet::Int(n)])])
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Packet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let packets: Vec<Packet> = input
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(idx, l)| l.parse().map_err(|e| line_error(idx, e)))
            .collect::<Result<_, _>>()?;
        if packets.len() % 2 != 0 {
            return Err(ParseError::MissingData("packets must come in pairs".into()));
        }
        Ok(packets)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: usize = shared
            .chunks_exact(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] < pair[1])
            .map(|(i, _)| i + 1)
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // positions once sorted, without sorting: [[2]] < [[6]]
        let (two, six) = (divider(2), divider(6));
        let first = 1 + shared.iter().filter(|p| **p < two).count();
        let second = 2 + shared.iter().filter(|p| **p < six).count();
        Ok((first * second).to_string())
    }
}
