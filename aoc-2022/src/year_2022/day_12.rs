use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::VecDeque;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 12, tags = ["2022", "grid", "bfs"])]
pub struct Solver;

pub struct HeightMap {
    heights: Vec<u8>,
    width: usize,
    start: usize,
    end: usize,
    /// Steps from every cell to the end, filled on first use
    distances: Option<Vec<Option<u32>>>,
}

impl HeightMap {
    fn neighbours(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        let (r, c) = (i / self.width, i % self.width);
        let rows = self.heights.len() / self.width;
        [
            (r > 0).then(|| i - self.width),
            (r + 1 < rows).then(|| i + self.width),
            (c > 0).then(|| i - 1),
            (c + 1 < self.width).then(|| i + 1),
        ]
        .into_iter()
        .flatten()
    }

    /// Breadth-first search backwards from the end: a step `a -> b` is
    /// allowed when `b` is at most one higher than `a`
    fn distances_to_end(&mut self) -> &[Option<u32>] {
        if self.distances.is_none() {
            let mut dist = vec![None; self.heights.len()];
            let mut queue = VecDeque::from([self.end]);
            dist[self.end] = Some(0);

            while let Some(cur) = queue.pop_front() {
                let d = dist[cur].unwrap_or(0);
                for prev in self.neighbours(cur) {
                    if dist[prev].is_none() && self.heights[cur] <= self.heights[prev] + 1 {
                        dist[prev] = Some(d + 1);
                        queue.push_back(prev);
                    }
                }
            }
            self.distances = Some(dist);
        }
        self.distances.as_deref().unwrap_or_default()
    }
}

fn unreachable_error() -> SolveError {
    SolveError::SolveFailed("no path to the best signal".into())
}

impl AocParser for Solver {
    type SharedData<'a> = HeightMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&[u8]> = input
            .lines()
            .map(|l| l.trim().as_bytes())
            .filter(|l| !l.is_empty())
            .collect();
        let width = lines.first().map_or(0, |l| l.len());
        if width == 0 || lines.iter().any(|l| l.len() != width) {
            return Err(ParseError::InvalidFormat("height map must be a non-empty rectangle".into()));
        }

        let mut heights = Vec::with_capacity(width * lines.len());
        let (mut start, mut end) = (None, None);
        for (i, &b) in lines.iter().flat_map(|l| l.iter()).enumerate() {
            let h = match b {
                b'S' => {
                    start = Some(i);
                    b'a'
                }
                b'E' => {
                    end = Some(i);
                    b'z'
                }
                b'a'..=b'z' => b,
                _ => {
                    return Err(ParseError::InvalidFormat(format!(
                        "unexpected height {:?}",
                        b as char
                    )));
                }
            };
            heights.push(h);
        }

        Ok(HeightMap {
            heights,
            width,
            start: start.ok_or_else(|| ParseError::MissingData("no start `S`".into()))?,
            end: end.ok_or_else(|| ParseError::MissingData("no end `E`".into()))?,
            distances: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = shared.start;
        shared.distances_to_end()[start]
            .map(|d| d.to_string())
            .ok_or_else(unreachable_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let lowest: Vec<usize> = (0..shared.heights.len())
            .filter(|&i| shared.heights[i] == b'a')
            .collect();
        let distances = shared.distances_to_end();
        lowest
            .into_iter()
            .filter_map(|i| distances[i])
            .min()
            .map(|d| d.to_string())
            .ok_or_else(unreachable_error)
    }
}
