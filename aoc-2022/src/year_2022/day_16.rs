use crate::utils::parsing::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 16, tags = ["2022", "graph", "bitset", "dfs"])]
pub struct Solver;

const START: &str = "AA";
/// Upper bound on valves with positive flow, keeps the per-subset table small
const MAX_USEFUL_VALVES: usize = 20;

struct Valve<'a> {
    name: &'a str,
    rate: u32,
    tunnels: Vec<&'a str>,
}

/// Valves with positive flow, compressed to a dense distance matrix
#[derive(Debug)]
pub struct Network {
    rates: Vec<u32>,
    /// Minutes to walk from valve `i` to valve `j`
    dist: Vec<Vec<u32>>,
    /// Minutes to walk from the start to each valve
    from_start: Vec<u32>,
}

impl Network {
    /// Best pressure release for every set of opened valves within `minutes`
    fn best_per_subset(&self, minutes: u32) -> Vec<u32> {
        let mut best = vec![0; 1 << self.rates.len()];
        for (j, &d) in self.from_start.iter().enumerate() {
            if d < minutes {
                let left = minutes - d - 1;
                self.explore(j, left, 1 << j, self.rates[j] * left, &mut best);
            }
        }
        best
    }

    fn explore(&self, at: usize, left: u32, opened: usize, released: u32, best: &mut [u32]) {
        best[opened] = best[opened].max(released);
        for (j, &d) in self.dist[at].iter().enumerate() {
            if opened & (1 << j) != 0 || d.saturating_add(1) >= left {
                continue;
            }
            let remaining = left - d - 1;
            self.explore(j, remaining, opened | 1 << j, released + self.rates[j] * remaining, best);
        }
    }
}

fn parse_valve(line: &str) -> anyhow::Result<Valve<'_>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words[..] {
        ["Valve", name, "has", "flow", rate, _, _, "to", _, ref tunnels @ ..] => {
            let rate = rate
                .strip_prefix("rate=")
                .and_then(|r| r.strip_suffix(';'))
                .ok_or_else(|| anyhow!("malformed flow rate {rate:?}"))?
                .parse()?;
            Ok(Valve {
                name,
                rate,
                tunnels: tunnels.iter().map(|t| t.trim_end_matches(',')).collect(),
            })
        }
        _ => Err(anyhow!("unrecognised valve description")),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Network;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let valves = parse_lines(input, parse_valve)?;
        let index: HashMap<&str, usize> = valves.iter().enumerate().map(|(i, v)| (v.name, i)).collect();
        let start = *index
            .get(START)
            .ok_or_else(|| ParseError::MissingData(format!("no valve {START}")))?;

        let adjacency = valves
            .iter()
            .map(|v| {
                v.tunnels
                    .iter()
                    .map(|t| {
                        index
                            .get(t)
                            .copied()
                            .ok_or_else(|| ParseError::InvalidFormat(format!("unknown valve {t}")))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let useful: Vec<usize> = (0..valves.len()).filter(|&i| valves[i].rate > 0).collect();
        if useful.len() > MAX_USEFUL_VALVES {
            return Err(ParseError::InvalidFormat(format!(
                "{} valves with flow, at most {MAX_USEFUL_VALVES} supported",
                useful.len()
            )));
        }

        let bfs = |from: usize| {
            let mut dist = vec![u32::MAX; valves.len()];
            dist[from] = 0;
            let mut queue = VecDeque::from([from]);
            while let Some(cur) = queue.pop_front() {
                for &next in &adjacency[cur] {
                    if dist[next] == u32::MAX {
                        dist[next] = dist[cur] + 1;
                        queue.push_back(next);
                    }
                }
            }
            useful.iter().map(|&j| dist[j]).collect::<Vec<_>>()
        };

        Ok(Network {
            rates: useful.iter().map(|&i| valves[i].rate).collect(),
            dist: useful.iter().map(|&i| bfs(i)).collect(),
            from_start: bfs(start),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared.best_per_subset(30);
        Ok(best.iter().max().copied().unwrap_or(0).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut best = shared.best_per_subset(26);
        // widen each entry to the best of any of its subsets
        let n = shared.rates.len();
        for bit in 0..n {
            for mask in 0..best.len() {
                if mask & (1 << bit) != 0 {
                    best[mask] = best[mask].max(best[mask ^ (1 << bit)]);
                }
            }
        }
        let full = best.len() - 1;
        let total = (0..best.len())
            .map(|mine| best[mine] + best[full ^ mine])
            .max()
            .unwrap_or(0);
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
        Valve BB has flow rate=13; tunnels lead to valves CC, AA
        Valve CC has flow rate=2; tunnels lead to valves DD, BB
        Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE
        Valve EE has flow rate=3; tunnels lead to valves FF, DD
        Valve FF has flow rate=0; tunnels lead to valves EE, GG
        Valve GG has flow rate=0; tunnels lead to valves FF, HH
        Valve HH has flow rate=22; tunnel leads to valve GG
        Valve II has flow rate=0; tunnels lead to valves AA, JJ
        Valve JJ has flow rate=21; tunnel leads to valve II
    "};

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "1651");
    }

    #[test]
    fn part2_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "1707");
    }

    #[test]
    fn compresses_to_useful_valves() {
        let network = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(network.rates, vec![13, 2, 20, 3, 22, 21]);
        // AA -> DD -> EE -> FF -> GG -> HH
        assert_eq!(network.from_start[4], 5);
    }
}
