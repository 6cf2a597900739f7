use crate::utils::parsing::{ints_n, parse_lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 19, tags = ["2022", "dfs", "optimization"])]
pub struct Solver;

const ORE: usize = 0;
const CLAY: usize = 1;
const OBSIDIAN: usize = 2;
const GEODE: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct Blueprint {
    id: u32,
    /// `costs[robot][resource]`
    costs: [[u32; 3]; 4],
    /// Most of each resource spendable in one minute; more robots are useless
    max_useful: [u32; 3],
}

#[derive(Clone, Copy)]
struct State {
    left: u32,
    robots: [u32; 4],
    stock: [u32; 4],
}

impl Blueprint {
    fn new(id: u32, ore: u32, clay: u32, obsidian: (u32, u32), geode: (u32, u32)) -> Self {
        let costs = [
            [ore, 0, 0],
            [clay, 0, 0],
            [obsidian.0, obsidian.1, 0],
            [geode.0, 0, geode.1],
        ];
        let max_useful = [
            costs.iter().map(|c| c[ORE]).max().unwrap_or(0),
            costs[OBSIDIAN][CLAY],
            costs[GEODE][OBSIDIAN],
        ];
        Self {
            id,
            costs,
            max_useful,
        }
    }

    /// Most geodes that can be open after `minutes`
    pub fn max_geodes(&self, minutes: u32) -> u32 {
        let mut best = 0;
        self.search(
            State {
                left: minutes,
                robots: [1, 0, 0, 0],
                stock: [0; 4],
            },
            &mut best,
        );
        best
    }

    /// Branch on which robot to build next, waiting as long as needed for it
    fn search(&self, state: State, best: &mut u32) {
        let idle = state.stock[GEODE] + state.robots[GEODE] * state.left;
        *best = (*best).max(idle);

        // one new geode robot every remaining minute is the ceiling
        let ceiling = idle + state.left * state.left.saturating_sub(1) / 2;
        if ceiling <= *best {
            return;
        }

        for robot in (0..4).rev() {
            if robot != GEODE && state.robots[robot] >= self.max_useful[robot] {
                continue;
            }
            let Some(wait) = self.minutes_until_affordable(&state, robot) else {
                continue;
            };
            if wait + 1 >= state.left {
                continue;
            }
            let mut next = state;
            next.left -= wait + 1;
            for r in 0..4 {
                next.stock[r] += state.robots[r] * (wait + 1);
            }
            for (r, cost) in self.costs[robot].iter().enumerate() {
                next.stock[r] -= cost;
            }
            next.robots[robot] += 1;
            self.search(next, best);
        }
    }

    fn minutes_until_affordable(&self, state: &State, robot: usize) -> Option<u32> {
        let mut wait = 0;
        for (r, &cost) in self.costs[robot].iter().enumerate() {
            if cost <= state.stock[r] {
                continue;
            }
            if state.robots[r] == 0 {
                return None;
            }
            wait = wait.max((cost - state.stock[r]).div_ceil(state.robots[r]));
        }
        Some(wait)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Blueprint>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        // blueprints may span several lines, so split on the keyword instead
        let text = input.replace('\n', " ");
        let blueprints: Vec<String> = text
            .split("Blueprint")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("Blueprint {s}"))
            .collect();
        parse_lines(&blueprints.join("\n"), |line| {
            let [id, ore, clay, obs_ore, obs_clay, geo_ore, geo_obs] = ints_n::<u32, 7>(line)?;
            Ok(Blueprint::new(id, ore, clay, (obs_ore, obs_clay), (geo_ore, geo_obs)))
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let quality: u32 = shared.iter().map(|b| b.id * b.max_geodes(24)).sum();
        Ok(quality.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: u64 = shared
            .iter()
            .take(3)
            .map(|b| u64::from(b.max_geodes(32)))
            .product();
        Ok(product.to_string())
    }
}
