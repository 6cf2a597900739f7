use crate::utils::parsing::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 21, tags = ["2022", "tree", "algebra"])]
pub struct Solver;

const ROOT: &str = "root";
const HUMAN: &str = "humn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job<'a> {
    Number(i64),
    Op(&'a str, Op, &'a str),
}

fn failed(msg: String) -> SolveError {
    SolveError::SolveFailed(msg.into())
}

struct Troop<'s, 'a> {
    jobs: &'s HashMap<&'a str, Job<'a>>,
}

impl<'a> Troop<'_, 'a> {
    fn job(&self, name: &str) -> Result<Job<'a>, SolveError> {
        self.jobs
            .get(name)
            .copied()
            .ok_or_else(|| failed(format!("no monkey named {name}")))
    }

    fn eval(&self, name: &str) -> Result<i64, SolveError> {
        match self.job(name)? {
            Job::Number(n) => Ok(n),
            Job::Op(a, op, b) => {
                let (a, b) = (self.eval(a)?, self.eval(b)?);
                let value = match op {
                    Op::Add => a.checked_add(b),
                    Op::Sub => a.checked_sub(b),
                    Op::Mul => a.checked_mul(b),
                    Op::Div => a.checked_div(b),
                };
                value.ok_or_else(|| failed(format!("{a} {op:?} {b} is not computable")))
            }
        }
    }

    fn depends_on_human(&self, name: &str) -> Result<bool, SolveError> {
        if name == HUMAN {
            return Ok(true);
        }
        match self.job(name)? {
            Job::Number(_) => Ok(false),
            Job::Op(a, _, b) => Ok(self.depends_on_human(a)? || self.depends_on_human(b)?),
        }
    }

    /// Value `humn` must yell so that `name` evaluates to `target`
    fn solve_for_human(&self, name: &str, target: i64) -> Result<i64, SolveError> {
        if name == HUMAN {
            return Ok(target);
        }
        let Job::Op(a, op, b) = self.job(name)? else {
            return Err(failed(format!("{name} does not depend on {HUMAN}")));
        };

        let inexact = || failed(format!("no integer solution below {name}"));
        if self.depends_on_human(a)? {
            let b = self.eval(b)?;
            let a_target = match op {
                Op::Add => target.checked_sub(b),
                Op::Sub => target.checked_add(b),
                Op::Mul if target.checked_rem(b) == Some(0) => target.checked_div(b),
                Op::Div => target.checked_mul(b),
                Op::Mul => None,
            }
            .ok_or_else(inexact)?;
            self.solve_for_human(a, a_target)
        } else {
            let a = self.eval(a)?;
            let b_target = match op {
                Op::Add => target.checked_sub(a),
                Op::Sub => a.checked_sub(target),
                Op::Mul if target.checked_rem(a) == Some(0) => target.checked_div(a),
                Op::Div if a.checked_rem(target) == Some(0) => a.checked_div(target),
                Op::Mul | Op::Div => None,
            }
            .ok_or_else(inexact)?;
            self.solve_for_human(b, b_target)
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = HashMap<&'a str, Job<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let jobs = parse_lines(input, |line| {
            let (name, job) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("expected `name: job`"))?;
            let job = match job.split_whitespace().collect::<Vec<_>>()[..] {
                [n] => Job::Number(n.parse()?),
                [a, op, b] => {
                    let op = match op {
                        "+" => Op::Add,
                        "-" => Op::Sub,
                        "*" => Op::Mul,
                        "/" => Op::Div,
                        _ => return Err(anyhow!("unknown operator {op:?}")),
                    };
                    Job::Op(a, op, b)
                }
                _ => return Err(anyhow!("unrecognised job {job:?}")),
            };
            Ok((name.trim(), job))
        })?;
        Ok(jobs.into_iter().collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Troop { jobs: shared }.eval(ROOT).map(|v| v.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let troop = Troop { jobs: shared };
        let Job::Op(a, _, b) = troop.job(ROOT)? else {
            return Err(failed(format!("{ROOT} must compare two monkeys")));
        };
        // root checks equality, so the human side must match the other side
        let (unknown, known) = if troop.depends_on_human(a)? { (a, b) } else { (b, a) };
        let target = troop.eval(known)?;
        troop.solve_for_human(unknown, target).map(|v| v.to_string())
    }
}
