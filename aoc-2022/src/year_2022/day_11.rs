use crate::utils::parsing::{ints, invalid};
use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 11, tags = ["2022", "simulation", "modular"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Old,
    Value(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add(Operand),
    Mul(Operand),
}

impl Operation {
    fn apply(self, old: u64) -> u64 {
        let value = |operand| match operand {
            Operand::Old => old,
            Operand::Value(v) => v,
        };
        match self {
            Operation::Add(o) => old + value(o),
            Operation::Mul(o) => old * value(o),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Monkey {
    items: Vec<u64>,
    operation: Operation,
    divisor: u64,
    if_true: usize,
    if_false: usize,
}

/// Field value after `label:` on the next line of a monkey block
fn field<'a>(lines: &mut impl Iterator<Item = &'a str>, label: &str) -> anyhow::Result<&'a str> {
    let line = lines.next().ok_or_else(|| anyhow!("missing `{label}` line"))?;
    line.trim()
        .strip_prefix(label)
        .and_then(|rest| rest.strip_prefix(':'))
        .map(str::trim)
        .ok_or_else(|| anyhow!("expected `{label}:`, got {line:?}"))
}

fn last_number(s: &str) -> anyhow::Result<u64> {
    ints::<u64>(s)?
        .last()
        .copied()
        .ok_or_else(|| anyhow!("no number in {s:?}"))
}

fn parse_monkey(block: &str) -> anyhow::Result<Monkey> {
    let mut lines = block.lines().filter(|l| !l.trim().is_empty());
    lines.next().ok_or_else(|| anyhow!("empty monkey block"))?;

    let items = ints(field(&mut lines, "Starting items")?)?;

    let op = field(&mut lines, "Operation")?;
    let operation = match op.split_whitespace().collect::<Vec<_>>()[..] {
        ["new", "=", "old", symbol, operand] => {
            let operand = match operand {
                "old" => Operand::Old,
                v => Operand::Value(v.parse().with_context(|| format!("operand {v:?}"))?),
            };
            match symbol {
                "+" => Operation::Add(operand),
                "*" => Operation::Mul(operand),
                _ => return Err(anyhow!("unknown operator {symbol:?}")),
            }
        }
        _ => return Err(anyhow!("unrecognised operation {op:?}")),
    };

    let divisor = last_number(field(&mut lines, "Test")?)?;
    if divisor == 0 {
        return Err(anyhow!("divisor must be positive"));
    }
    let if_true = last_number(field(&mut lines, "If true")?)? as usize;
    let if_false = last_number(field(&mut lines, "If false")?)? as usize;

    Ok(Monkey {
        items,
        operation,
        divisor,
        if_true,
        if_false,
    })
}

/// Product of the two largest inspection counts after `rounds`
fn monkey_business(monkeys: &[Monkey], rounds: usize, relief: bool) -> u64 {
    let mut monkeys = monkeys.to_vec();
    let modulus: u64 = monkeys.iter().map(|m| m.divisor).product();
    let mut inspected = vec![0u64; monkeys.len()];

    for _ in 0..rounds {
        for i in 0..monkeys.len() {
            let items = std::mem::take(&mut monkeys[i].items);
            inspected[i] += items.len() as u64;
            let Monkey {
                operation,
                divisor,
                if_true,
                if_false,
                ..
            } = monkeys[i];
            for item in items {
                let mut worry = operation.apply(item);
                if relief {
                    worry /= 3;
                } else {
                    worry %= modulus;
                }
                let target = if worry % divisor == 0 { if_true } else { if_false };
                monkeys[target].items.push(worry);
            }
        }
    }

    inspected.sort_unstable_by(|a, b| b.cmp(a));
    inspected.iter().take(2).product()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Monkey>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let monkeys = input
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .enumerate()
            .map(|(idx, block)| parse_monkey(block).with_context(|| format!("(monkey {idx})")))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| invalid(anyhow!("{e:#}")))?;

        if monkeys.len() < 2 {
            return Err(ParseError::MissingData("need at least two monkeys".into()));
        }
        for m in &monkeys {
            if m.if_true >= monkeys.len() || m.if_false >= monkeys.len() {
                return Err(ParseError::InvalidFormat("throw target out of range".into()));
            }
        }
        Ok(monkeys)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(monkey_business(shared, 20, true).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(monkey_business(shared, 10_000, false).to_string())
    }
}
