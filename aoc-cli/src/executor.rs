//! Runs solvers over the thread pool and streams their results

use crate::cli::ParallelizeBy;
use crate::config::Selection;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::InputSource;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Outcome of one part
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Set on the first result of every parse
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// A day to run and the parts of it that were selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Registered solvers matching `selection`, in (year, day) order
pub fn collect_work_items(registry: &SolverRegistry, selection: &Selection) -> Vec<WorkItem> {
    registry
        .iter_info()
        .filter(|info| selection.year.is_none_or(|y| info.year == y))
        .filter(|info| selection.day.is_none_or(|d| info.day == d))
        .filter_map(|info| {
            let parts = match selection.part {
                Some(p) if (1..=info.parts).contains(&p) => p..=p,
                Some(_) => return None,
                None => 1..=info.parts,
            };
            (!parts.is_empty()).then_some(WorkItem {
                year: info.year,
                day: info.day,
                parts,
            })
        })
        .collect()
}

pub struct Executor {
    registry: SolverRegistry,
    inputs: InputSource,
    parallelize_by: ParallelizeBy,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    pub fn new(
        registry: SolverRegistry,
        inputs: InputSource,
        parallelize_by: ParallelizeBy,
        threads: usize,
    ) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("aoc-worker-{i}"))
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            registry,
            inputs,
            parallelize_by,
            thread_pool,
        })
    }

    /// Run every item, sending one result per part to `tx`
    ///
    /// A failing item does not stop the others; all failures come back
    /// combined once everything has run.
    pub fn execute(&self, items: &[WorkItem], tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let failure = match self.parallelize_by {
            ParallelizeBy::Sequential => items
                .iter()
                .map(|work| self.run_item(work, &tx).err())
                .fold(None, ArcExecutorError::combine_opt),
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                items
                    .par_iter()
                    .map(|work| self.run_item(work, &tx).err())
                    .reduce(|| None, ArcExecutorError::combine_opt)
            }),
        };
        failure.map_or(Ok(()), Err)
    }

    fn run_item(&self, work: &WorkItem, tx: &Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let _span = tracing::debug_span!("item", year = work.year, day = work.day).entered();

        let input = match self.inputs.load(work.year, work.day) {
            Ok(input) => input,
            Err(e) => {
                let e = ArcExecutorError::from(e);
                send_failures(work, work.parts.clone(), &e, tx)?;
                return Err(e);
            }
        };

        let solve = |parts: RangeInclusive<u8>| (parts.clone(), self.solve_parts(work, parts, &input));
        let solved: Vec<_> = if self.parallelize_by == ParallelizeBy::Part {
            // each part parses its own copy so parts can run side by side
            work.parts.clone().into_par_iter().map(|p| solve(p..=p)).collect()
        } else {
            vec![solve(work.parts.clone())]
        };

        let mut failure = None;
        for (parts, outcome) in solved {
            match outcome {
                Ok(results) => {
                    for result in results {
                        if let Err(e) = &result.answer {
                            failure = ArcExecutorError::combine_opt(failure, Some(e.clone()));
                        }
                        send(tx, result)?;
                    }
                }
                Err(e) => {
                    send_failures(work, parts, &e, tx)?;
                    failure = ArcExecutorError::combine_opt(failure, Some(e));
                }
            }
        }
        failure.map_or(Ok(()), Err)
    }

    /// Parse once, then solve `parts` in order against the shared data
    fn solve_parts(
        &self,
        work: &WorkItem,
        parts: RangeInclusive<u8>,
        input: &str,
    ) -> Result<Vec<SolverResult>, ArcExecutorError> {
        let (year, day) = (work.year, work.day);
        let mut solver = self
            .registry
            .create_solver(year, day, input)
            .map_err(|source| ArcExecutorError::from(ExecutorError::Solver { year, day, source }))?;

        let mut parse_duration = Some(solver.parse_duration());
        Ok(parts
            .map(|part| solve_part(year, day, part, solver.as_mut(), parse_duration.take()))
            .collect())
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))
}

/// Send a failed result for every part so ordered output is not held up
fn send_failures(
    work: &WorkItem,
    parts: RangeInclusive<u8>,
    e: &ArcExecutorError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    for part in parts {
        send(tx, failed(work, part, e.clone()))?;
    }
    Ok(())
}

fn failed(work: &WorkItem, part: u8, e: ArcExecutorError) -> SolverResult {
    SolverResult {
        year: work.year,
        day: work.day,
        part,
        answer: Err(e),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    }
}

fn solve_part(
    year: u16,
    day: u8,
    part: u8,
    solver: &mut dyn DynSolver,
    parse_duration: Option<TimeDelta>,
) -> SolverResult {
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(solved) => {
            let elapsed = solved.duration();
            tracing::debug!(part, ?elapsed, "solved");
            (Ok(solved.answer), elapsed)
        }
        Err(e) => {
            let source = aoc_solver::SolverError::from(e);
            (
                Err(ExecutorError::Solver { year, day, source }.into()),
                TimeDelta::zero(),
            )
        }
    };
    SolverResult {
        year,
        day,
        part,
        answer,
        parse_duration,
        solve_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InputCache;
    use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
    use std::sync::mpsc;
    use tempfile::TempDir;

    /// Sums numbers, then multiplies them
    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Arithmetic;

    impl AocParser for Arithmetic {
        type SharedData<'a> = Vec<i64>;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            input
                .split_whitespace()
                .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
                .collect()
        }
    }

    impl PartSolver<1> for Arithmetic {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<i64>().to_string())
        }
    }

    impl PartSolver<2> for Arithmetic {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            if shared.contains(&0) {
                return Err(SolveError::SolveFailed("zero in product".into()));
            }
            Ok(shared.iter().product::<i64>().to_string())
        }
    }

    fn registry() -> SolverRegistry {
        let mut builder = SolverRegistryBuilder::new();
        for day in 1..=3 {
            aoc_solver::register_solver!(builder, Arithmetic, 2030, day);
        }
        builder.build()
    }

    fn run(mode: ParallelizeBy, inputs: &[(u8, &str)]) -> (Vec<SolverResult>, Result<(), ArcExecutorError>) {
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path());
        for (day, input) in inputs {
            cache.write(2030, *day, input).unwrap();
        }
        let registry = registry();
        let items = collect_work_items(&registry, &Selection::default());
        let executor = Executor::new(registry, InputSource::Cached { cache, remote: None }, mode, 2).unwrap();

        let (tx, rx) = mpsc::channel();
        let outcome = executor.execute(&items, tx);
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        (results, outcome)
    }

    fn answers(results: &[SolverResult]) -> Vec<Option<&str>> {
        results.iter().map(|r| r.answer.as_deref().ok()).collect()
    }

    #[test]
    fn every_mode_gives_the_same_answers() {
        for mode in [ParallelizeBy::Sequential, ParallelizeBy::Day, ParallelizeBy::Part] {
            let (results, outcome) = run(mode, &[(1, "1 2 3"), (2, "4 5"), (3, "2 2")]);
            assert!(outcome.is_ok(), "{mode:?}");
            assert_eq!(
                answers(&results),
                [Some("6"), Some("6"), Some("9"), Some("20"), Some("4"), Some("4")],
                "{mode:?}"
            );
        }
    }

    #[test]
    fn parse_is_timed_once_per_instance() {
        let (results, _) = run(ParallelizeBy::Day, &[(1, "1"), (2, "2"), (3, "3")]);
        let timed = results.iter().filter(|r| r.parse_duration.is_some()).count();
        assert_eq!(timed, 3);

        let (results, _) = run(ParallelizeBy::Part, &[(1, "1"), (2, "2"), (3, "3")]);
        assert!(results.iter().all(|r| r.parse_duration.is_some()));
    }

    #[test]
    fn failures_are_reported_and_collected() {
        let (results, outcome) = run(ParallelizeBy::Day, &[(1, "1 0"), (2, "x")]);
        assert_eq!(answers(&results), [Some("1"), None, None, None, None, None]);

        let errors = outcome.unwrap_err().into_list();
        // day 1 part 2, the day 2 parse and the missing day 3 input
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .any(|e| matches!(e.inner(), ExecutorError::InputMissing { day: 3, .. })));
    }

    #[test]
    fn selection_clamps_parts() {
        let registry = registry();
        let only_part_two = Selection {
            part: Some(2),
            day: Some(2),
            ..Selection::default()
        };
        assert_eq!(
            collect_work_items(&registry, &only_part_two),
            [WorkItem { year: 2030, day: 2, parts: 2..=2 }]
        );
        let other_year = Selection {
            year: Some(2022),
            ..Selection::default()
        };
        assert!(collect_work_items(&registry, &other_year).is_empty());
    }
}
