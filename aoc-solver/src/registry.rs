//! Lookup of solvers by year and day

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Years the registry has room for, starting at [`BASE_YEAR`]
pub const MAX_YEARS: usize = 20;
pub const DAYS_PER_YEAR: usize = 25;
/// Number of (year, day) slots
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Slot of `year`/`day` in the flat table, if the registry can hold it
fn slot(year: u16, day: u8) -> Option<usize> {
    let year = usize::from(year.checked_sub(BASE_YEAR)?);
    let day = usize::from(day.checked_sub(1)?);
    (year < MAX_YEARS && day < DAYS_PER_YEAR).then_some(year * DAYS_PER_YEAR + day)
}

fn year_day(slot: usize) -> (u16, u8) {
    (
        BASE_YEAR + (slot / DAYS_PER_YEAR) as u16,
        (slot % DAYS_PER_YEAR) as u8 + 1,
    )
}

/// Parses input into a ready-to-solve instance
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// What is registered at one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    pub parts: u8,
}

struct Entry {
    factory: SolverFactory,
    parts: u8,
}

type Table = Vec<Option<Entry>>;

/// Collects factories before freezing them into a [`SolverRegistry`]
///
/// ```no_run
/// let registry = aoc_solver::SolverRegistryBuilder::new()
///     .register_solver_plugins(|plugin| plugin.tags.contains(&"2022"))
///     .unwrap()
///     .build();
/// ```
pub struct SolverRegistryBuilder {
    table: Table,
}

impl SolverRegistryBuilder {
    pub fn new() -> Self {
        Self {
            table: std::iter::repeat_with(|| None).take(CAPACITY).collect(),
        }
    }

    /// Add `factory` for `year`/`day`; each slot can be filled once
    pub fn register<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let entry = slot(year, day)
            .and_then(|i| self.table.get_mut(i))
            .ok_or(RegistrationError::InvalidYearDay(year, day))?;
        if entry.is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        *entry = Some(Entry {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Every plugin linked into the binary
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Plugins accepted by `filter`
    pub fn register_solver_plugins<F>(self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        inventory::iter::<SolverPlugin>()
            .into_iter()
            .filter(|plugin| filter(plugin))
            .try_fold(self, |builder, plugin| {
                plugin.solver.register_with(builder, plugin.year, plugin.day)
            })
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry { table: self.table }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Frozen set of factories; `Sync`, so worker threads can share one
pub struct SolverRegistry {
    table: Table,
}

impl SolverRegistry {
    fn entry(&self, year: u16, day: u8) -> Option<&Entry> {
        self.table.get(slot(year, day)?)?.as_ref()
    }

    /// Parse `input` with the solver for `year`/`day`
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        if slot(year, day).is_none() {
            return Err(SolverError::InvalidYearDay(year, day));
        }
        let entry = self
            .entry(year, day)
            .ok_or(SolverError::NotFound(year, day))?;
        Ok((entry.factory)(input)?)
    }

    /// Registered solvers, ordered by year then day
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.table.iter().enumerate().filter_map(|(i, entry)| {
            let (year, day) = year_day(i);
            entry.as_ref().map(|e| FactoryInfo {
                year,
                day,
                parts: e.parts,
            })
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        self.entry(year, day).map(|e| FactoryInfo {
            year,
            day,
            parts: e.parts,
        })
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.entry(year, day).is_some()
    }

    pub fn len(&self) -> usize {
        self.table.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A solver type seen through a trait object, so plugins of different types
/// can share one list. Implemented for every `Solver + Sync + 'static`.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register(year, day, S::PARTS, move |input: &str| {
            Ok(Box::new(SolverInstance::<S>::new(year, day, input)?))
        })
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// A solver submitted at link time, normally by `#[derive(AutoRegisterSolver)]`
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels used to select subsets, e.g. `"2022"`, `"grid"`
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

/// Register `$solver` on the builder variable `$builder`
///
/// Panics if the slot is taken or out of range, which is a programming error
/// when registering by hand.
///
/// ```
/// use aoc_solver::{register_solver, AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
///
/// struct Shout;
///
/// impl AocParser for Shout {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.trim())
///     }
/// }
///
/// impl Solver for Shout {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.to_uppercase())
///     }
/// }
///
/// let mut builder = SolverRegistryBuilder::new();
/// register_solver!(builder, Shout, 2022, 6);
/// let registry = builder.build();
///
/// let mut solver = registry.create_solver(2022, 6, " mjqj\n").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "MJQJ");
/// ```
#[macro_export]
macro_rules! register_solver {
    ($builder:expr, $solver:ty, $year:expr, $day:expr) => {
        $builder = {
            let (year, day): (u16, u8) = ($year, $day);
            $builder
                .register(
                    year,
                    day,
                    <$solver as $crate::Solver>::PARTS,
                    move |input: &str| {
                        Ok(Box::new($crate::SolverInstance::<$solver>::new(
                            year, day, input,
                        )?))
                    },
                )
                .expect("solver registration failed")
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_cover_the_table() {
        for i in 0..CAPACITY {
            let (year, day) = year_day(i);
            assert_eq!(slot(year, day), Some(i));
        }
    }

    #[test]
    fn slots_reject_out_of_range() {
        assert_eq!(slot(2014, 1), None);
        assert_eq!(slot(2035, 1), None);
        assert_eq!(slot(2022, 0), None);
        assert_eq!(slot(2022, 26), None);
        assert_eq!(slot(2015, 1), Some(0));
        assert_eq!(slot(2022, 25), Some(7 * DAYS_PER_YEAR + 24));
    }
}
