//! Parse-once, solve-many framework for Advent of Code puzzles
//!
//! Each puzzle is a type. Its input is parsed once into shared data, and
//! every numbered part is answered from that data.
//!
//! Pieces:
//! - [`AocParser`] for turning raw input into per-puzzle data
//! - [`PartSolver`] and [`Solver`] for answering parts
//! - [`SolverInstance`] and [`DynSolver`] for timed, type-erased solving
//! - [`SolverRegistry`] for looking solvers up by year and day
//! - Derive macros for part dispatch and plugin registration
//!
//! # Example
//!
//! ```
//! use aoc_solver::{
//!     AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder,
//!     register_solver,
//! };
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! pub struct Calories;
//!
//! impl AocParser for Calories {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .split("\n\n")
//!             .map(|group| {
//!                 group
//!                     .lines()
//!                     .map(|line| line.parse::<u32>())
//!                     .sum::<Result<u32, _>>()
//!                     .map_err(|e| ParseError::InvalidFormat(e.to_string()))
//!             })
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or(0).to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         shared.sort_unstable_by(|a, b| b.cmp(a));
//!         Ok(shared.iter().take(3).sum::<u32>().to_string())
//!     }
//! }
//!
//! let mut builder = SolverRegistryBuilder::new();
//! register_solver!(builder, Calories, 2022, 1);
//! let registry = builder.build();
//!
//! let mut solver = registry.create_solver(2022, 1, "1\n2\n\n4\n\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "4");
//! assert_eq!(solver.solve(2).unwrap().answer, "10");
//! ```
//!
//! # Plugin Registration
//!
//! `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] through
//! `inventory`, so a binary only has to link the solutions crate:
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2022, day = 1, tags = ["2022", "parsing"])]
//! pub struct Solver;
//!
//! let registry = SolverRegistryBuilder::new().register_all_plugins()?.build();
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    BASE_YEAR, CAPACITY, DAYS_PER_YEAR, FactoryInfo, MAX_YEARS, RegisterableSolver,
    SolverFactory, SolverPlugin, SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// used by `#[derive(AutoRegisterSolver)]` expansions
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
