//! Errors raised while registering, parsing and solving

use thiserror::Error;

/// Puzzle text could not be turned into shared data
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Something the puzzle needs is absent, such as an empty input
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Parse error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver has no code for this part
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// Outside `1..=PARTS`
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The input parsed but holds no answer, e.g. no path exists
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Anything that can go wrong between a registry lookup and an answer
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("No solver registered for {0}/{1:02}")]
    NotFound(u16, u8),
    #[error("Year {0} day {1} cannot be stored in the registry")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// A second solver claimed an occupied (year, day)
    #[error("A solver for {0}/{1:02} is already registered")]
    DuplicateSolver(u16, u8),
    #[error("Cannot register a solver for year {0} day {1}: out of range")]
    InvalidYearDay(u16, u8),
}
