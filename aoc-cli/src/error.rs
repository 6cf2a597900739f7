//! Error types for the runner

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session rejected by adventofcode.com")]
    InvalidSession,

    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_http_client::AocError),

    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Failures of a single work item. The `Arc` newtype lets one failure be
/// reported for every part of a day and still be combined at the end.
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    #[error("No input for {year}/{day:02}: not cached and no session to fetch it")]
    InputMissing { year: u16, day: u8 },

    #[error("Reading {} failed: {source}", .path.display())]
    InputFile {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Reading cached input for {year}/{day:02} failed: {source}")]
    InputRead {
        year: u16,
        day: u8,
        #[source]
        source: CacheError,
    },

    #[error("Fetching input for {year}/{day:02} failed: {source}")]
    InputFetch {
        year: u16,
        day: u8,
        #[source]
        source: aoc_http_client::AocError,
    },

    #[error("{year}/{day:02}: {source}")]
    Solver {
        year: u16,
        day: u8,
        #[source]
        source: aoc_solver::SolverError,
    },

    #[error("Result channel closed")]
    ChannelSend,

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    #[error("{} errors occurred", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two failures into one `Multiple`, flattening nested ones
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = first.into_list();
        errors.extend(second.into_list());
        ExecutorError::Multiple(errors).into()
    }

    pub fn combine_opt(
        first: Option<ArcExecutorError>,
        second: Option<ArcExecutorError>,
    ) -> Option<ArcExecutorError> {
        match (first, second) {
            (Some(a), Some(b)) => Some(Self::combine(a, b)),
            (a, b) => a.or(b),
        }
    }

    /// The individual failures this error stands for
    pub fn into_list(self) -> Vec<ArcExecutorError> {
        match self.inner() {
            ExecutorError::Multiple(errors) => errors.clone(),
            _ => vec![self],
        }
    }
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn missing(day: u8) -> ArcExecutorError {
        ExecutorError::InputMissing { year: 2022, day }.into()
    }

    fn days(err: &ArcExecutorError) -> Vec<u8> {
        err.clone()
            .into_list()
            .iter()
            .map(|e| match e.inner() {
                ExecutorError::InputMissing { day, .. } => *day,
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    #[test]
    fn combine_flattens() {
        let left = ArcExecutorError::combine(missing(1), missing(2));
        let right = ArcExecutorError::combine(missing(3), missing(4));
        let all = ArcExecutorError::combine(left, right);
        assert_eq!(days(&all), [1, 2, 3, 4]);
        assert_eq!(all.to_string(), "4 errors occurred");
    }

    #[test]
    fn combine_opt_keeps_the_present_side() {
        assert!(ArcExecutorError::combine_opt(None, None).is_none());
        let one = ArcExecutorError::combine_opt(None, Some(missing(5))).unwrap();
        assert_eq!(days(&one), [5]);
    }

    proptest! {
        #[test]
        fn fold_keeps_every_error_in_order(list in prop::collection::vec(1u8..=25, 1..20)) {
            let combined = list
                .iter()
                .map(|&d| Some(missing(d)))
                .fold(None, ArcExecutorError::combine_opt)
                .unwrap();
            prop_assert_eq!(days(&combined), list);
        }
    }
}
