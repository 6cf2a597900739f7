//! The traits every puzzle implements

use crate::error::{ParseError, SolveError};

/// Turns raw puzzle text into the data every part works on
///
/// `SharedData` may borrow from the input, so a day that only needs slices of
/// the text never copies it:
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// /// Groups of calorie counts separated by blank lines
/// struct Elves;
///
/// impl AocParser for Elves {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.split("\n\n").collect())
///     }
/// }
///
/// assert_eq!(Elves::parse("1\n2\n\n3").unwrap(), ["1\n2", "3"]);
/// ```
pub trait AocParser {
    /// Parsed input plus anything parts want to hand on to later parts
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Part `N` of a puzzle
///
/// Parts get the shared data mutably: part 2 may reuse work part 1 left
/// behind, such as a sort.
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split_whitespace()
///             .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         let deepest = shared.iter().max().ok_or(SolveError::SolveFailed("no depths".into()))?;
///         Ok(deepest.to_string())
///     }
/// }
///
/// let mut depths = Depths::parse("199 200 208").unwrap();
/// assert_eq!(<Depths as PartSolver<1>>::solve(&mut depths).unwrap(), "208");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A whole puzzle: its part count and a runtime dispatch by part number
///
/// Normally generated by `#[derive(AocSolver)]` from the [`PartSolver`]
/// impls. `solve_part` need not check its argument; callers go through
/// [`SolverExt::solve_part_checked_range`].
pub trait Solver: AocParser {
    const PARTS: u8;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

pub trait SolverExt: Solver {
    /// [`Solver::solve_part`], refusing parts outside `1..=PARTS`
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        match part {
            1.. if part <= Self::PARTS => Self::solve_part(shared, part),
            _ => Err(SolveError::PartOutOfRange(part)),
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
