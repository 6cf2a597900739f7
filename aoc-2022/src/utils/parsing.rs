//! Input parsing helpers

use anyhow::anyhow;
use aoc_solver::ParseError;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static INT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+").expect("integer pattern is valid"));

/// Parse every non-empty line with `f`, prefixing failures with the line number
pub fn parse_lines<'a, T, F>(input: &'a str, mut f: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| f(line).map_err(|e| line_error(idx, e)))
        .collect()
}

/// Wrap an error raised while parsing the zero-based line `idx`
pub fn line_error(idx: usize, e: impl std::fmt::Display) -> ParseError {
    ParseError::InvalidFormat(format!("(line {}) {}", idx + 1, e))
}

/// All signed integers appearing in `s`, in order
pub fn ints<T: FromStr>(s: &str) -> anyhow::Result<Vec<T>>
where
    T::Err: std::fmt::Display,
{
    INT_REGEX
        .find_iter(s)
        .map(|m| {
            m.as_str()
                .parse::<T>()
                .map_err(|e| anyhow!("{}: {:?}", e, m.as_str()))
        })
        .collect()
}

/// Exactly `N` integers from `s`
pub fn ints_n<T: FromStr + Copy + Default, const N: usize>(s: &str) -> anyhow::Result<[T; N]>
where
    T::Err: std::fmt::Display,
{
    let found = ints::<T>(s)?;
    if found.len() != N {
        return Err(anyhow!("expected {} numbers, found {}", N, found.len()));
    }
    let mut out = [T::default(); N];
    out.copy_from_slice(&found);
    Ok(out)
}

/// Convert an anyhow error from a whole-input parse into a [`ParseError`]
pub fn invalid(e: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ints_handles_signs_and_noise() {
        let found: Vec<i64> =
            ints("Sensor at x=2, y=-18: closest beacon is at x=-2, y=15").unwrap();
        assert_eq!(found, vec![2, -18, -2, 15]);
    }

    #[test]
    fn ints_n_checks_count() {
        assert_eq!(ints_n::<u32, 3>("move 1 from 2 to 1").unwrap(), [1, 2, 1]);
        assert!(ints_n::<u32, 2>("move 1 from 2 to 1").is_err());
    }

    #[test]
    fn parse_lines_reports_line_numbers() {
        let err = parse_lines("1\n2\nx\n", |l| Ok(l.parse::<u8>()?)).unwrap_err();
        match err {
            ParseError::InvalidFormat(msg) => assert!(msg.starts_with("(line 3)"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn parse_lines_skips_blank_lines() {
        let parsed = parse_lines("1\n\n2\n", |l| Ok(l.parse::<u8>()?)).unwrap();
        assert_eq!(parsed, vec![1, 2]);
    }
}
