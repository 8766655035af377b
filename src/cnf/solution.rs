#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for SAT solver output files.
//!
//! Solvers write their result in loosely standardized shapes. This parser
//! accepts the common ones:
//! - An optional status line (`SAT`, `SATISFIABLE`, `UNSAT`,
//!   `UNSATISFIABLE`, or a competition-style `s ...` line), which is
//!   skipped.
//! - Model lines of space-separated signed integers, optionally prefixed
//!   with `v` (competition style) and optionally terminated by `0`.
//! - Comment lines starting with `c`, and blank lines, which are ignored.
//!
//! All literals are collected, in file order, into one flat sequence. `0`
//! tokens are terminators, not literals, and are dropped. Any other token
//! that does not parse as an integer is a hard error rather than silently
//! skipped data: truncated or corrupted model files must not decode to a
//! plausible-looking partial square.

use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;

/// Errors raised while reading a solver output file.
#[derive(Debug)]
pub enum SolutionParseError {
    /// The underlying reader failed.
    Io(io::Error),
    /// A token that should have been a literal did not parse as an integer.
    MalformedLiteral {
        /// 1-based line number of the offending token.
        line: usize,
        /// The token as it appeared in the file.
        token: String,
    },
}

impl fmt::Display for SolutionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read solver output: {e}"),
            Self::MalformedLiteral { line, token } => {
                write!(f, "malformed literal '{token}' on line {line}")
            }
        }
    }
}

impl std::error::Error for SolutionParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::MalformedLiteral { .. } => None,
        }
    }
}

impl From<io::Error> for SolutionParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Returns true for lines that carry solver status rather than literals.
fn is_status_token(token: &str) -> bool {
    token.starts_with("SAT") || token.starts_with("UNSAT") || token == "s"
}

/// Parses solver output from `reader` into a flat literal sequence.
///
/// An UNSAT result (or an empty file) parses to an empty sequence; the
/// caller sees that as a fully unset square after reconstruction, not as an
/// error.
///
/// # Errors
///
/// [`SolutionParseError::Io`] on read failure,
/// [`SolutionParseError::MalformedLiteral`] on a non-integer token.
pub fn parse_solution<R: BufRead>(reader: R) -> Result<Vec<i32>, SolutionParseError> {
    let mut literals = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace().peekable();

        match tokens.peek() {
            None => continue,
            Some(&t) if is_status_token(t) || t.starts_with('c') => continue,
            Some(&"v") => {
                tokens.next();
            }
            Some(_) => {}
        }

        for token in tokens {
            let lit = token
                .parse::<i32>()
                .map_err(|_| SolutionParseError::MalformedLiteral {
                    line: line_no + 1,
                    token: token.to_string(),
                })?;
            if lit != 0 {
                literals.push(lit);
            }
        }
    }

    Ok(literals)
}

/// Parses the solver output file at `path`.
///
/// # Errors
///
/// See [`parse_solution`]; additionally fails if the file cannot be opened.
pub fn parse_solution_file<P: AsRef<Path>>(path: P) -> Result<Vec<i32>, SolutionParseError> {
    let file = std::fs::File::open(path)?;
    parse_solution(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_with_status_line() {
        let content = "SAT\n1 -2 3 0\n-4 5 0";
        let literals = parse_solution(Cursor::new(content)).unwrap();
        assert_eq!(literals, vec![1, -2, 3, -4, 5]);
    }

    #[test]
    fn test_parse_blank_lines_and_trailing_whitespace() {
        let content = "SATISFIABLE\n\n1 -2   \n\n  3 -4 \n";
        let literals = parse_solution(Cursor::new(content)).unwrap();
        assert_eq!(literals, vec![1, -2, 3, -4]);
    }

    #[test]
    fn test_parse_competition_style() {
        let content = "c solved in 0.1s\ns SATISFIABLE\nv 1 -2 0\nv 3 0\n";
        let literals = parse_solution(Cursor::new(content)).unwrap();
        assert_eq!(literals, vec![1, -2, 3]);
    }

    #[test]
    fn test_parse_unsat_is_empty() {
        let literals = parse_solution(Cursor::new("UNSAT\n")).unwrap();
        assert!(literals.is_empty());

        let literals = parse_solution(Cursor::new("")).unwrap();
        assert!(literals.is_empty());
    }

    #[test]
    fn test_parse_malformed_literal() {
        let content = "SAT\n1 abc 3 0\n";
        let err = parse_solution(Cursor::new(content)).unwrap_err();
        match err {
            SolutionParseError::MalformedLiteral { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
            }
            SolutionParseError::Io(e) => panic!("unexpected io error: {e}"),
        }
    }

    #[test]
    fn test_zero_terminators_dropped() {
        let content = "1 0\n-2 0\n0\n";
        let literals = parse_solution(Cursor::new(content)).unwrap();
        assert_eq!(literals, vec![1, -2]);
    }
}
