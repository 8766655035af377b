//! CNF constraint generation for Latin squares and orthogonal pairs.
//!
//! A single square of order `n` gets the classic direct encoding: every
//! cell holds at least one and at most one value, and every value appears
//! at most once per row and per column. Together with the at-least-one
//! clauses, the row and column constraints make each row and column a
//! permutation of `[1, n]`.
//!
//! An orthogonal (Graeco-Latin) pair doubles the single-square constraints
//! over offset variable ids and adds pair-uniqueness clauses: no ordered
//! value pair `(v1, v2)` may be realized by two distinct cells. Coverage
//! clauses ("every pair occurs at least once") are not emitted: each of the
//! `n²` cells realizes exactly one of the `n²` ordered pairs, and all
//! realized pairs are distinct, so every pair occurs exactly once.

use crate::cnf::formula::{Clause, Cnf};
use crate::latin::variable::{Mode, Variable};
use itertools::Itertools;
use smallvec::smallvec;
use std::fmt;

/// A pre-assigned cell of a single square, 1-indexed throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFix {
    /// Row, in `[1, n]`.
    pub row: usize,
    /// Column, in `[1, n]`.
    pub col: usize,
    /// Forced value, in `[1, n]`.
    pub value: usize,
}

impl CellFix {
    /// Creates a pre-assignment for cell `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize, value: usize) -> Self {
        Self { row, col, value }
    }

    const fn in_bounds(self, n: usize) -> bool {
        1 <= self.row
            && self.row <= n
            && 1 <= self.col
            && self.col <= n
            && 1 <= self.value
            && self.value <= n
    }
}

impl fmt::Display for CellFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row={}, col={}, val={})", self.row, self.col, self.value)
    }
}

/// A pre-assigned cell of an orthogonal pair: both squares' values at one
/// position, 1-indexed throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairFix {
    /// Row, in `[1, n]`.
    pub row: usize,
    /// Column, in `[1, n]`.
    pub col: usize,
    /// Forced value of the first square, in `[1, n]`.
    pub first: usize,
    /// Forced value of the second square, in `[1, n]`.
    pub second: usize,
}

impl PairFix {
    /// Creates a pre-assignment for cell `(row, col)` of both squares.
    #[must_use]
    pub const fn new(row: usize, col: usize, first: usize, second: usize) -> Self {
        Self {
            row,
            col,
            first,
            second,
        }
    }

    const fn in_bounds(self, n: usize) -> bool {
        1 <= self.row
            && self.row <= n
            && 1 <= self.col
            && self.col <= n
            && 1 <= self.first
            && self.first <= n
            && 1 <= self.second
            && self.second <= n
    }
}

impl fmt::Display for PairFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(row={}, col={}, val1={}, val2={})",
            self.row, self.col, self.first, self.second
        )
    }
}

/// Errors that abort CNF generation. Generation is all-or-nothing: on any
/// error no instance is produced and nothing is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The order is zero, or so large that variable ids would overflow
    /// `i32` (the literal type DIMACS solvers exchange).
    InvalidOrder(usize),
    /// A single-square pre-assignment lies outside `[1, n]`.
    InvalidCellFix {
        /// The offending tuple.
        fix: CellFix,
        /// Order of the square it was supplied for.
        n: usize,
    },
    /// A pair pre-assignment lies outside `[1, n]`.
    InvalidPairFix {
        /// The offending tuple.
        fix: PairFix,
        /// Order of the squares it was supplied for.
        n: usize,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrder(n) => write!(f, "unsupported square order {n}"),
            Self::InvalidCellFix { fix, n } => {
                write!(f, "invalid pre-assigned value at {fix} for order {n}")
            }
            Self::InvalidPairFix { fix, n } => {
                write!(f, "invalid pre-assigned value at {fix} for order {n}")
            }
        }
    }
}

impl std::error::Error for EncodeError {}

fn check_order(n: usize, mode: Mode) -> Result<(), EncodeError> {
    // Every variable id must fit in an i32 once the square offset is applied.
    let num_vars = n
        .checked_mul(n)
        .and_then(|sq| sq.checked_mul(n))
        .and_then(|cube| cube.checked_mul(mode.squares()));
    match num_vars {
        Some(v) if v >= 1 && v <= i32::MAX as usize => Ok(()),
        _ => Err(EncodeError::InvalidOrder(n)),
    }
}

/// At-least-one-value clauses: one `n`-literal clause per cell.
fn cell_clauses(n: usize, square: usize) -> Vec<Clause> {
    (0..n)
        .cartesian_product(0..n)
        .map(|(row, col)| {
            (0..n)
                .map(|val| Variable::new(square, row, col, val).literal(n))
                .collect()
        })
        .collect()
}

/// At-most-one-value clauses: one binary clause per cell and value pair.
fn cell_uniqueness_clauses(n: usize, square: usize) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for (row, col) in (0..n).cartesian_product(0..n) {
        for (v1, v2) in (0..n).tuple_combinations() {
            clauses.push(smallvec![
                -Variable::new(square, row, col, v1).literal(n),
                -Variable::new(square, row, col, v2).literal(n),
            ]);
        }
    }
    clauses
}

/// Row-uniqueness clauses: a value appears in at most one column per row.
fn row_uniqueness_clauses(n: usize, square: usize) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for (row, val) in (0..n).cartesian_product(0..n) {
        for (c1, c2) in (0..n).tuple_combinations() {
            clauses.push(smallvec![
                -Variable::new(square, row, c1, val).literal(n),
                -Variable::new(square, row, c2, val).literal(n),
            ]);
        }
    }
    clauses
}

/// Column-uniqueness clauses: a value appears in at most one row per column.
fn col_uniqueness_clauses(n: usize, square: usize) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for (col, val) in (0..n).cartesian_product(0..n) {
        for (r1, r2) in (0..n).tuple_combinations() {
            clauses.push(smallvec![
                -Variable::new(square, r1, col, val).literal(n),
                -Variable::new(square, r2, col, val).literal(n),
            ]);
        }
    }
    clauses
}

/// All Latin constraints for one square at the given id offset.
fn latin_clauses(n: usize, square: usize) -> Vec<Clause> {
    cell_clauses(n, square)
        .into_iter()
        .chain(cell_uniqueness_clauses(n, square))
        .chain(row_uniqueness_clauses(n, square))
        .chain(col_uniqueness_clauses(n, square))
        .collect()
}

/// Pair-uniqueness clauses for an orthogonal pair: for each ordered value
/// pair and each unordered pair of distinct cells, forbid both cells from
/// realizing the pair simultaneously.
fn pair_uniqueness_clauses(n: usize) -> Vec<Clause> {
    let cells: Vec<(usize, usize)> = (0..n).cartesian_product(0..n).collect();
    let mut clauses = Vec::new();
    for (v1, v2) in (0..n).cartesian_product(0..n) {
        for (&(r1, c1), &(r2, c2)) in cells.iter().tuple_combinations() {
            clauses.push(smallvec![
                -Variable::new(0, r1, c1, v1).literal(n),
                -Variable::new(1, r1, c1, v2).literal(n),
                -Variable::new(0, r2, c2, v1).literal(n),
                -Variable::new(1, r2, c2, v2).literal(n),
            ]);
        }
    }
    clauses
}

/// Generates the CNF instance for one Latin square of order `n`, with the
/// given cells forced via unit clauses.
///
/// # Errors
///
/// [`EncodeError::InvalidOrder`] for `n = 0` or an order whose ids would
/// overflow `i32`; [`EncodeError::InvalidCellFix`] if any pre-assignment
/// lies outside `[1, n]`. No partial instance is returned.
pub fn latin_cnf(n: usize, fixes: &[CellFix]) -> Result<Cnf, EncodeError> {
    check_order(n, Mode::Single)?;
    for &fix in fixes {
        if !fix.in_bounds(n) {
            return Err(EncodeError::InvalidCellFix { fix, n });
        }
    }

    let mut cnf = Cnf::new(Mode::Single.num_vars(n));
    cnf.extend(latin_clauses(n, 0));
    for &fix in fixes {
        cnf.push(smallvec![
            Variable::new(0, fix.row - 1, fix.col - 1, fix.value - 1).literal(n),
        ]);
    }
    Ok(cnf)
}

/// Generates the CNF instance for a Graeco-Latin pair of order `n`, with
/// the given cells forced via unit clauses (two per fix, one per square).
///
/// # Errors
///
/// [`EncodeError::InvalidOrder`] for `n = 0` or an order whose ids would
/// overflow `i32`; [`EncodeError::InvalidPairFix`] if any pre-assignment
/// lies outside `[1, n]`. No partial instance is returned.
pub fn graeco_cnf(n: usize, fixes: &[PairFix]) -> Result<Cnf, EncodeError> {
    check_order(n, Mode::Orthogonal)?;
    for &fix in fixes {
        if !fix.in_bounds(n) {
            return Err(EncodeError::InvalidPairFix { fix, n });
        }
    }

    let mut cnf = Cnf::new(Mode::Orthogonal.num_vars(n));
    cnf.extend(latin_clauses(n, 0));
    cnf.extend(latin_clauses(n, 1));
    cnf.extend(pair_uniqueness_clauses(n));
    for &fix in fixes {
        cnf.push(smallvec![
            Variable::new(0, fix.row - 1, fix.col - 1, fix.first - 1).literal(n),
        ]);
        cnf.push(smallvec![
            Variable::new(1, fix.row - 1, fix.col - 1, fix.second - 1).literal(n),
        ]);
    }
    Ok(cnf)
}
