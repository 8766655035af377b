//! Reconstruction of squares from a solver's literal sequence.
//!
//! Only positive literals carry information: each one is inverted through
//! the variable bijection and written into its cell. Cells no positive
//! literal touched stay unset, which is what an UNSAT or empty model file
//! reconstructs to. Two distinct values landing in one cell is an error,
//! never a silent overwrite.

use crate::latin::variable::{Mode, Variable};
use bit_vec::BitVec;
use rustc_hash::FxHashSet;
use std::fmt;

/// An `n × n` grid of values in `[1, n]`, with `0` as the unset sentinel.
/// The sentinel never leaks through the accessors: [`Square::get`] returns
/// `None` for an unset cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    n: usize,
    cells: Vec<usize>,
}

impl Square {
    /// Creates a fully unset square of order `n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![0; n * n],
        }
    }

    /// The order of the square.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// The value at `(row, col)` (0-indexed), or `None` if unset.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        match self.cells[row * self.n + col] {
            0 => None,
            v => Some(v),
        }
    }

    fn set(&mut self, row: usize, col: usize, value: usize) {
        self.cells[row * self.n + col] = value;
    }

    /// True if every cell holds a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// True if the square is complete and every row and column is a
    /// permutation of `[1, n]`.
    #[must_use]
    pub fn is_latin(&self) -> bool {
        let n = self.n;
        let mut seen = BitVec::from_elem(n, false);
        for row in 0..n {
            seen.clear();
            for col in 0..n {
                let Some(v) = self.get(row, col) else {
                    return false;
                };
                if v > n || seen[v - 1] {
                    return false;
                }
                seen.set(v - 1, true);
            }
        }
        for col in 0..n {
            seen.clear();
            for row in 0..n {
                let Some(v) = self.get(row, col) else {
                    return false;
                };
                if v > n || seen[v - 1] {
                    return false;
                }
                seen.set(v - 1, true);
            }
        }
        true
    }

    /// The rows of the square as slices, unset cells as `0`.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.cells.chunks(self.n)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.n.to_string().len();
        for row in 0..self.n {
            for col in 0..self.n {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.get(row, col) {
                    Some(v) => write!(f, "{v:>width$}")?,
                    None => write!(f, "{:>width$}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Two squares of the same order paired cellwise, as reconstructed from an
/// orthogonal-pair instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraecoLatinSquare {
    /// The first square (variable ids `[1, n³]`).
    pub first: Square,
    /// The second square (variable ids `[n³ + 1, 2n³]`).
    pub second: Square,
}

impl GraecoLatinSquare {
    /// True if both squares are Latin and every ordered value pair occurs
    /// at exactly one cell.
    #[must_use]
    pub fn is_orthogonal(&self) -> bool {
        if !self.first.is_latin() || !self.second.is_latin() {
            return false;
        }
        let n = self.first.n();
        let mut pairs = FxHashSet::default();
        for row in 0..n {
            for col in 0..n {
                let (Some(a), Some(b)) = (self.first.get(row, col), self.second.get(row, col))
                else {
                    return false;
                };
                if !pairs.insert((a, b)) {
                    return false;
                }
            }
        }
        // n² distinct pairs over an n² pair space: all covered.
        pairs.len() == n * n
    }
}

impl fmt::Display for GraecoLatinSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.first.n();
        let width = n.to_string().len();
        for row in 0..n {
            for col in 0..n {
                if col > 0 {
                    write!(f, " ")?;
                }
                let cell = |v: Option<usize>| match v {
                    Some(v) => format!("{v:>width$}"),
                    None => format!("{:>width$}", "."),
                };
                write!(
                    f,
                    "({},{})",
                    cell(self.first.get(row, col)),
                    cell(self.second.get(row, col))
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors raised while rebuilding squares from a literal sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconstructError {
    /// A positive literal names a variable outside the mode's id range.
    LiteralOutOfRange {
        /// The offending literal.
        literal: i32,
        /// The largest valid variable id for this order and mode.
        max: usize,
    },
    /// Two positive literals assign different values to one cell.
    Conflict {
        /// Square index, `0` or `1`.
        square: usize,
        /// Row, 0-indexed.
        row: usize,
        /// Column, 0-indexed.
        col: usize,
        /// Value already in the cell, 1-indexed.
        existing: usize,
        /// Value the later literal tried to write, 1-indexed.
        incoming: usize,
    },
}

impl fmt::Display for ReconstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiteralOutOfRange { literal, max } => {
                write!(f, "literal {literal} is outside the variable range [1, {max}]")
            }
            Self::Conflict {
                square,
                row,
                col,
                existing,
                incoming,
            } => write!(
                f,
                "cell (row={row}, col={col}) of square {square} assigned both {existing} and {incoming}"
            ),
        }
    }
}

impl std::error::Error for ReconstructError {}

fn fill(squares: &mut [Square], n: usize, mode: Mode, literals: &[i32]) -> Result<(), ReconstructError> {
    for &literal in literals {
        if literal <= 0 {
            continue;
        }
        let id = literal.unsigned_abs() as usize;
        let var = Variable::decode(id, n, mode).ok_or(ReconstructError::LiteralOutOfRange {
            literal,
            max: mode.num_vars(n),
        })?;
        let value = var.val + 1;
        match squares[var.square].get(var.row, var.col) {
            None => squares[var.square].set(var.row, var.col, value),
            Some(existing) if existing == value => {}
            Some(existing) => {
                return Err(ReconstructError::Conflict {
                    square: var.square,
                    row: var.row,
                    col: var.col,
                    existing,
                    incoming: value,
                });
            }
        }
    }
    Ok(())
}

/// Rebuilds one square of order `n` from the positive literals of
/// `literals`. Negative literals are ignored; untouched cells stay unset.
///
/// # Errors
///
/// [`ReconstructError::LiteralOutOfRange`] if a positive literal exceeds
/// `n³`; [`ReconstructError::Conflict`] if two literals disagree on a cell.
pub fn reconstruct_single(n: usize, literals: &[i32]) -> Result<Square, ReconstructError> {
    let mut squares = [Square::new(n)];
    fill(&mut squares, n, Mode::Single, literals)?;
    let [square] = squares;
    Ok(square)
}

/// Rebuilds an orthogonal pair of order `n` from the positive literals of
/// `literals`.
///
/// # Errors
///
/// [`ReconstructError::LiteralOutOfRange`] if a positive literal exceeds
/// `2n³`; [`ReconstructError::Conflict`] if two literals disagree on a cell.
pub fn reconstruct_pair(n: usize, literals: &[i32]) -> Result<GraecoLatinSquare, ReconstructError> {
    let mut squares = [Square::new(n), Square::new(n)];
    fill(&mut squares, n, Mode::Orthogonal, literals)?;
    let [first, second] = squares;
    Ok(GraecoLatinSquare { first, second })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    /// Literal sequence of a full assignment: positive literals for the
    /// square's cells, negative for every other variable.
    fn full_model(n: usize, squares: &[Vec<Vec<usize>>], mode: Mode) -> Vec<i32> {
        let truths: FxHashSet<usize> = squares
            .iter()
            .enumerate()
            .flat_map(|(square, grid)| {
                grid.iter().enumerate().flat_map(move |(row, cells)| {
                    cells
                        .iter()
                        .enumerate()
                        .map(move |(col, &v)| Variable::new(square, row, col, v - 1).index(n))
                })
            })
            .collect();
        (1..=mode.num_vars(n))
            .map(|id| {
                let lit = i32::try_from(id).unwrap();
                if truths.contains(&id) { lit } else { -lit }
            })
            .collect()
    }

    fn cyclic_square(n: usize, shift: usize) -> Vec<Vec<usize>> {
        (0..n)
            .map(|r| (0..n).map(|c| (r + shift * c) % n + 1).collect())
            .collect()
    }

    #[test]
    fn round_trip_single() {
        let n = 4;
        let grid = cyclic_square(n, 1);
        let literals = full_model(n, std::slice::from_ref(&grid), Mode::Single);
        let square = reconstruct_single(n, &literals).unwrap();
        assert!(square.is_complete());
        assert!(square.is_latin());
        for (row, cells) in grid.iter().enumerate() {
            for (col, &v) in cells.iter().enumerate() {
                assert_eq!(square.get(row, col), Some(v));
            }
        }
        let rows: Vec<Vec<usize>> = square.rows().map(<[usize]>::to_vec).collect();
        assert_eq!(rows, grid);
    }

    #[test]
    fn round_trip_pair() {
        let n = 3;
        let grids = [cyclic_square(n, 1), cyclic_square(n, 2)];
        let literals = full_model(n, &grids, Mode::Orthogonal);
        let pair = reconstruct_pair(n, &literals).unwrap();
        assert!(pair.is_orthogonal());
        assert_eq!(pair.first.get(1, 2), Some((1 + 2) % 3 + 1));
        assert_eq!(pair.second.get(1, 2), Some((1 + 4) % 3 + 1));
    }

    #[test]
    fn reconstruction_is_order_independent() {
        let n = 4;
        let grid = cyclic_square(n, 1);
        let mut literals = full_model(n, std::slice::from_ref(&grid), Mode::Single);
        let expected = reconstruct_single(n, &literals).unwrap();

        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..10 {
            rng.shuffle(&mut literals);
            assert_eq!(reconstruct_single(n, &literals).unwrap(), expected);
        }
    }

    #[test]
    fn empty_model_reconstructs_unset() {
        let square = reconstruct_single(3, &[]).unwrap();
        assert!(!square.is_complete());
        assert!(!square.is_latin());
        assert_eq!(square.get(0, 0), None);

        let pair = reconstruct_pair(3, &[]).unwrap();
        assert!(!pair.is_orthogonal());
    }

    #[test]
    fn negative_literals_ignored() {
        let n = 2;
        let square = reconstruct_single(n, &[-1, -2, -3, -4, -5, -6, -7, -8]).unwrap();
        assert!(!square.is_complete());
    }

    #[test]
    fn conflict_detected() {
        let n = 2;
        // Variables 1 and 2 are values 1 and 2 of cell (0, 0).
        let err = reconstruct_single(n, &[1, 2]).unwrap_err();
        assert_eq!(
            err,
            ReconstructError::Conflict {
                square: 0,
                row: 0,
                col: 0,
                existing: 1,
                incoming: 2,
            }
        );
    }

    #[test]
    fn repeated_literal_is_not_a_conflict() {
        let square = reconstruct_single(2, &[1, 1]).unwrap();
        assert_eq!(square.get(0, 0), Some(1));
    }

    #[test]
    fn literal_out_of_range_detected() {
        let err = reconstruct_single(2, &[9]).unwrap_err();
        assert_eq!(err, ReconstructError::LiteralOutOfRange { literal: 9, max: 8 });

        // The same literal is valid in pair mode, where ids run to 2n³.
        assert!(reconstruct_pair(2, &[9]).is_ok());
    }

    #[test]
    fn partial_model_keeps_remaining_cells_unset() {
        let n = 3;
        let square = reconstruct_single(n, &[1]).unwrap();
        assert_eq!(square.get(0, 0), Some(1));
        assert_eq!(square.get(0, 1), None);
        assert_eq!(square.get(2, 2), None);
    }

    #[test]
    fn display_marks_unset_cells() {
        let square = reconstruct_single(2, &[1]).unwrap();
        assert_eq!(square.to_string(), "1 .\n. .\n");
    }

    #[test]
    fn display_pairs_cellwise() {
        let n = 2;
        let grids = [
            vec![vec![1, 2], vec![2, 1]],
            vec![vec![2, 1], vec![1, 2]],
        ];
        let literals = full_model(n, &grids, Mode::Orthogonal);
        let pair = reconstruct_pair(n, &literals).unwrap();
        assert_eq!(pair.to_string(), "(1,2) (2,1)\n(2,1) (1,2)\n");
    }

    #[test]
    fn non_latin_grid_fails_is_latin() {
        let n = 2;
        // Both cells of row 0 hold value 1.
        let square = reconstruct_single(n, &[1, 3, 6, 8]).unwrap();
        assert!(square.is_complete());
        assert!(!square.is_latin());
    }
}
