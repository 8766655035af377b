//! The bijection between `(square, row, col, val)` and SAT variable ids.
//!
//! Variable ids are `row * n² + col * n + val + 1`, offset by `n³` for the
//! second square of an orthogonal pair. The mapping is total onto
//! `[1, n³]` (single square) or `[1, 2n³]` (pair), and its inverse is
//! closed-form arithmetic on the id alone.

/// Whether a problem encodes one Latin square or an orthogonal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// One Latin square over variables `[1, n³]`.
    Single,
    /// Two Latin squares with orthogonality constraints, over `[1, 2n³]`.
    Orthogonal,
}

impl Mode {
    /// Number of squares encoded in this mode.
    #[must_use]
    pub const fn squares(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Orthogonal => 2,
        }
    }

    /// Total variable count for order `n`. This is the count the DIMACS
    /// header declares, independent of which ids actually occur in clauses.
    #[must_use]
    pub const fn num_vars(self, n: usize) -> usize {
        self.squares() * n * n * n
    }
}

/// One propositional variable: "cell `(row, col)` of square `square` holds
/// value `val`". All fields are 0-indexed; `square` is `0` in single mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    /// Square index, `0` or `1`.
    pub square: usize,
    /// Row, in `[0, n)`.
    pub row: usize,
    /// Column, in `[0, n)`.
    pub col: usize,
    /// Value, in `[0, n)`; the cell content is `val + 1`.
    pub val: usize,
}

impl Variable {
    /// Creates a variable for the given cell and value.
    #[must_use]
    pub const fn new(square: usize, row: usize, col: usize, val: usize) -> Self {
        Self {
            square,
            row,
            col,
            val,
        }
    }

    /// The 1-based variable id for order `n`.
    #[must_use]
    pub const fn index(self, n: usize) -> usize {
        self.row * n * n + self.col * n + self.val + 1 + self.square * n * n * n
    }

    /// The positive literal for this variable. Orders accepted by the
    /// encoder keep every id within `i32`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub const fn literal(self, n: usize) -> i32 {
        self.index(n) as i32
    }

    /// Inverts [`Variable::index`]: recovers the variable from a 1-based id.
    ///
    /// Returns `None` if `id` is zero or beyond the variable range of the
    /// mode, so callers can reject literals that cannot belong to the
    /// problem.
    #[must_use]
    pub const fn decode(id: usize, n: usize, mode: Mode) -> Option<Self> {
        if id == 0 || id > mode.num_vars(n) {
            return None;
        }
        let cube = n * n * n;
        let zero_based = id - 1;
        let square = zero_based / cube;
        let within = zero_based % cube;
        Some(Self {
            square,
            row: within / (n * n),
            col: (within % (n * n)) / n,
            val: within % n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_formula() {
        let n = 4;
        assert_eq!(Variable::new(0, 0, 0, 0).index(n), 1);
        assert_eq!(Variable::new(0, 0, 0, 3).index(n), 4);
        assert_eq!(Variable::new(0, 0, 1, 0).index(n), 5);
        assert_eq!(Variable::new(0, 1, 0, 0).index(n), 17);
        assert_eq!(Variable::new(0, 3, 3, 3).index(n), 64);
        assert_eq!(Variable::new(1, 0, 0, 0).index(n), 65);
        assert_eq!(Variable::new(1, 3, 3, 3).index(n), 128);
    }

    #[test]
    fn num_vars_per_mode() {
        for n in 1..=10 {
            assert_eq!(Mode::Single.num_vars(n), n * n * n);
            assert_eq!(Mode::Orthogonal.num_vars(n), 2 * n * n * n);
        }
    }

    #[test]
    fn bijection_single_mode() {
        let n = 3;
        let mut seen = vec![false; Mode::Single.num_vars(n)];
        for row in 0..n {
            for col in 0..n {
                for val in 0..n {
                    let var = Variable::new(0, row, col, val);
                    let id = var.index(n);
                    assert!((1..=Mode::Single.num_vars(n)).contains(&id));
                    assert!(!seen[id - 1], "id {id} produced twice");
                    seen[id - 1] = true;
                    assert_eq!(Variable::decode(id, n, Mode::Single), Some(var));
                }
            }
        }
        assert!(seen.iter().all(|&s| s), "mapping is not onto [1, n^3]");
    }

    #[test]
    fn bijection_orthogonal_mode() {
        let n = 3;
        let total = Mode::Orthogonal.num_vars(n);
        for id in 1..=total {
            let var = Variable::decode(id, n, Mode::Orthogonal).unwrap();
            assert!(var.square < 2 && var.row < n && var.col < n && var.val < n);
            assert_eq!(var.index(n), id);
        }
    }

    #[test]
    fn decode_rejects_out_of_range() {
        assert_eq!(Variable::decode(0, 3, Mode::Single), None);
        assert_eq!(Variable::decode(28, 3, Mode::Single), None);
        assert!(Variable::decode(28, 3, Mode::Orthogonal).is_some());
        assert_eq!(Variable::decode(55, 3, Mode::Orthogonal), None);
    }
}
