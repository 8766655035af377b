use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// A disjunction of literals. Positive `k` asserts variable `k`, negative
/// `k` asserts its negation. Most clauses produced by the encoders here are
/// binary or quaternary, so literals are kept inline where possible.
pub type Clause = SmallVec<[i32; 4]>;

/// An in-memory CNF instance: a variable count and the clause list.
///
/// `num_vars` is the count declared by the variable bijection for the
/// problem being encoded, not the largest id that happens to appear in a
/// clause. The two coincide for unconstrained problems but not, for
/// example, when every cell is pre-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    /// Number of variables declared in the DIMACS problem line.
    pub num_vars: usize,
    /// The clauses of the formula.
    pub clauses: Vec<Clause>,
}

impl Cnf {
    /// Creates an empty formula over `num_vars` variables.
    #[must_use]
    pub const fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    /// Appends one clause. Clauses are never empty by construction; this is
    /// asserted in debug builds.
    pub fn push(&mut self, clause: Clause) {
        debug_assert!(!clause.is_empty(), "empty clause pushed");
        self.clauses.push(clause);
    }

    /// Appends every clause produced by `iter`.
    pub fn extend<I: IntoIterator<Item = Clause>>(&mut self, iter: I) {
        for clause in iter {
            self.push(clause);
        }
    }

    /// Number of clauses currently in the formula.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Iterates over the clauses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Evaluates the formula under an assignment given as a set of true
    /// variable ids (everything absent is false). Used by tests and by
    /// callers that want to sanity-check a model against the formula.
    #[must_use]
    pub fn is_satisfied_by(&self, true_vars: &FxHashSet<usize>) -> bool {
        self.clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                let var = lit.unsigned_abs() as usize;
                (lit > 0) == true_vars.contains(&var)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;
    use smallvec::smallvec;

    #[test]
    fn push_and_count() {
        let mut cnf = Cnf::new(3);
        cnf.push(smallvec![1, -2]);
        cnf.push(smallvec![2, 3]);
        assert_eq!(cnf.num_clauses(), 2);
        assert_eq!(cnf.num_vars, 3);
    }

    #[test]
    fn satisfaction_check() {
        let mut cnf = Cnf::new(3);
        cnf.push(smallvec![1, -2]);
        cnf.push(smallvec![2, 3]);

        let model: FxHashSet<usize> = [1, 3].into_iter().collect();
        assert!(cnf.is_satisfied_by(&model));

        let model: FxHashSet<usize> = [2].into_iter().collect();
        assert!(!cnf.is_satisfied_by(&model));
    }
}
