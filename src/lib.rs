#![deny(missing_docs)]
//! This crate encodes Latin square and Graeco-Latin (orthogonal Latin) square
//! problems as CNF formulas in DIMACS format, and decodes satisfying
//! assignments produced by an external SAT solver back into squares.

/// The `cnf` module holds the formula representation and its text I/O:
/// DIMACS serialization and solver-output parsing.
pub mod cnf;

/// The `latin` module holds the combinatorial core: the variable bijection,
/// the clause generators, and square reconstruction.
pub mod latin;
