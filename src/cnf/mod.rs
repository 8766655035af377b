#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! CNF formula representation and the text formats it crosses process
//! boundaries in: DIMACS on the way out, solver models on the way back.

/// The `formula` module defines clauses and the in-memory CNF instance.
pub mod formula;

/// The `dimacs` module serializes a CNF instance to the DIMACS text format.
pub mod dimacs;

/// The `solution` module parses a SAT solver's output file into a flat
/// sequence of literals.
pub mod solution;
