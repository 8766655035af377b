#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Latin square and Graeco-Latin square problems as SAT instances.

/// The `variable` module defines the bijection between cells and SAT
/// variable ids.
pub mod variable;

/// The `encode` module generates the CNF constraints for one square or an
/// orthogonal pair, including pre-assigned cells.
pub mod encode;

/// The `square` module reconstructs squares from a solver's literal
/// sequence and checks their combinatorial properties.
pub mod square;
