#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A serializer for the DIMACS CNF (Conjunctive Normal Form) file format.
//!
//! The DIMACS CNF format is the standard text interchange format consumed by
//! SAT solvers:
//! - A problem line `p cnf <num_variables> <num_clauses>`.
//! - One line per clause: space-separated literals (positive for the
//!   variable, negative for its negation) terminated by a `0`.
//!
//! This module only writes the format; the solver consuming the file is an
//! external black box. The inverse direction (reading the solver's *model*)
//! lives in [`crate::cnf::solution`].

use crate::cnf::formula::Cnf;
use itertools::Itertools;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes `cnf` in DIMACS format to `writer`.
///
/// The problem line declares `cnf.num_vars` and the exact number of clause
/// lines that follow; the two never disagree because both come from the same
/// instance.
///
/// # Errors
///
/// Returns any I/O error raised by the underlying writer.
pub fn write_dimacs<W: Write>(cnf: &Cnf, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "p cnf {} {}", cnf.num_vars, cnf.num_clauses())?;
    for clause in cnf.iter() {
        writeln!(writer, "{} 0", clause.iter().join(" "))?;
    }
    Ok(())
}

/// Serializes `cnf` to a DIMACS string.
#[must_use]
pub fn to_dimacs_string(cnf: &Cnf) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec<u8> cannot fail.
    write_dimacs(cnf, &mut buf).unwrap_or_default();
    String::from_utf8(buf).unwrap_or_default()
}

/// Writes `cnf` in DIMACS format to the file at `path`, creating or
/// truncating it.
///
/// # Errors
///
/// Returns any I/O error from opening or writing the file.
pub fn write_file<P: AsRef<Path>>(cnf: &Cnf, path: P) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_dimacs(cnf, &mut writer)?;
    writer.flush()
}
