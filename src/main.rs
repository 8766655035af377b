//! # latin-sat
//!
//! `latin-sat` is a command-line encoder/decoder that turns Latin square and
//! Graeco-Latin (orthogonal Latin) square problems into CNF formulas in
//! DIMACS format, and turns a SAT solver's output back into squares. The
//! solver itself is external: the contract is a DIMACS file going out and a
//! model file coming back.
//!
//! ## Usage
//!
//! ```sh
//! # Encode a single 9x9 Latin square problem
//! latin-sat encode --order 9 --output latin.cnf
//!
//! # Encode a 4x4 Graeco-Latin pair with two pre-assigned cells
//! latin-sat encode --order 4 --graeco --fixed 1,1,1,2 --fixed 2,2,3,1 --output graeco.cnf
//!
//! # Decode the solver's output back into a square
//! latin-sat decode --order 9 --model latin.out
//!
//! # Decode an orthogonal pair
//! latin-sat decode --order 4 --graeco --model graeco.out
//! ```
//!
//! Pre-assignments are 1-indexed `row,col,value` triples (single mode) or
//! `row,col,value1,value2` quadruples (`--graeco`). An invalid
//! pre-assignment aborts encoding before any file is written.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use latin_sat::cnf::{dimacs, solution};
use latin_sat::latin::encode::{CellFix, PairFix, graeco_cnf, latin_cnf};
use latin_sat::latin::square::{reconstruct_pair, reconstruct_single};
use std::path::PathBuf;

/// Defines the command-line interface for the encoder/decoder.
#[derive(Parser, Debug)]
#[command(
    name = "latin-sat",
    version,
    about = "Latin and Graeco-Latin square SAT encoder/decoder"
)]
struct Cli {
    /// The subcommand to execute.
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a square problem as a DIMACS CNF file.
    Encode {
        /// Order of the square(s); the grid is order x order.
        #[arg(short = 'n', long)]
        order: usize,

        /// Encode an orthogonal pair instead of a single square.
        #[arg(short, long, default_value_t = false)]
        graeco: bool,

        /// Pre-assigned cell, 1-indexed: "row,col,value" or, with --graeco,
        /// "row,col,value1,value2". May be repeated.
        #[arg(short, long = "fixed", value_name = "CELL")]
        fixed: Vec<String>,

        /// Path of the DIMACS file to write.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decode a SAT solver's output file into square(s).
    Decode {
        /// Order of the square(s) the model was solved for.
        #[arg(short = 'n', long)]
        order: usize,

        /// Decode an orthogonal pair instead of a single square.
        #[arg(short, long, default_value_t = false)]
        graeco: bool,

        /// Path of the solver output file to read.
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn parse_fields(raw: &str) -> Result<Vec<usize>> {
    raw.split(',')
        .map(|field| {
            field
                .trim()
                .parse::<usize>()
                .with_context(|| format!("invalid pre-assignment field '{field}' in '{raw}'"))
        })
        .collect()
}

fn parse_cell_fix(raw: &str) -> Result<CellFix> {
    match parse_fields(raw)?.as_slice() {
        &[row, col, value] => Ok(CellFix::new(row, col, value)),
        fields => bail!(
            "expected 'row,col,value' but got {} fields in '{raw}'",
            fields.len()
        ),
    }
}

fn parse_pair_fix(raw: &str) -> Result<PairFix> {
    match parse_fields(raw)?.as_slice() {
        &[row, col, first, second] => Ok(PairFix::new(row, col, first, second)),
        fields => bail!(
            "expected 'row,col,value1,value2' but got {} fields in '{raw}'",
            fields.len()
        ),
    }
}

fn encode(order: usize, graeco: bool, fixed: &[String], output: &PathBuf) -> Result<()> {
    let cnf = if graeco {
        let fixes = fixed
            .iter()
            .map(|s| parse_pair_fix(s))
            .collect::<Result<Vec<_>>>()?;
        graeco_cnf(order, &fixes)?
    } else {
        let fixes = fixed
            .iter()
            .map(|s| parse_cell_fix(s))
            .collect::<Result<Vec<_>>>()?;
        latin_cnf(order, &fixes)?
    };

    dimacs::write_file(&cnf, output)
        .with_context(|| format!("unable to write {}", output.display()))?;
    println!(
        "wrote {} ({} variables, {} clauses)",
        output.display(),
        cnf.num_vars,
        cnf.num_clauses()
    );
    Ok(())
}

fn decode(order: usize, graeco: bool, model: &PathBuf) -> Result<()> {
    let literals = solution::parse_solution_file(model)
        .with_context(|| format!("unable to parse {}", model.display()))?;

    if graeco {
        let pair = reconstruct_pair(order, &literals)?;
        println!("First square:\n{}", pair.first);
        println!("Second square:\n{}", pair.second);
        println!("Graeco-Latin square (combined):\n{pair}");
        if !pair.is_orthogonal() {
            println!("note: the reconstructed pair is incomplete or not orthogonal");
        }
    } else {
        let square = reconstruct_single(order, &literals)?;
        println!("Latin square:\n{square}");
        if !square.is_latin() {
            println!("note: the reconstructed square is incomplete or not Latin");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            order,
            graeco,
            fixed,
            output,
        } => encode(order, graeco, &fixed, &output),
        Commands::Decode {
            order,
            graeco,
            model,
        } => decode(order, graeco, &model),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_fix() {
        let fix = parse_cell_fix("1,2,3").unwrap();
        assert_eq!(fix, CellFix::new(1, 2, 3));
        assert!(parse_cell_fix("1,2").is_err());
        assert!(parse_cell_fix("1,2,x").is_err());
    }

    #[test]
    fn test_parse_pair_fix() {
        let fix = parse_pair_fix("1, 2, 3, 4").unwrap();
        assert_eq!(fix, PairFix::new(1, 2, 3, 4));
        assert!(parse_pair_fix("1,2,3").is_err());
    }
}
