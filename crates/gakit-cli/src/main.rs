use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gakit_clifford::{BasisIndex, BasisLabel, Blade, Multivector, MultivectorInput, Sign};
use gakit_core::{blade_counts, checked_dim, checked_grade, GakitError};

#[derive(Parser)]
#[command(
    name = "gakit",
    about = "Blades and multivectors of Euclidean geometric algebra",
    long_about = "Build, combine and render blades and multivectors over n orthonormal basis vectors.\n\nMultivector operands are JSON: a flat array `[1, 2, 3, 4]`, a grade mapping\n`{\"0\": [1], \"2\": [0, 0, 4]}`, or `{\"coefficients\": [...], \"dim\": 3}`.",
    version
)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG applies otherwise
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Build a blade of one grade and render it
    Blade {
        /// Grade of the blade (0 = scalar, 1 = vector, ...)
        #[arg(long)]
        grade: i64,
        /// Dimension of the space; defaults to the smallest that fits
        #[arg(long)]
        dim: Option<i64>,
        /// Grow the blade to this dimension after building it
        #[arg(long)]
        grow: Option<i64>,
        /// Coefficients in lexicographic label order
        #[arg(allow_negative_numbers = true)]
        coeffs: Vec<f64>,
    },
    /// Build a multivector from flat coefficients, split by grade
    Flat {
        /// Dimension of the space; defaults to ceil(log2(count))
        #[arg(long)]
        dim: Option<i64>,
        #[arg(allow_negative_numbers = true)]
        coeffs: Vec<f64>,
    },
    /// Build a multivector from a JSON grade mapping (or flat form) and render it
    Map { operand: String },
    /// Negate every coefficient
    Negate { operand: String },
    /// Apply the reversion sign pattern
    Reverse { operand: String },
    /// Add two multivectors
    Add { lhs: String, rhs: String },
    /// Subtract the second multivector from the first
    Sub { lhs: String, rhs: String },
    /// Combine two basis labels given as comma-separated indices ("0,2")
    Combine {
        lhs: String,
        rhs: String,
        /// Outer product only: overlapping labels vanish
        #[arg(long)]
        wedge: bool,
    },
    /// Number of basis blades of each grade
    Counts { dim: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Blade { grade, dim, grow, coeffs } => cmd_blade(json, grade, dim, grow, coeffs),
        Commands::Flat { dim, coeffs } => {
            let dim = dim.map(checked_dim).transpose()?;
            let m = Multivector::from_flat(coeffs, dim)?;
            emit_multivector(json, &m)
        }
        Commands::Map { operand } => emit_multivector(json, &parse_operand(&operand)?),
        Commands::Negate { operand } => emit_multivector(json, &parse_operand(&operand)?.negate()),
        Commands::Reverse { operand } => emit_multivector(json, &parse_operand(&operand)?.reverse()),
        Commands::Add { lhs, rhs } => {
            let sum = parse_operand(&lhs)?.add(&parse_operand(&rhs)?);
            emit_multivector(json, &sum)
        }
        Commands::Sub { lhs, rhs } => {
            let diff = parse_operand(&lhs)?.sub(&parse_operand(&rhs)?);
            emit_multivector(json, &diff)
        }
        Commands::Combine { lhs, rhs, wedge } => cmd_combine(json, &lhs, &rhs, wedge),
        Commands::Counts { dim } => cmd_counts(json, dim),
    }
}

fn cmd_blade(json: bool, grade: i64, dim: Option<i64>, grow: Option<i64>, coeffs: Vec<f64>) -> Result<()> {
    let grade = checked_grade(grade)?;
    let dim = dim.map(checked_dim).transpose()?;
    let mut blade = Blade::new(grade, coeffs, dim).context("building blade")?;
    if let Some(target) = grow {
        blade
            .set_dim(checked_dim(target)?)
            .with_context(|| format!("growing blade to dim {target}"))?;
    }
    emit(json, &blade, || format!("{}\n{}", blade.repr(), blade))
}

#[derive(Serialize)]
struct Product {
    sign: Sign,
    label: BasisLabel,
}

fn cmd_combine(json: bool, lhs: &str, rhs: &str, wedge: bool) -> Result<()> {
    let a = parse_label(lhs).with_context(|| format!("parsing basis label {lhs:?}"))?;
    let b = parse_label(rhs).with_context(|| format!("parsing basis label {rhs:?}"))?;
    let (sign, label) = if wedge { a.wedge(&b) } else { a.combine(&b) };
    let product = Product { sign, label };
    emit(json, &product, || match product.sign {
        Sign::Zero => "0".to_string(),
        sign => format!("{}{}", sign, product.label),
    })
}

fn cmd_counts(json: bool, dim: i64) -> Result<()> {
    let counts = blade_counts(checked_dim(dim)?)?;
    emit(json, &counts, || {
        counts
            .iter()
            .enumerate()
            .map(|(grade, n)| format!("grade {grade:<3} {n}"))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn emit_multivector(json: bool, m: &Multivector) -> Result<()> {
    emit(json, m, || m.repr())
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

/// Multivector from JSON text.
fn parse_operand(text: &str) -> Result<Multivector> {
    tracing::debug!(operand = text, "parsing multivector operand");
    let value: serde_json::Value =
        serde_json::from_str(text).with_context(|| format!("operand is not valid JSON: {text}"))?;
    let input = MultivectorInput::from_json(&value)?;
    Ok(Multivector::build(input)?)
}

/// Basis label from comma-separated indices. Empty text is the scalar label.
fn parse_label(text: &str) -> gakit_core::Result<BasisLabel> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(BasisLabel::scalar());
    }
    let indices = text
        .split(',')
        .map(|part| {
            let part = part.trim();
            let value: i64 = part
                .parse()
                .map_err(|_| GakitError::type_mismatch("integer index", part))?;
            BasisIndex::try_from(value).map(BasisIndex::index)
        })
        .collect::<gakit_core::Result<Vec<_>>>()?;
    BasisLabel::new(indices)
}
