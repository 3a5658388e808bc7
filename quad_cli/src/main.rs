//! # Quadstep CLI Application
//!
//! Terminal front end for quad_core: reads three coefficients (from flags or
//! interactively), solves, and prints both step sequences and the
//! verification, or the full report as JSON.
//!
//! ```text
//! quad_cli -a 2 -b 7 -c 3
//! quad_cli -a sqrt2 -b 7 -c 5sqrt2 --json
//! quad_cli --domain float --epsilon 1e-12 -a 1 -b -0.2 -c 0.01
//! ```

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use env_logger::Env;
use log::{debug, LevelFilter};

use quad_core::solver::{solve_outcome, SolveInput, SolveOutcome, SolveReport};
use quad_core::steps::StepSequence;
use quad_core::{DomainKind, SolverSettings};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DomainArg {
    Exact,
    Float,
}

impl From<DomainArg> for DomainKind {
    fn from(arg: DomainArg) -> Self {
        match arg {
            DomainArg::Exact => DomainKind::Exact,
            DomainArg::Float => DomainKind::Float,
        }
    }
}

/// Step-by-step solutions of a·x^2 + b·x + c = 0
#[derive(Parser, Debug)]
#[command(
    name = "quad_cli",
    version,
    about = "Step-by-step solutions of quadratic equations",
    after_help = r#"
Coefficients accept integers, decimals, fractions and radicals:
  2, -0.5, 1/3, sqrt2, √3, 2sqrt(3)/3, (1 + sqrt5)/2

Without -a/-b/-c the coefficients are read interactively.
RUST_LOG overrides the log level set by -v.
"#
)]
struct Cli {
    /// Coefficient of x^2
    #[arg(short, allow_hyphen_values = true)]
    a: Option<String>,

    /// Coefficient of x
    #[arg(short, allow_hyphen_values = true)]
    b: Option<String>,

    /// Constant term
    #[arg(short, allow_hyphen_values = true)]
    c: Option<String>,

    /// Numeric domain to solve in
    #[arg(long, value_enum)]
    domain: Option<DomainArg>,

    /// Largest divisor tried by the integer split search
    #[arg(long)]
    search_bound: Option<u64>,

    /// Relative tolerance for floating-point comparisons
    #[arg(long)]
    epsilon: Option<f64>,

    /// Fail instead of reporting complex roots
    #[arg(long)]
    real_only: bool,

    /// Skip the denominator-rationalization steps
    #[arg(long)]
    no_rationalize: bool,

    /// Solver settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn load_settings(path: &Path) -> Result<SolverSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings: SolverSettings =
        toml::from_str(&text).with_context(|| format!("invalid settings file {}", path.display()))?;
    Ok(settings)
}

/// Settings file first, then command-line overrides
fn build_settings(cli: &Cli) -> Result<SolverSettings> {
    let mut settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => SolverSettings::default(),
    };
    if let Some(domain) = cli.domain {
        settings.domain = domain.into();
    }
    if let Some(bound) = cli.search_bound {
        settings.search_bound = bound;
    }
    if let Some(epsilon) = cli.epsilon {
        settings.epsilon = epsilon;
    }
    if cli.real_only {
        settings.allow_complex = false;
    }
    if cli.no_rationalize {
        settings.rationalize = false;
    }
    settings.validate()?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn prompt_text(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn read_input(cli: &Cli) -> SolveInput {
    let defaults = SolveInput::default();
    if cli.a.is_none() && cli.b.is_none() && cli.c.is_none() {
        println!("Quadstep - a·x^2 + b·x + c = 0");
        println!("==============================");
        println!();
        return SolveInput::new(
            prompt_text(&format!("Enter a [{}]: ", defaults.a), &defaults.a),
            prompt_text(&format!("Enter b [{}]: ", defaults.b), &defaults.b),
            prompt_text(&format!("Enter c [{}]: ", defaults.c), &defaults.c),
        );
    }
    // Omitted coefficients on the command line are zero
    SolveInput::new(
        cli.a.clone().unwrap_or_default(),
        cli.b.clone().unwrap_or_default(),
        cli.c.clone().unwrap_or_default(),
    )
}

fn print_sequence(index: usize, sequence: &StepSequence) {
    println!("Method {}: {}", index, sequence.method.display_name());
    println!("───────────────────────────────────────");
    for (n, step) in sequence.steps.iter().enumerate() {
        println!("{:>3}. {}", n + 1, step.kind.title());
        println!("     {}", step.narrative);
        for expression in &step.expressions {
            println!("         {}", expression);
        }
    }
    println!();
}

fn print_report(report: &SolveReport) {
    println!("═══════════════════════════════════════");
    println!("  {}", report.equation);
    println!("═══════════════════════════════════════");
    println!();
    println!("Domain:        {}", report.domain.display_name());
    if report.used_float_fallback {
        println!("               (an exact value had no closed form; solved numerically)");
    }
    println!("Discriminant:  {} ≈ {}", report.discriminant.text, report.discriminant.approx);
    println!("Roots:         {}", report.answer());
    println!();

    match &report.factorization {
        Some(steps) => print_sequence(1, steps),
        None => {
            println!("Method 1: Splitting the middle term");
            println!("───────────────────────────────────────");
            for issue in report.issues.iter().filter(|issue| issue.error_code() == "FACTORIZATION_NOT_FOUND") {
                println!("     {}", issue);
            }
            println!();
        }
    }
    print_sequence(2, &report.formula);

    println!("Verification");
    println!("───────────────────────────────────────");
    for result in &report.verification {
        let mark = if result.passed { "✓" } else { "✗" };
        println!("  x = {}", result.root);
        println!("     {}", result.substitution);
        println!("     = {}", result.partial);
        println!("     = {}   {}", result.value, mark);
    }
    println!();

    if report.passes() {
        println!("Status: ✓ SOLVED");
    } else {
        println!("Status: ✗ VERIFICATION FAILED");
        for issue in report.issues.iter().filter(|issue| issue.error_code() == "VERIFICATION_MISMATCH") {
            println!("  {}", issue);
        }
    }
}

fn print_outcome(outcome: &SolveOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    match &outcome.report {
        Some(report) => print_report(report),
        None => eprintln!("Error: {}", outcome.message),
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<bool> {
    let settings = build_settings(cli)?;
    let input = read_input(cli);
    debug!("input: {:?}", input);

    let outcome = solve_outcome(&input, &settings);
    print_outcome(&outcome, cli.json)?;
    Ok(outcome.success && outcome.report.as_ref().is_some_and(SolveReport::passes))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(Env::default())
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("quad_cli").chain(args.iter().copied()))
    }

    #[test]
    fn test_negative_coefficients_parse() {
        let cli = parse(&["-a", "1", "-b", "-5", "-c", "6"]);
        assert_eq!(cli.b.as_deref(), Some("-5"));
        let input = read_input(&cli);
        assert_eq!(input, SolveInput::default());
    }

    #[test]
    fn test_flag_overrides() {
        let cli = parse(&["--domain", "float", "--search-bound", "50", "--real-only", "--no-rationalize"]);
        let settings = build_settings(&cli).unwrap();
        assert_eq!(settings.domain, DomainKind::Float);
        assert_eq!(settings.search_bound, 50);
        assert!(!settings.allow_complex);
        assert!(!settings.rationalize);
    }

    #[test]
    fn test_invalid_epsilon_is_rejected() {
        let cli = parse(&["--epsilon", "0"]);
        assert!(build_settings(&cli).is_err());
    }

    #[test]
    fn test_oversized_search_bound_is_rejected() {
        let cli = parse(&["--search-bound", "18446744073709551615"]);
        let err = build_settings(&cli).unwrap_err();
        assert!(err.to_string().contains("search_bound"));
    }

    #[test]
    fn test_settings_file() {
        let path = std::env::temp_dir().join(format!("quad_cli_settings_{}.toml", std::process::id()));
        fs::write(&path, "domain = \"Float\"\nsearch_bound = 25\n").unwrap();
        let settings = load_settings(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(settings.domain, DomainKind::Float);
        assert_eq!(settings.search_bound, 25);
        assert!(settings.allow_complex);
    }

    #[test]
    fn test_missing_settings_file() {
        let err = load_settings(Path::new("/nonexistent/quad_cli.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read settings file"));
    }
}
