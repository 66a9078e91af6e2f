//! sqlcase — render CASE definitions from the command line
//!
//! # Usage
//!
//! ```bash
//! # Show SQL, bindings and the literal form
//! sqlcase render payment_status.toml
//!
//! # Machine-readable
//! sqlcase render payment_status.json --format json
//!
//! # Only validate the call order
//! sqlcase check payment_status.toml
//! ```

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use sqlcase::prelude::*;
use sqlcase::CaseDefinition;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlcase")]
#[command(version)]
#[command(about = "Render SQL CASE WHEN expressions from TOML or JSON definitions", long_about = None)]
#[command(after_help = "EXAMPLES:
    sqlcase render status.toml
    sqlcase render status.json --format json
    cat status.toml | sqlcase render - --input toml --raw-only")]
struct Cli {
    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a definition to SQL
    Render {
        /// Definition file, or `-` for stdin
        file: String,

        /// Definition syntax (inferred from the extension when omitted)
        #[arg(short, long, value_enum)]
        input: Option<InputFormat>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Print only the literal rendering
        #[arg(long)]
        raw_only: bool,
    },
    /// Validate a definition without printing SQL
    Check {
        /// Definition file, or `-` for stdin
        file: String,

        #[arg(short, long, value_enum)]
        input: Option<InputFormat>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    Toml,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sqlcase=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Render {
            file,
            input,
            format,
            raw_only,
        } => {
            let case = load(file, *input)?;
            render(&case, *format, *raw_only)
        }
        Commands::Check { file, input } => {
            let case = load(file, *input)?;
            // Rendering is what checks the WHEN/THEN balance.
            case.to_sql()?;
            println!(
                "{} {} WHEN/THEN pair(s){}",
                "✓".green(),
                case.when_count(),
                if case.has_else() { " + ELSE" } else { "" }
            );
            Ok(())
        }
    }
}

fn load(file: &str, input: Option<InputFormat>) -> Result<CaseBuilder> {
    let content = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read file '{}'", file))?
    };

    let input = input.unwrap_or_else(|| infer_format(file));
    tracing::debug!(file, "loading CASE definition");

    let definition = match input {
        InputFormat::Toml => CaseDefinition::from_toml_str(&content)?,
        InputFormat::Json => CaseDefinition::from_json_str(&content)?,
    };
    Ok(definition.into_builder()?)
}

fn infer_format(file: &str) -> InputFormat {
    match Path::new(file).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
        _ => InputFormat::Toml,
    }
}

fn render(case: &CaseBuilder, format: OutputFormat, raw_only: bool) -> Result<()> {
    let compiled = case.to_sql()?;
    let raw = case.to_raw()?;

    match format {
        OutputFormat::Json => {
            let out = if raw_only {
                serde_json::json!({ "raw": raw })
            } else {
                serde_json::json!({
                    "sql": compiled.sql,
                    "bindings": compiled.bindings,
                    "raw": raw,
                })
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text if raw_only => println!("{}", raw),
        OutputFormat::Text => {
            println!("{}", "SQL:".green().bold());
            println!("  {}", compiled.sql.white());

            if !compiled.bindings.is_empty() {
                println!();
                println!("{}", "Bindings:".cyan());
                for (i, binding) in compiled.bindings.iter().enumerate() {
                    println!("  {} = {}", format!("#{}", i + 1).dimmed(), binding.to_string().yellow());
                }
            }

            println!();
            println!("{}", "Literal:".green().bold());
            println!("  {}", raw.white());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_format_from_extension() {
        assert!(matches!(infer_format("status.json"), InputFormat::Json));
        assert!(matches!(infer_format("defs/status.JSON"), InputFormat::Json));
        assert!(matches!(infer_format("status.toml"), InputFormat::Toml));
    }

    #[test]
    fn test_infer_format_defaults_to_toml() {
        assert!(matches!(infer_format("status"), InputFormat::Toml));
        assert!(matches!(infer_format("-"), InputFormat::Toml));
        assert!(matches!(infer_format("status.json.bak"), InputFormat::Toml));
    }
}
