//! vgroup - grouped variant expander
//!
//! Rewrites `variant:(a,b)` shorthand into `variant:a variant:b` in files,
//! directories or stdin.

mod commands;
mod config;
mod repl;

use clap::{Parser, Subcommand};
use colored::Colorize;
use config::Config;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vgroup_core::Transformer;

#[derive(Parser)]
#[command(name = "vgroup")]
#[command(about = "Expand grouped variant shorthand in utility-class markup")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, env = "VGROUP_CONFIG")]
    config: Option<PathBuf>,

    /// Character separating a variant from its body
    #[arg(long)]
    variant_char: Option<char>,

    /// Character opening a group
    #[arg(long)]
    open_char: Option<char>,

    /// Character closing a group
    #[arg(long)]
    close_char: Option<char>,

    /// Character separating items within a group
    #[arg(long)]
    separator_char: Option<char>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand files, directories or stdin
    Expand {
        /// Files or directories (stdin if omitted)
        paths: Vec<PathBuf>,

        /// Rewrite changed files in place instead of printing
        #[arg(short, long)]
        write: bool,
    },

    /// List inputs that contain expandable groups (exit code 1 if any)
    Check {
        /// Files or directories (stdin if omitted)
        paths: Vec<PathBuf>,
    },

    /// Print resolved group spans as JSON
    Matches {
        /// Files or directories (stdin if omitted)
        paths: Vec<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Start interactive REPL
    Repl,

    /// Print the effective configuration as YAML
    Config,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        let transform = &mut config.transform;
        if let Some(c) = self.variant_char {
            transform.variant_char = c;
        }
        if let Some(c) = self.open_char {
            transform.expand_open_char = c;
        }
        if let Some(c) = self.close_char {
            transform.expand_close_char = c;
        }
        if let Some(c) = self.separator_char {
            transform.separator_char = c;
        }
    }
}

fn main() {
    // Logs go to stderr; stdout carries expanded text.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = &cli.config {
        tracing::debug!(path = %path.display(), "loaded config");
    }
    cli.apply_overrides(&mut config);
    config.validate()?;

    let transformer = Transformer::new(config.transform)?;

    match cli.command {
        Commands::Expand { paths, write } => {
            let inputs = commands::collect_inputs(&paths, &config.files)?;
            if write && inputs.contains(&commands::Input::Stdin) {
                return Err("--write needs file or directory paths".into());
            }

            let mut stdout = std::io::stdout().lock();
            let report = commands::expand(&transformer, &inputs, write, &mut stdout)?;
            stdout.flush()?;
            if write {
                eprintln!(
                    "{} {} of {} file(s)",
                    "Rewrote".green(),
                    report.changed.len(),
                    report.scanned
                );
            }
        }

        Commands::Check { paths } => {
            let inputs = commands::collect_inputs(&paths, &config.files)?;
            let report = commands::check(&transformer, &inputs)?;

            if report.changed.is_empty() {
                eprintln!(
                    "{} {} input(s) scanned, nothing to expand",
                    "OK".green(),
                    report.scanned
                );
                return Ok(0);
            }

            for label in &report.changed {
                println!("{}", label.yellow());
            }
            eprintln!(
                "{} {} of {} input(s) contain grouped variants",
                "Found".yellow(),
                report.changed.len(),
                report.scanned
            );
            return Ok(1);
        }

        Commands::Matches { paths, pretty } => {
            let inputs = commands::collect_inputs(&paths, &config.files)?;
            let mut stdout = std::io::stdout().lock();
            commands::matches(&transformer, &inputs, pretty, &mut stdout)?;
            stdout.flush()?;
        }

        Commands::Repl => repl::run(&transformer)?,

        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(0)
}
