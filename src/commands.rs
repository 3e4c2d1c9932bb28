//! Command execution.

use crate::config::FilesConfig;
use serde::Serialize;
use std::borrow::Cow;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use vgroup_core::{Match, Transformer};
use walkdir::WalkDir;

/// Where a command reads its text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    pub fn label(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String, Box<dyn std::error::Error>> {
        match self {
            Input::Stdin => {
                let mut content = String::new();
                std::io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
            Input::File(path) => std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read '{}': {}", path.display(), e).into()),
        }
    }
}

/// Resolves command-line paths into inputs.
///
/// No paths means stdin. Files are taken as given; directories are walked
/// and filtered by the configured extensions.
pub fn collect_inputs(
    paths: &[PathBuf],
    files: &FilesConfig,
) -> Result<Vec<Input>, Box<dyn std::error::Error>> {
    if paths.is_empty() {
        return Ok(vec![Input::Stdin]);
    }

    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path) {
                let entry = entry?;
                if entry.file_type().is_file() && files.accepts(entry.path()) {
                    found.push(entry.into_path());
                }
            }
            found.sort();
            tracing::debug!(dir = %path.display(), files = found.len(), "walked directory");
            inputs.extend(found.into_iter().map(Input::File));
        } else {
            inputs.push(Input::File(path.clone()));
        }
    }

    Ok(inputs)
}

/// Outcome of a command over a set of inputs.
#[derive(Debug, Default)]
pub struct Report {
    /// Inputs scanned.
    pub scanned: usize,
    /// Inputs whose text expands to something different.
    pub changed: Vec<String>,
}

/// Expands every input. Output goes to `out`, or back to each changed file
/// when `write` is set.
pub fn expand(
    transformer: &Transformer,
    inputs: &[Input],
    write: bool,
    out: &mut dyn Write,
) -> Result<Report, Box<dyn std::error::Error>> {
    let mut report = Report::default();

    for input in inputs {
        let content = input.read()?;
        let expanded = transformer.transform(&content);
        report.scanned += 1;

        let changed = matches!(expanded, Cow::Owned(_));
        if changed {
            report.changed.push(input.label());
        }

        match input {
            Input::File(path) if write => {
                if changed {
                    write_file(path, &expanded)?;
                    tracing::info!(path = %path.display(), "rewrote file");
                }
            }
            _ => out.write_all(expanded.as_bytes())?,
        }
    }

    Ok(report)
}

fn write_file(path: &Path, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, content)
        .map_err(|e| format!("failed to write '{}': {}", path.display(), e).into())
}

/// Scans every input without writing anything.
pub fn check(
    transformer: &Transformer,
    inputs: &[Input],
) -> Result<Report, Box<dyn std::error::Error>> {
    let mut report = Report::default();

    for input in inputs {
        let content = input.read()?;
        report.scanned += 1;
        if !transformer.find_matches(&content).is_empty() {
            report.changed.push(input.label());
        }
    }

    Ok(report)
}

#[derive(Debug, Serialize)]
struct InputMatches {
    source: String,
    matches: Vec<Match>,
}

/// Writes the resolved spans of every input as JSON, one document per input.
pub fn matches(
    transformer: &Transformer,
    inputs: &[Input],
    pretty: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    for input in inputs {
        let content = input.read()?;
        let entry = InputMatches {
            source: input.label(),
            matches: transformer.find_matches(&content),
        };

        let json = if pretty {
            serde_json::to_string_pretty(&entry)?
        } else {
            serde_json::to_string(&entry)?
        };
        writeln!(out, "{}", json)?;
    }

    Ok(())
}
