//! Interactive REPL.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use vgroup_core::Transformer;

const HELP_TEXT: &str = r#"
Type any text to see it expanded.

Available commands:
  :help                 Show this help
  :matches <text>       Show the resolved spans of <text>
  :options              Show the active delimiters
  :quit, :exit, :q      Exit the REPL
"#;

pub fn run(transformer: &Transformer) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "vgroup REPL".bold().cyan());

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(config)?;

    let history_path = home::home_dir()
        .map(|h| h.join(".vgroup_history"))
        .unwrap_or_else(|| PathBuf::from(".vgroup_history"));
    let _ = rl.load_history(&history_path);

    println!("Type ':help' for available commands.\n");

    loop {
        let prompt = format!("{} ", "vgroup>".cyan());
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                match execute_repl_line(transformer, &line) {
                    Ok(Some(output)) => println!("{}\n", output),
                    Ok(None) => break,
                    Err(e) => println!("{}: {}\n", "Error".red(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                println!("{}: {:?}", "Error".red(), err);
                break;
            }
        }
    }

    let _ = rl.save_history(&history_path);

    Ok(())
}

/// Runs one REPL line. `Ok(None)` means exit.
fn execute_repl_line(
    transformer: &Transformer,
    line: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Ok(Some(format_expansion(transformer, line)));
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .unwrap_or((command, ""));

    match name.to_lowercase().as_str() {
        "help" | "?" => Ok(Some(HELP_TEXT.to_string())),

        "quit" | "exit" | "q" => Ok(None),

        "options" | "o" => {
            let options = transformer.options();
            Ok(Some(format!(
                "variant {}  open {}  close {}  separator {}",
                options.variant_char.to_string().yellow(),
                options.expand_open_char.to_string().yellow(),
                options.expand_close_char.to_string().yellow(),
                options.separator_char.to_string().yellow(),
            )))
        }

        "matches" | "m" => {
            if rest.is_empty() {
                return Ok(Some("Usage: :matches <text>".to_string()));
            }
            let matches = transformer.find_matches(rest);
            if matches.is_empty() {
                return Ok(Some("No groups".yellow().to_string()));
            }
            Ok(Some(serde_json::to_string_pretty(&matches)?))
        }

        _ => Ok(Some(format!(
            "Unknown command: {}. Type ':help' for available commands.",
            name
        ))),
    }
}

fn format_expansion(transformer: &Transformer, line: &str) -> String {
    let expanded = transformer.transform(line);
    if expanded == line {
        line.dimmed().to_string()
    } else {
        expanded.green().to_string()
    }
}
