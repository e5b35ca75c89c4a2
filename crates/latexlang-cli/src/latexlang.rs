use clap::{Parser, ValueEnum};
use colored::Colorize;
use latexlang::error::{Diagnostic, Severity};
use latexlang::label::Labels;
use latexlang::output::tree::{self, Node, Tree};
use latexlang::vm::Interpreter;
use latexlang::Config;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Latexlang translates LaTeX-style documents into HTML.
/// See the subcommands for things it can do.
///
/// Set `RUST_LOG=latexlang=debug` to see what the interpreter is doing.
#[derive(Parser)]
#[clap(version)]
struct Cli {
    #[clap(subcommand)]
    sub_command: SubCommand,
}

#[derive(Parser)]
enum SubCommand {
    Doc(Doc),
    Run(Run),
}

/// Print documentation for a command
#[derive(Parser)]
struct Doc {
    /// Name of the command, without the backslash
    name: Option<String>,

    /// Also list the commands of this document class
    #[arg(long)]
    class: Option<String>,
}

/// Render a document
#[derive(Parser)]
struct Run {
    /// Path to the document
    file_path: PathBuf,

    /// Document class to load before the document is read
    #[arg(long)]
    class: Option<String>,

    /// Number of decimals in lengths
    #[arg(long)]
    precision: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Path to a JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Json,
}

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    nodes: &'a [Node],
    labels: &'a Labels,
    diagnostics: &'a [Diagnostic],
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args: Cli = Cli::parse();
    let result = match args.sub_command {
        SubCommand::Doc(d) => doc(d),
        SubCommand::Run(r) => run(r),
    };
    if let Err(err) = result {
        eprintln!["{err}"];
        std::process::exit(1);
    }
}

fn load_config(run: &Run) -> Result<Config, String> {
    let mut config = match &run.config {
        None => Config::default(),
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("Failed to open config file {path:?}: {err}"))?;
            serde_json::from_str(&raw)
                .map_err(|err| format!("Invalid config file {path:?}: {err}"))?
        }
    };
    if let Some(class) = &run.class {
        config.document_class = Some(class.clone());
    }
    if let Some(precision) = run.precision {
        config.precision = precision;
    }
    config.file_name = run.file_path.to_string_lossy().to_string();
    Ok(config)
}

fn run(run: Run) -> Result<(), String> {
    let config = load_config(&run)?;
    let source = fs::read_to_string(&run.file_path)
        .map_err(|err| format!("Failed to open file {:?}: {err}", &run.file_path))?;
    let precision = config.precision;
    let mut interpreter = Interpreter::with_library(Tree::default(), config, latexlang_stdlib::library())
        .map_err(|err| err.to_string())?;
    let result = interpreter.run(&source);
    for diagnostic in interpreter.diagnostics.entries() {
        eprintln!["{diagnostic}"];
    }
    let nodes = result.map_err(|err| err.to_string())?;
    match run.format {
        Format::Html => println!["{}", tree::to_html(&nodes, &interpreter.labels, precision)],
        Format::Json => {
            let output = JsonOutput {
                nodes: &nodes,
                labels: &interpreter.labels,
                diagnostics: interpreter.diagnostics.entries(),
            };
            let json = serde_json::to_string_pretty(&output).map_err(|err| err.to_string())?;
            println!["{json}"];
        }
    }
    let warnings = interpreter
        .diagnostics
        .entries()
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    if warnings > 0 {
        eprintln!["{}", format!("{warnings} warning(s)").as_str().yellow()];
    }
    Ok(())
}

fn doc(d: Doc) -> Result<(), String> {
    let mut interpreter = Interpreter::with_library(Tree::default(), Config::default(), latexlang_stdlib::library())
        .map_err(|err| err.to_string())?;
    if let Some(class) = &d.class {
        interpreter
            .run(&format!("\\documentclass{{{class}}}"))
            .map_err(|err| err.to_string())?;
    }
    match d.name {
        None => {
            let mut names: Vec<&str> = interpreter.commands.names().collect();
            names.sort_unstable();
            let mut last_prefix = None;
            for (i, name) in names.into_iter().enumerate() {
                let new_last_prefix = name.chars().next();
                if last_prefix != new_last_prefix {
                    last_prefix = new_last_prefix;
                    if i != 0 {
                        println!();
                    }
                }
                let first_line = interpreter
                    .doc(name)
                    .and_then(|doc| doc.lines().next())
                    .unwrap_or("");
                println!["\\{}  {}", name.bold(), first_line];
            }
            Ok(())
        }
        Some(name) => {
            let name = name.trim_start_matches('\\');
            if !interpreter.commands.contains(name) {
                return Err(format!("Unknown command \\{name}"));
            }
            println!["\\{}  {}", name.bold(), interpreter.doc(name).unwrap_or("")];
            Ok(())
        }
    }
}
