//! vision CLI
//!
//! Parses a markup document and prints its element tree, for testing and
//! debugging documents by hand.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use owo_colors::OwoColorize;
use vision_common::warning::{clear_warnings, warn_once};
use vision_dom::ElementTree;
use vision_markup::{DEFAULT_MAX_DEPTH, MarkupError, ParseIssue, tokenize};

/// vision - inspect how a markup document tokenizes and parses
#[derive(Parser, Debug)]
#[command(name = "vision")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the element tree of a file
    vision ./window.xml

    # Show the token stream as well
    vision --tokens ./window.xml

    # Parse an inline string and dump JSON
    vision --json --markup '<p id="x">Hello</p>'
"#)]
struct Cli {
    /// Path to the markup file
    #[arg(value_name = "FILE", required_unless_present = "markup")]
    path: Option<PathBuf>,

    /// Parse a markup string directly instead of a file
    #[arg(long, value_name = "MARKUP", conflicts_with = "path")]
    markup: Option<String>,

    /// Print the token stream before the tree
    #[arg(long)]
    tokens: bool,

    /// Print the tree as JSON instead of the indented dump
    #[arg(long)]
    json: bool,

    /// Maximum element nesting depth
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Do not print warnings while parsing
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let (name, source) = load_source(&cli)?;
    let (tree, issues) = parse(&cli, &source).map_err(|err| locate(&name, &source, &err))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    println!("{}", "=== Element Tree ===".bold());
    print!("{tree}");
    if !cli.quiet {
        report_issues(&issues);
    }
    Ok(())
}

/// Read the document named on the command line.
fn load_source(cli: &Cli) -> Result<(String, String)> {
    if let Some(ref markup) = cli.markup {
        return Ok(("<markup>".to_string(), markup.clone()));
    }
    let path = cli
        .path
        .as_ref()
        .ok_or_else(|| anyhow!("no input given; pass a FILE or --markup"))?;
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    Ok((path.display().to_string(), source))
}

fn parse(cli: &Cli, source: &str) -> Result<(ElementTree, Vec<ParseIssue>), MarkupError> {
    let tokens = tokenize(source)?;
    if cli.tokens {
        println!("{}", "=== Tokens ===".bold());
        for token in &tokens {
            println!("{:>6}  {token}", token.offset);
        }
        println!();
    }

    let parser = vision_markup::Parser::new(tokens).with_max_depth(cli.max_depth);
    Ok(parser.run_with_issues()?)
}

/// Print each parse issue as a warning on stderr.
fn report_issues(issues: &[ParseIssue]) {
    for issue in issues {
        warn_once(
            "Parser",
            &format!("token {}: {}", issue.token_index, issue.message),
        );
    }
}

/// Attach a `name:line:column` prefix to an error.
fn locate(name: &str, source: &str, err: &MarkupError) -> anyhow::Error {
    let offset = err.offset().unwrap_or(source.len());
    let (line, column) = line_column(source, offset);
    anyhow!("{name}:{line}:{column}: {err}")
}

/// One-based line and column of a byte offset.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
