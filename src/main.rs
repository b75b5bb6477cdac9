use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use domsource::{find, ResolveMethod};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "domsource")]
#[command(about = "Locate DOM selector matches in the original HTML source", long_about = None)]
#[command(version)]
struct Cli {
    /// HTML file to search
    file: PathBuf,

    /// Selector to evaluate (e.g. ".green", "li li", "p[class]")
    selector: String,

    /// Resolve line and column for each match
    #[arg(short, long)]
    locations: bool,

    /// Emit results as a JSON array
    #[arg(short, long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let results = find(&source, &cli.selector, cli.locations)
        .with_context(|| format!("query `{}` failed", cli.selector))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results.records)?);
        return Ok(());
    }

    for record in &results.records {
        match record.location {
            Some(location) => {
                let method = match location.method {
                    ResolveMethod::DirectSearch => "direct-search",
                    ResolveMethod::OccurrenceCount => "occurrence-count",
                };
                println!(
                    "{}:{}:{} {} {}",
                    cli.file.display().to_string().cyan(),
                    location.line.to_string().yellow(),
                    location.column.to_string().yellow(),
                    format!("[{method}]").dimmed(),
                    record.html
                );
            }
            None => println!("{}", record.html),
        }
    }

    if results.records.is_empty() {
        eprintln!("{}", "no matches".dimmed());
    }

    Ok(())
}
