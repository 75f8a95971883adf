//! Command-line interface for the parser.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::{run_batch, BatchOptions, BatchSummary};
use crate::config::ParserConfig;
use crate::error::Result;
use crate::parser::DocumentParser;
use crate::types::RawDocumentRecord;

/// Normas Parser - Structure parser for Argentine laws and decrees.
#[derive(Parser)]
#[command(name = "normas-parser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a stream of NDJSON records, one output line per record.
    Batch {
        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML parser profile
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Worker threads
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,
    },

    /// Parse a single JSON record and pretty-print the result.
    Parse {
        /// JSON record file
        file: PathBuf,

        /// YAML parser profile
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

/// Output format of the `parse` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Batch {
            input,
            output,
            config,
            jobs,
        } => batch_command(
            input.as_deref(),
            output.as_deref(),
            config.as_deref(),
            jobs,
        ),
        Commands::Parse {
            file,
            config,
            format,
        } => parse_command(&file, config.as_deref(), format),
    }
}

/// Execute the batch command.
fn batch_command(
    input: Option<&Path>,
    output: Option<&Path>,
    config: Option<&Path>,
    jobs: usize,
) -> Result<()> {
    let parser = DocumentParser::new(ParserConfig::load(config)?)?;

    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    // Spinner only when a person is watching stderr
    let pb = Term::stderr().is_term().then(|| {
        let pb = ProgressBar::new_spinner();
        #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("valid template"),
        );
        pb.set_message("Parsing records...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    });

    let options = BatchOptions { jobs };
    let result = run_batch(&parser, reader, writer, &options, |summary| {
        if let Some(pb) = &pb {
            pb.set_message(format!("Parsed {} records...", summary.records));
        }
    });

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    print_summary(&result?);
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    let errors = if summary.errors == 0 {
        style(summary.errors).green()
    } else {
        style(summary.errors).yellow().bold()
    };
    eprintln!(
        "{} {} records ({} errors)",
        style("Parsed").green().bold(),
        style(summary.records).cyan(),
        errors
    );
}

/// Execute the parse command.
fn parse_command(file: &Path, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let parser = DocumentParser::new(ParserConfig::load(config)?)?;

    let content = std::fs::read_to_string(file)?;
    let record = RawDocumentRecord::from_json(content.trim())?;
    let doc = parser.parse(&record);

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&doc)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(&doc)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_batch_defaults() {
        let cli = Cli::parse_from(["normas-parser", "batch"]);

        let Commands::Batch {
            input,
            output,
            config,
            jobs,
        } = cli.command
        else {
            panic!("expected batch command");
        };
        assert!(input.is_none());
        assert!(output.is_none());
        assert!(config.is_none());
        assert_eq!(jobs, 1);
    }

    #[test]
    fn test_cli_parse_batch_with_options() {
        let cli = Cli::parse_from([
            "normas-parser",
            "batch",
            "-i",
            "normas.jsonl",
            "--output",
            "parsed.jsonl",
            "-j",
            "8",
        ]);

        let Commands::Batch {
            input, output, jobs, ..
        } = cli.command
        else {
            panic!("expected batch command");
        };
        assert_eq!(input, Some(PathBuf::from("normas.jsonl")));
        assert_eq!(output, Some(PathBuf::from("parsed.jsonl")));
        assert_eq!(jobs, 8);
    }

    #[test]
    fn test_cli_parse_parse_command() {
        let cli = Cli::parse_from(["normas-parser", "parse", "decreto.json", "--format", "yaml"]);

        let Commands::Parse { file, format, .. } = cli.command else {
            panic!("expected parse command");
        };
        assert_eq!(file, PathBuf::from("decreto.json"));
        assert_eq!(format, OutputFormat::Yaml);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["normas-parser", "parse", "x.json", "-f", "xml"]).is_err());
    }
}
