use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use urlocale::utils::logger::init_logger;
use urlocale::{Detector, Grouper, LocaleToken, OutputFormat, Scorer, Settings};

#[derive(Parser, Debug)]
#[command(name = "urlocale", version, about = "Collapse language variants of the same URL")]
struct Cli {
    /// Settings file (TOML, JSON or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to a timestamped file in this directory
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Group URLs and print one representative per group
    Group {
        /// Input file with one URL per line; stdin when omitted
        input: Option<PathBuf>,

        /// Preferred locales, most preferred first (e.g. en,es)
        #[arg(long, value_delimiter = ',')]
        priority: Vec<String>,

        /// Rank group members with the scorer
        #[arg(long)]
        scored: bool,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print the detected locale of each URL
    Detect {
        input: Option<PathBuf>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Check whether two URLs are variants of the same resource
    Compare { first: String, second: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.log_dir.is_some() {
        settings.log_dir = cli.log_dir.clone();
    }
    init_logger(settings.log_dir.as_deref())?;

    match cli.command {
        Command::Group {
            input,
            priority,
            scored,
            format,
        } => {
            if !priority.is_empty() {
                settings.priority = priority;
            }
            settings.scored |= scored;
            if let Some(format) = format {
                settings.output = format;
            }
            run_group(input.as_deref(), &settings)
        }
        Command::Detect { input, format } => {
            run_detect(input.as_deref(), format.unwrap_or(settings.output))
        }
        Command::Compare { first, second } => {
            let grouper = Grouper::new(settings.priority());
            let same = grouper.should_group(&first, &second)?;
            println!("{}", same);
            Ok(())
        }
    }
}

fn run_group(input: Option<&Path>, settings: &Settings) -> Result<()> {
    let mut grouper = Grouper::new(settings.priority());
    let mut skipped = 0usize;

    for line in read_urls(input)? {
        let line = line?;
        if let Err(e) = grouper.add(&line) {
            warn!("Skipping line: {}", e);
            skipped += 1;
        }
    }

    grouper.log_summary();
    if skipped > 0 {
        info!("Skipped {} unparsable lines", skipped);
    }

    let best = if settings.scored {
        let scorer = Scorer::new(grouper.priority());
        grouper.best_urls_scored(&scorer)
    } else {
        grouper.best_urls()
    };

    write_tokens(&best, settings.output, |token| token.original_url.clone())
}

fn run_detect(input: Option<&Path>, format: OutputFormat) -> Result<()> {
    let detector = Detector::default();
    let mut tokens = Vec::new();

    for line in read_urls(input)? {
        let line = line?;
        match detector.detect(&line) {
            Ok(token) => tokens.push(token),
            Err(e) => warn!("Skipping line: {}", e),
        }
    }

    let refs: Vec<&LocaleToken> = tokens.iter().collect();
    write_tokens(&refs, format, |token| {
        format!(
            "{}\t{}\t{}\t{}",
            token.original_url,
            token.locale_key(),
            token.signal,
            token.base_url
        )
    })
}

/// Non-empty, non-comment lines from a file or stdin.
fn read_urls(input: Option<&Path>) -> Result<impl Iterator<Item = io::Result<String>>> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    Ok(reader.lines().filter_map(|line| match line {
        Ok(line) => {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some(Ok(trimmed.to_string()))
            }
        }
        Err(e) => Some(Err(e)),
    }))
}

fn write_tokens<F>(tokens: &[&LocaleToken], format: OutputFormat, text: F) -> Result<()>
where
    F: Fn(&LocaleToken) -> String,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for &token in tokens {
        let line = match format {
            OutputFormat::Text => text(token),
            OutputFormat::Json => serde_json::to_string(token)?,
        };
        writeln!(out, "{}", line)?;
    }

    Ok(())
}
