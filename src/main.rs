//! @ai:module:intent CLI entry point for the todo finder
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on extractor, output, config

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tdf::{extractor, output, Config, OutputFormat, Whitespace};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tdf")]
#[command(
    author,
    version,
    about = "Finds TODOs in a folder recursively and outputs them in markdown-ready format"
)]
struct Cli {
    /// File or directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Do not print file and location
    #[arg(long)]
    no_loc: bool,

    /// Omit markdown list formatting
    #[arg(long)]
    plain: bool,

    /// vim/neovim quickfix list format
    #[arg(long)]
    quickfix: bool,

    /// Output format; overrides --no-loc, --plain and --quickfix
    #[arg(long, short, value_enum)]
    format: Option<Format>,

    /// Path to a TOML config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Treat tabs as whitespace around markers and descriptions
    #[arg(long)]
    tabs: bool,

    /// Skip files whose type is not recognized instead of scanning them as plain text
    #[arg(long)]
    known_only: bool,

    /// Regex of paths to skip (repeatable, added to the configured ones)
    #[arg(long, value_name = "REGEX")]
    exclude: Vec<String>,

    /// Print a summary line to stderr
    #[arg(long)]
    summary: bool,

    /// Disable colored summary output
    #[arg(long)]
    no_color: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Log per-file progress to stderr
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Plain,
    FileLoc,
    Markdown,
    MarkdownFull,
    Quickfix,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Plain => OutputFormat::Plain,
            Format::FileLoc => OutputFormat::FileLoc,
            Format::Markdown => OutputFormat::MarkdownList,
            Format::MarkdownFull => OutputFormat::MarkdownListFull,
            Format::Quickfix => OutputFormat::Quickfix,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

impl Cli {
    fn output_format(&self) -> OutputFormat {
        match self.format {
            Some(format) => format.into(),
            None => OutputFormat::from_switches(!self.plain, !self.no_loc, self.quickfix),
        }
    }

    fn load_config(&self) -> tdf::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if self.tabs {
            config.whitespace = Whitespace::Blank;
        }
        if self.known_only {
            config.known_only = true;
        }
        config.exclude.extend(self.exclude.iter().cloned());

        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "tdf=debug" } else { "tdf=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    if cli.print_config {
        return match config.to_toml() {
            Ok(text) => {
                print!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        };
    }

    let report = match extractor::scan_path(&cli.path, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}: {}", cli.path.display(), e);
            return ExitCode::from(2);
        }
    };

    match output::format_report(&report, cli.output_format()) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    }

    if cli.summary {
        eprintln!("{}", output::format_summary(&report));
    }

    ExitCode::SUCCESS
}
