use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use modsync::config::FileConfig;
use modsync::io::default_metadata_entries;
use modsync::report::{ReportFormat, render_json};
use modsync::{Result, ToolError, sync};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose).and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Compare(args) => execute_compare(args),
        Command::Inspect(args) => execute_inspect(args),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn execute_compare(args: CompareArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = file_config.merge(args.overrides()).into_settings()?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    sync::compare(&settings, args.format.into(), &mut out)?;
    out.flush()?;
    Ok(())
}

fn execute_inspect(args: InspectArgs) -> Result<()> {
    let entries = if args.entry.is_empty() {
        default_metadata_entries()
    } else {
        args.entry
    };
    let record = sync::inspect(&args.archive, &entries)?;
    println!("{}", render_json(&record)?);
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reconcile a local Minecraft mod folder with one on a remote host."
)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare the local mod directory with the remote one.
    Compare(CompareArgs),
    /// Show the identity extracted from a single local archive.
    Inspect(InspectArgs),
}

#[derive(clap::Args)]
struct CompareArgs {
    /// TOML file providing defaults for the options below.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local mods directory.
    #[arg(long)]
    local: Option<PathBuf>,

    /// Remote host as understood by ssh, e.g. `user@server`.
    #[arg(long)]
    host: Option<String>,

    /// ssh port of the remote host.
    #[arg(long)]
    port: Option<u16>,

    /// Mods directory on the remote host.
    #[arg(long)]
    remote_dir: Option<String>,

    /// Minimum filename similarity (0 to 1) for fuzzy matches.
    #[arg(long)]
    threshold: Option<f64>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl CompareArgs {
    fn overrides(&self) -> FileConfig {
        FileConfig {
            local_dir: self.local.clone(),
            remote_host: self.host.clone(),
            remote_dir: self.remote_dir.clone(),
            ssh_port: self.port,
            threshold: self.threshold,
            metadata_entries: None,
        }
    }
}

#[derive(clap::Args)]
struct InspectArgs {
    /// Path to a mod archive.
    archive: PathBuf,

    /// Metadata entry to read; may be repeated.
    #[arg(long)]
    entry: Vec<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}
