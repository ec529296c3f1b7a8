//! incfix CLI
//!
//! Command-line interface for relocating includes and guarding sources.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use incfix_core::Config;
use incfix_index::FileIndex;
use incfix_rewrite::{resolve_under, Guard, RewriteOptions, RewriteReport, Rewriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "incfix")]
#[command(
    author,
    version,
    about = "Relocate C #include paths and guard incompatible sources",
    long_about = None
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Guard excluded files, then rewrite every include
    Run {
        #[command(flatten)]
        location: LocationArgs,

        /// File to wrap in the exclusion guard (repeatable, replaces the configured list)
        #[arg(short, long = "exclude", value_name = "PATH")]
        exclude: Vec<PathBuf>,

        /// Preprocessor symbol for the exclusion guard
        #[arg(long, value_name = "SYMBOL")]
        guard_symbol: Option<String>,

        /// Resolve and report without writing
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List the file index
    Index {
        #[command(flatten)]
        location: LocationArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show the relative path an include name resolves to
    Resolve {
        /// Base name, e.g. cst_wave.h
        #[arg(value_name = "NAME")]
        name: String,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// Wrap files in the exclusion guard only
    Guard {
        /// Files to wrap, relative to the source root
        #[arg(value_name = "PATH", required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        location: LocationArgs,

        /// Preprocessor symbol for the exclusion guard
        #[arg(long, value_name = "SYMBOL")]
        guard_symbol: Option<String>,

        /// Report without writing
        #[arg(long)]
        dry_run: bool,
    },
}

/// Where to find the configuration and the source tree
#[derive(Args)]
struct LocationArgs {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Source root, skips the project lookup
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Project directory name to look for in the working directory
    #[arg(long, value_name = "NAME")]
    project: Option<String>,

    /// Source directory below the project directory
    #[arg(long, value_name = "DIR")]
    source: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            location,
            exclude,
            guard_symbol,
            dry_run,
            format,
        } => {
            let mut config = location.load()?;
            if !exclude.is_empty() {
                config.guard.files = exclude;
            }
            if let Some(symbol) = guard_symbol {
                config.guard.symbol = symbol;
            }
            config.rewrite.dry_run |= dry_run;
            config.validate()?;
            cmd_run(&config, format)?;
        }
        Commands::Index { location, format } => {
            let config = location.load()?;
            cmd_index(&config, format)?;
        }
        Commands::Resolve { name, location } => {
            let config = location.load()?;
            cmd_resolve(&config, &name)?;
        }
        Commands::Guard {
            files,
            location,
            guard_symbol,
            dry_run,
        } => {
            let mut config = location.load()?;
            if let Some(symbol) = guard_symbol {
                config.guard.symbol = symbol;
            }
            config.rewrite.dry_run |= dry_run;
            config.guard.files = files;
            config.validate()?;
            cmd_guard(&config)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

impl LocationArgs {
    /// Read the configuration file, if any, and apply location overrides
    fn load(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(root) = &self.root {
            config.project.root = Some(root.clone());
        }
        if let Some(project) = &self.project {
            config.project.name = project.clone();
        }
        if let Some(source) = &self.source {
            config.project.source_dir = source.clone();
        }

        Ok(config)
    }
}

fn source_root(config: &Config) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("cannot read the working directory")?;
    let root = config.project.locate_root(&cwd);
    info!("Directory: {}", root.display());
    Ok(root)
}

fn build_index(config: &Config) -> Result<FileIndex> {
    let root = source_root(config)?;
    FileIndex::build(&root, &config.index)
        .with_context(|| format!("failed to index {}", root.display()))
}

fn cmd_run(config: &Config, format: Format) -> Result<()> {
    let index = build_index(config)?;
    let rewriter = Rewriter::new(&index, RewriteOptions::from(config));
    let report = rewriter.run(&config.guard.files)?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_report(&report),
    }

    Ok(())
}

fn print_report(report: &RewriteReport) {
    if report.dry_run {
        println!("Dry run, no files were written.");
    }
    println!("Summary:");
    println!("   Files scanned: {}", report.files_scanned);
    println!("   Files changed: {}", report.files_changed);
    println!("   Includes resolved: {}", report.includes_resolved);
    println!("   Files guarded: {}", report.guarded.len());
    println!("   Already guarded: {}", report.already_guarded.len());

    if !report.unresolved.is_empty() {
        println!();
        println!("Unresolved includes:");
        for include in &report.unresolved {
            println!("   {}:{}: \"{}\"", include.file.display(), include.line, include.quoted);
        }
    }
}

fn cmd_index(config: &Config, format: Format) -> Result<()> {
    let index = build_index(config)?;

    let mut records: Vec<_> = index.records().collect();
    records.sort_by(|a, b| a.base_name.cmp(&b.base_name));

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        Format::Text => {
            for record in &records {
                println!("{} -> {}", record.base_name, record.relative_path);
            }
            println!();
            println!("{} entries, {} duplicate base names", index.len(), index.duplicates());
        }
    }

    Ok(())
}

fn cmd_resolve(config: &Config, name: &str) -> Result<()> {
    let index = build_index(config)?;
    match index.get(name) {
        Some(record) => {
            println!("{}", record.relative_path);
            Ok(())
        }
        None => bail!("{} is not in the index of {}", name, index.root().display()),
    }
}

fn cmd_guard(config: &Config) -> Result<()> {
    let root = source_root(config)?;
    let guard = Guard::new(&config.guard.symbol);

    for file in &config.guard.files {
        let path = resolve_under(&root, file);
        let outcome = guard
            .apply(&path, config.rewrite.dry_run)
            .with_context(|| format!("failed to guard {}", path.display()))?;
        println!("{}: {:?}", file.display(), outcome);
    }

    Ok(())
}
