use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use spaceprune::config::Config;
use spaceprune::util::human::{fmt_bytes, fmt_pct};
use spaceprune::{check_root, motioneye, RunOptions, SpaceProbe, Statvfs};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "spaceprune",
    version,
    about = "Prune media files, oldest first, until a minimum percentage of disk space is free",
    long_about = "Deletes files from the media directory, starting with the oldest, until the \
                  filesystem has the requested share of free space. Afterwards every directory \
                  left empty is removed, except the first-level directories of the media path."
)]
struct Cli {
    /// Path to the motionEye config file holding media_path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Media directory to prune (skips the motionEye lookup)
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Minimum free disk space, percent [default: 20]
    #[arg(short, long, value_name = "PCT", value_parser = clap::value_parser!(u8).range(0..=100))]
    free: Option<u8>,

    /// Extra path suffix to never delete (repeatable)
    #[arg(short, long = "keep", value_name = "SUFFIX")]
    keep: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Perform a trial run with no changes made
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print free space and the amount to delete, then exit
    #[arg(long)]
    status: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    print_config: bool,

    /// Write a default config file, then exit
    #[arg(long)]
    write_config: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "spaceprune", &mut io::stdout());
        return Ok(());
    }
    if cli.write_config {
        return run_write_config();
    }

    let cfg = Config::load()?;
    if cli.print_config {
        return run_print_config(&cfg);
    }

    init_tracing(cli.verbose || cfg.general.verbose);
    let opts = resolve(&cli, &cfg)?;

    if cli.status {
        return run_status(&opts);
    }

    let report = spaceprune::run(&opts, &Statvfs)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "spaceprune=debug" } else { "spaceprune=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Flags win over the config file; the root falls back to motionEye's media_path.
fn resolve(cli: &Cli, cfg: &Config) -> Result<RunOptions> {
    let root = match cli.root.clone().or_else(|| cfg.source.root.clone()) {
        Some(root) => root,
        None => {
            let conf = cli.config.clone().unwrap_or_else(|| cfg.source.motioneye_config.clone());
            motioneye::media_path(&conf).context("locating the media directory")?
        }
    };

    let mut keep_files = cfg.general.keep_files.clone();
    keep_files.extend(cli.keep.iter().cloned());

    Ok(RunOptions {
        root,
        target_free_pct: cli.free.unwrap_or(cfg.general.target_free_pct),
        keep_files,
        dry_run:         cli.dry_run || cfg.general.dry_run,
        max_depth:       cfg.general.max_depth,
    })
}

fn run_status(opts: &RunOptions) -> Result<()> {
    let root = check_root(&opts.root)?;
    let stats = Statvfs.stats(&root)?;
    let target = f64::from(opts.target_free_pct);
    println!("Media path:            {}", root.display());
    println!("Target free:           {}", fmt_pct(target));
    println!("Space free (percent):  {}", fmt_pct(stats.free_pct()));
    println!("Space free (bytes):    {} ({})", stats.free_bytes(), fmt_bytes(stats.free_bytes()));
    println!(
        "Required deletion:     {} ({})",
        stats.bytes_to_target(target),
        fmt_bytes(stats.bytes_to_target(target)),
    );
    Ok(())
}

fn run_print_config(cfg: &Config) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  target_free_pct = {}%", cfg.general.target_free_pct);
    println!("  keep_files      = {:?}", cfg.general.keep_files);
    println!("  dry_run         = {}", cfg.general.dry_run);
    println!("  verbose         = {}", cfg.general.verbose);
    println!("  max_depth       = {}", cfg.general.max_depth);
    println!();
    println!("[source]");
    match &cfg.source.root {
        Some(root) => println!("  root             = {}", root.display()),
        None       => println!("  root             = (from motionEye media_path)"),
    }
    println!("  motioneye_config = {}", cfg.source.motioneye_config.display());
    Ok(())
}

fn run_write_config() -> Result<()> {
    let path = Config::config_path().context("no config directory for this user")?;
    Config::write_defaults(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
