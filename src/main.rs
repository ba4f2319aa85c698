//! Seoscope: Content SEO Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use seoscope::analyzer::{AnalysisEngine, StaticTrendSource};
use seoscope::batch::{BatchDriver, BatchSummary};
use seoscope::config::{build_ignore_set, is_ignored, load_config, Config, CONFIG_FILENAME};
use seoscope::reporter::{ConsoleReporter, JsonReporter};
use seoscope::store::JsonContentStore;
use seoscope::AnalysisResult;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Seoscope: SEO scoring and recommendations for Markdown and HTML content
#[derive(Parser, Debug)]
#[command(name = "seoscope")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Content file or directory to analyze (omit when using a subcommand)
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum score threshold (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Quiet mode (minimal output)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,

    /// Focus keyword for every analyzed file (overrides front matter)
    #[arg(long, short)]
    keyword: Option<String>,

    /// Path to config file (default: search .seoscoperc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run analysis in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .seoscoperc.json with sensible defaults
    Init {
        /// Minimum score threshold (e.g. 70)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Analyze every item of a JSON content store and write results back
    Batch {
        /// Content store file ({ "items": [...] })
        store: PathBuf,

        /// Replace existing meta descriptions and focus keywords
        #[arg(long)]
        overwrite: bool,

        /// Analyze without writing the store
        #[arg(long)]
        dry_run: bool,

        /// Output format as JSON
        #[arg(long, short)]
        json: bool,

        /// Path to config file (default: search next to the store and parents)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(cmd) = args.command {
        return match cmd {
            Commands::Init { threshold, dir } => run_init(threshold, dir.as_deref()),
            Commands::Batch {
                store,
                overwrite,
                dry_run,
                json,
                config,
            } => run_batch(&store, overwrite, dry_run, json, config.as_deref()),
        };
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("A path is required when no subcommand is given");
    };

    // Resolve work directory for config search
    let work_dir = if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path.as_path()
    };

    // Load config (CLI flags override config file)
    let config = load_config(work_dir, args.config.as_deref())?.merge_with_cli(args.threshold);

    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let content_patterns = config.get_content_patterns();
    let files = collect_content_files(&path, ignore_set.as_ref(), &content_patterns)?;

    if files.is_empty() {
        eprintln!("{}: No content files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let engine = build_engine(&config, args.keyword.as_deref());

    let use_parallel = args.parallel || files.len() > 10;
    let (results, had_errors) = if use_parallel {
        analyze_files_parallel(&engine, &files, &config, args.quiet)
    } else {
        analyze_files_sequential(&engine, &files, &config, args.quiet)
    };

    if results.is_empty() {
        eprintln!("{}: All files failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = AnalysisEngine::aggregate_stats(&results);

    if args.json {
        let reporter = JsonReporter::new().pretty();
        if results.len() == 1 {
            println!("{}", reporter.report(&results[0]));
        } else {
            println!("{}", reporter.report_with_summary(&results, &stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for result in &results {
            reporter.report_quiet(result);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }

        if results.len() == 1 {
            reporter.report(&results[0]);
        } else {
            reporter.report_many(&results, &stats);
        }
    }

    // CLI threshold gates the overall score; config thresholds gate each file
    let failures: Vec<(String, u8, u8)> = match args.threshold {
        Some(threshold) => {
            let score = if results.len() == 1 {
                results[0].score.value
            } else {
                stats.average_score.value
            };
            if score < threshold {
                vec![("Score".to_string(), score, threshold)]
            } else {
                Vec::new()
            }
        }
        None => below_file_thresholds(&results, &config),
    };

    if !failures.is_empty() {
        if !args.quiet && !args.json {
            for (label, score, threshold) in &failures {
                eprintln!(
                    "\n{}: {} {} is below threshold {}",
                    "Failed".red().bold(),
                    label,
                    score,
                    threshold
                );
            }
        }
        return Ok(ExitCode::from(1));
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn build_engine(config: &Config, keyword: Option<&str>) -> AnalysisEngine {
    let trends = StaticTrendSource::with_defaults().extended(&config.trending);
    let engine = AnalysisEngine::new().with_trend_source(Arc::new(trends));
    match keyword {
        Some(keyword) => engine.with_focus_keyword(keyword),
        None => engine,
    }
}

/// Files whose score misses the threshold configured for them
fn below_file_thresholds(results: &[AnalysisResult], config: &Config) -> Vec<(String, u8, u8)> {
    results
        .iter()
        .filter_map(|result| {
            let path = result.source.as_deref()?;
            let threshold = config.effective_for_file(path).threshold?;
            (result.score.value < threshold).then(|| {
                (path.display().to_string(), result.score.value, threshold)
            })
        })
        .collect()
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold_value = threshold.unwrap_or(70);
    let config = Config {
        threshold: Some(threshold_value),
        ignore: vec![
            "**/node_modules/**".to_string(),
            "**/drafts/**".to_string(),
            "**/_site/**".to_string(),
        ],
        content_patterns: Config::default()
            .get_content_patterns()
            .into_iter()
            .map(str::to_string)
            .collect(),
        ..Config::default()
    };

    let mut json =
        serde_json::to_string_pretty(&config).context("Failed to serialize default config")?;
    json.push('\n');

    std::fs::write(&config_path, json)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        config_path.display(),
        threshold_value
    );
    Ok(ExitCode::SUCCESS)
}

fn run_batch(
    store_path: &Path,
    overwrite: bool,
    dry_run: bool,
    json: bool,
    config_path: Option<&Path>,
) -> Result<ExitCode> {
    let work_dir = store_path.parent().unwrap_or(Path::new("."));
    let work_dir = if work_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        work_dir
    };
    let config = load_config(work_dir, config_path)?;

    let mut store = JsonContentStore::load(store_path)?;
    let engine = build_engine(&config, None);
    let summary = BatchDriver::new(&engine)
        .overwrite(overwrite)
        .dry_run(dry_run)
        .run(&mut store);

    if !dry_run {
        store.save()?;
    }

    if json {
        println!("{}", JsonReporter::new().pretty().report_batch(&summary));
    } else {
        print_batch_summary(store.path(), &summary, dry_run);
    }

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}

fn print_batch_summary(path: &Path, summary: &BatchSummary, dry_run: bool) {
    println!();
    println!("{}", format!("📦 Batch: {}", path.display()).bold());
    println!("   Processed: {}", summary.processed.to_string().bold());
    if dry_run {
        println!("   {} Dry run, store not written", "ℹ".blue());
    } else {
        println!("   Updated:   {}", summary.updated.to_string().green());
    }
    for failure in &summary.failures {
        println!("   {} {}: {}", "✗".red(), failure.id, failure.error);
    }
    println!();
}

fn collect_content_files(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
    content_patterns: &[&str],
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if entry.file_type().is_file() && is_content_file(file_path, content_patterns) {
            if let Some(set) = ignore_set {
                if is_ignored(file_path, set) {
                    continue;
                }
            }
            files.push(file_path.to_path_buf());
        }
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}

fn is_content_file(path: &Path, content_patterns: &[&str]) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    content_patterns
        .iter()
        .any(|pattern| name.ends_with(&pattern.to_lowercase()))
}

fn analyze_files_sequential(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    quiet: bool,
) -> (Vec<AnalysisResult>, bool) {
    let mut results = Vec::new();
    let mut had_errors = false;

    for file in files {
        match engine.analyze_file(file, Some(config)) {
            Ok(result) => results.push(result),
            Err(e) => {
                had_errors = true;
                if !quiet {
                    eprintln!(
                        "{}: Failed to analyze {}: {:#}",
                        "Error".red(),
                        file.display(),
                        e
                    );
                }
            }
        }
    }

    (results, had_errors)
}

/// Analyze files in parallel; results keep the input order
fn analyze_files_parallel(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    quiet: bool,
) -> (Vec<AnalysisResult>, bool) {
    let mut results = Vec::with_capacity(files.len());
    let mut had_errors = false;

    for (file, outcome) in files.iter().zip(engine.analyze_parallel(files, Some(config))) {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                had_errors = true;
                if !quiet {
                    eprintln!(
                        "{}: Failed to analyze {}: {:#}",
                        "Error".red(),
                        file.display(),
                        e
                    );
                }
            }
        }
    }

    (results, had_errors)
}
