use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use repseek::index::{OrderAlgorithm, SequenceIndex};
use repseek::output::{self, OutputFormat};
use repseek::scan::{RepeatMode, RepeatScanner, ScanConfig};
use repseek::sequence::{self, MappedFasta, Sequence, SequenceSource, Transform};
use repseek::utils::progress;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "repseek")]
#[command(about = "Find maximal exact repeats in nucleotide sequences")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a sequence for repeats
    Scan {
        /// FASTA file holding the query sequence
        query: PathBuf,

        /// Search for second arms in this sequence instead of the query
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Repeat mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Shortest arm length to report
        #[arg(short = 'l', long)]
        min_length: Option<usize>,

        /// Suffix order construction algorithm
        #[arg(short, long, value_enum)]
        algorithm: Option<AlgorithmArg>,

        /// JSON scan configuration; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "tsv")]
        format: OutputFormat,

        /// Print at most this many records
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Longest exact substring shared by two sequences
    Longest {
        /// FASTA file holding the query sequence
        query: PathBuf,
        /// FASTA file holding the target sequence
        target: PathBuf,
    },
    /// Show sequence and index statistics
    Info {
        /// FASTA file to inspect
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Direct,
    Reverse,
    Complement,
    Inverted,
}

impl From<ModeArg> for RepeatMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Direct => RepeatMode::Direct,
            ModeArg::Reverse => RepeatMode::Reverse,
            ModeArg::Complement => RepeatMode::ComplementInverted,
            ModeArg::Inverted => RepeatMode::ComplementReverseInverted,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Auto,
    Sort,
    Sais,
}

impl From<AlgorithmArg> for OrderAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Auto => OrderAlgorithm::Auto,
            AlgorithmArg::Sort => OrderAlgorithm::Sort,
            AlgorithmArg::Sais => OrderAlgorithm::Sais,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stdout().is_terminal();

    match cli.command {
        Commands::Scan {
            query,
            target,
            mode,
            min_length,
            algorithm,
            config,
            format,
            limit,
        } => {
            let mut scan_config = match config {
                Some(path) => load_config(&path)?,
                None => ScanConfig::default(),
            };
            if let Some(mode) = mode {
                scan_config.mode = mode.into();
            }
            if let Some(min_length) = min_length {
                scan_config.minimum_length = min_length;
            }
            if let Some(algorithm) = algorithm {
                scan_config.order_algorithm = algorithm.into();
            }
            scan_config.self_search = target.is_none();

            run_scan(&query, target.as_deref(), scan_config, format, limit, color, cli.quiet)?;
        }
        Commands::Longest { query, target } => {
            run_longest(&query, &target)?;
        }
        Commands::Info { path } => {
            run_info(&path)?;
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<ScanConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn load(path: &Path) -> Result<Sequence> {
    sequence::load_fasta(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn run_scan(
    query_path: &Path,
    target_path: Option<&Path>,
    config: ScanConfig,
    format: OutputFormat,
    limit: Option<usize>,
    color: bool,
    quiet: bool,
) -> Result<()> {
    let query = load(query_path)?;
    let target = match target_path {
        Some(path) => Some(load(path)?),
        None => None,
    };
    log::info!(
        "Scanning {} symbols for {} repeats of at least {}",
        query.len(),
        config.mode,
        config.minimum_length
    );

    let mut scanner = RepeatScanner::new(config)?;
    let pb = if quiet {
        progress::ProgressBar::hidden()
    } else {
        progress::position_bar(query.len() as u64)
    };
    let mut records = scanner.scan_with_progress(&query, target.as_ref().unwrap_or(&query), &pb)?;
    pb.finish_and_clear();

    if let Some(limit) = limit {
        records.truncate(limit);
    }
    output::print_records(&records, format, color)?;

    Ok(())
}

fn run_longest(query_path: &Path, target_path: &Path) -> Result<()> {
    let query = load(query_path)?;
    let target = load(target_path)?;

    let index = SequenceIndex::from_source(&target, Transform::Identity, OrderAlgorithm::Auto)?;
    match index.longest_common_substring(query.as_codes()) {
        Some(lcs) => {
            let shared = query.subsequence(lcs.query_start, lcs.length);
            println!("Length:        {}", lcs.length);
            println!("Query start:   {}", lcs.query_start);
            println!("Target offset: {}", lcs.target_offset);
            println!("Substring:     {}", shared);
        }
        None => println!("No shared substring"),
    }

    Ok(())
}

fn run_info(path: &Path) -> Result<()> {
    let mapped = MappedFasta::open(path).with_context(|| format!("Failed to map {}", path.display()))?;
    let codes = mapped.codes();
    let ambiguous = codes.iter().filter(|&&c| sequence::is_ambiguous(c)).count();

    let spinner = progress::spinner("Building index...");
    let index = SequenceIndex::from_source(&mapped, Transform::Identity, OrderAlgorithm::Auto)?;
    spinner.finish_and_clear();
    let stats = index.stats();

    println!("Sequence: {}", path.display());
    println!("  Length: {}", mapped.len());
    println!(
        "  Ambiguous symbols: {} ({:.2}%)",
        ambiguous,
        percent(ambiguous, mapped.len())
    );
    println!("Index:");
    println!("  Window length: {}", stats.window_len);
    println!("  Alphabet size: {}", stats.alphabet_size);
    println!("  Order entries: {}", stats.order_len);

    Ok(())
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
