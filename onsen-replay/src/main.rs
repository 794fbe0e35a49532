mod reports;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug, info, warn};
use std::fs::File;
use std::io::{BufWriter, Read, Write, stdin, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use onsen_engine::{AnalyticsEngine, Catalog, EngineConfig, StoryEventCounter, TurnSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored per-turn table
    Console,
    /// Full analytics as a JSON array
    Json,
    /// Markdown document
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "onsen-replay", version)]
#[command(about = "Replay a recorded onsen scenario session through the turn analytics engine")]
struct Args {
    /// Recorded session: a JSON array of snapshots or one snapshot per line ("-" reads stdin)
    input: PathBuf,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Engine configuration (locale and progression rules) as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Message language; overrides the config file
    #[arg(long)]
    lang: Option<String>,

    /// Attach the story event counter and show its rows
    #[arg(long)]
    event_stats: bool,

    /// Exit with an error when the session has turn anomalies
    #[arg(long)]
    strict: bool,

    /// Disable colored console output
    #[arg(long)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    if args.no_color || args.output.is_some() {
        colored::control::set_override(false);
    }

    let start_time = Instant::now();
    let config = load_config(args.config.as_deref(), args.lang.as_deref())?;
    let catalog = Catalog::new(&config.locale);
    let snapshots = load_session(&args.input)?;
    info!("loaded {} snapshots from {}", snapshots.len(), args.input.display());

    let mut engine = AnalyticsEngine::new(config).context("invalid engine configuration")?;
    if args.event_stats {
        engine = engine.with_event_logger(StoryEventCounter::default());
    }
    let results: Vec<_> = snapshots.iter().map(|s| engine.process(s)).collect();
    debug!("replay finished in {:?}", start_time.elapsed());

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, &results)?,
        ReportFormat::Markdown => {
            reports::generate_markdown_report(&mut output_target, &results, &catalog)?;
        }
        ReportFormat::Console => {
            reports::generate_console_report(&mut output_target, &results, &catalog)?;
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }
    output_target.flush_inner()?;

    let anomalies = results.iter().filter(|r| r.is_anomaly()).count();
    if args.strict && anomalies > 0 {
        bail!("{anomalies} turn anomalies in {}", args.input.display());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .init();
}

fn load_config(path: Option<&Path>, lang: Option<&str>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            EngineConfig::from_json(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(lang) = lang {
        config = config.with_locale(lang);
        config.validate().context("unsupported --lang")?;
    }
    Ok(config)
}

fn load_session(path: &Path) -> Result<Vec<TurnSnapshot>> {
    let input = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        stdin()
            .read_to_string(&mut buffer)
            .context("failed to read session from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    let snapshots = TurnSnapshot::session_from_json(&input)
        .with_context(|| format!("failed to parse session {}", path.display()))?;
    if snapshots.is_empty() {
        warn!("no snapshots in {}", path.display());
    }
    Ok(snapshots)
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
