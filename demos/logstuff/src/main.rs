//! logstuff: replays template logs into output files, forever.
//!
//! Each stream reads a template, clears its output file, then appends the
//! template's lines one at a time with a timestamp prefix, waiting the
//! stream's delay before each line.  When every stream has finished the
//! cycle starts over.  Point a log tailer or file watcher at `out/` to get a
//! steady, repeatable trickle of input.
//!
//! ```text
//! logstuff                                  # built-in two-stream setup
//! logstuff --manifest streams.csv --delay-scale 0.1
//! logstuff --mode per-stream --utc --cycles 2
//! ```

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lr_core::{SystemClock, Timestamp};
use lr_driver::{DriverBuilder, NoopObserver, PlaybackMode, PlaybackObserver, TimestampZone};
use lr_schedule::{load_streams_csv, load_streams_reader, Event, StreamDefinition};
use lr_sink::FileSink;


// ── Built-in manifest ─────────────────────────────────────────────────────────

// Two streams; the second starts one (unscaled) second after the first.
const DEFAULT_MANIFEST: &str = "\
template,output,start_offset_secs,delays_secs\n\
tmpl/1.log,out/1-out.log,0,0.5 1.2 0.8 2.1 0.3 1.7 0.9 1.5 0.6 2.0\n\
tmpl/2.log,out/2-out.log,1,1.1 0.4 1.8 0.7 2.3 0.9 1.3 0.5 1.6 0.8\n\
";

const DEFAULT_DELAY_SCALE: f64 = 3.0;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModeArg {
    /// One timeline for all streams
    Merged,
    /// One independent worker per stream
    PerStream,
}

impl From<ModeArg> for PlaybackMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Merged    => PlaybackMode::Merged,
            ModeArg::PerStream => PlaybackMode::PerStream,
        }
    }
}

/// Replay template log files into output files on a timer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Stream manifest CSV (template,output,start_offset_secs,delays_secs).
    /// Without it the built-in two-stream setup is used.
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Directory the built-in manifest's paths resolve against
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Multiplier applied to every delay and start offset
    #[arg(long, default_value_t = DEFAULT_DELAY_SCALE)]
    delay_scale: f64,

    /// Playback mode
    #[arg(long, value_enum, default_value = "merged")]
    mode: ModeArg,

    /// Timestamp lines in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Stop after this many cycles (0 = run until Ctrl-C)
    #[arg(long, default_value_t = 0)]
    cycles: u64,

    /// Do not echo each write to stdout
    #[arg(short, long)]
    quiet: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

// ── Console echo ──────────────────────────────────────────────────────────────

/// Prints every write as it happens.
struct Echo;

impl PlaybackObserver for Echo {
    fn on_event(&mut self, event: &Event, _fired_at: Timestamp) {
        match event.payload() {
            Some(line) => println!("Logged to {}: {line}", event.sink),
            None       => println!("Cleared {}", event.sink),
        }
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

/// `RUST_LOG`-style directive enabling `level` for this binary and every
/// workspace crate.
fn default_filter(level: &str) -> String {
    ["logstuff", "lr_core", "lr_schedule", "lr_sink", "lr_driver"]
        .map(|target| format!("{target}={level}"))
        .join(",")
}

fn load_streams(args: &Args) -> Result<Vec<StreamDefinition>> {
    let streams = match &args.manifest {
        Some(path) => load_streams_csv(path)
            .with_context(|| format!("loading manifest {}", path.display()))?,
        None => load_streams_reader(Cursor::new(DEFAULT_MANIFEST), &args.base_dir)
            .with_context(|| format!("loading built-in streams under {}", args.base_dir.display()))?,
    };
    streams
        .iter()
        .map(|s| s.scaled(args.delay_scale))
        .collect::<Result<Vec<_>, _>>()
        .context("applying --delay-scale")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(&args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let streams = load_streams(&args)?;
    for (i, s) in streams.iter().enumerate() {
        info!(
            stream = i,
            sink = %s.sink(),
            lines = s.lines().len(),
            offset_secs = s.start_offset().as_secs_f64(),
            span_secs = s.span().as_secs_f64(),
            "stream loaded"
        );
    }

    let driver = DriverBuilder::new(SystemClock::new())
        .streams(streams)
        .mode(args.mode.into())
        .zone(if args.utc { TimestampZone::Utc } else { TimestampZone::Local })
        .max_cycles(args.cycles)
        .build()?;

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("interrupt received, stopping");
                    cancel.cancel();
                }
                Err(e) => warn!(error = %e, "cannot listen for Ctrl-C; stop the process another way"),
            }
        }
    });

    let sink = Arc::new(FileSink::new(".").create_dirs(true));
    let stats = if args.quiet {
        driver.run(sink, &cancel, &mut NoopObserver).await?
    } else {
        driver.run(sink, &cancel, &mut Echo).await?
    };

    info!(cycles = stats.cycles, lines = stats.lines, clears = stats.clears, "done");
    Ok(())
}
