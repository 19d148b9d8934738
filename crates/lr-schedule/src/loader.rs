//! Template and stream-manifest loading.
//!
//! # Template files
//!
//! Plain text, one log line per line.  Line terminators (`\n` or `\r\n`) are
//! stripped; blank lines are kept and replay as a bare timestamp.
//!
//! # Manifest CSV format
//!
//! One row per stream, in playback registration order.
//!
//! ```csv
//! template,output,start_offset_secs,delays_secs
//! tmpl/1.log,out/1-out.log,0,0.5 1.2 0.8
//! tmpl/2.log,out/2-out.log,1,1.1 0.4
//! ```
//!
//! | Column              | Meaning                                          |
//! |---------------------|--------------------------------------------------|
//! | `template`          | template file, relative to the base directory    |
//! | `output`            | sink id (output file), relative to the base      |
//! | `start_offset_secs` | seconds from cycle anchor to the stream's clear  |
//! | `delays_secs`       | whitespace-separated delay table, in seconds     |
//!
//! Relative paths resolve against the base directory: the manifest's own
//! directory for [`load_streams_csv`], the caller's choice for
//! [`load_streams_reader`].  Output paths are normalised lexically (`.`
//! segments and repeated separators dropped) before becoming sink ids, so
//! `out/a.log` and `out/./a.log` are the same sink.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::{DelayTable, ScheduleError, ScheduleResult, StreamDefinition};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ManifestRecord {
    template:          String,
    output:            String,
    start_offset_secs: f64,
    delays_secs:       String,
}

// ── Templates ─────────────────────────────────────────────────────────────────

/// Read a template file into ordered lines.
pub fn load_template_lines(path: &Path) -> ScheduleResult<Vec<String>> {
    let file = File::open(path).map_err(|source| ScheduleError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_template_reader(BufReader::new(file)).map_err(|e| match e {
        ScheduleError::Io { source, .. } => ScheduleError::Io {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })
}

/// Like [`load_template_lines`] but accepts any buffered reader.
pub fn load_template_reader<R: BufRead>(reader: R) -> ScheduleResult<Vec<String>> {
    reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ScheduleError::Io { path: "<reader>".into(), source })
}

// ── Manifests ─────────────────────────────────────────────────────────────────

/// Load every stream named in a manifest file, reading each template.
pub fn load_streams_csv(path: &Path) -> ScheduleResult<Vec<StreamDefinition>> {
    let file = File::open(path).map_err(|source| ScheduleError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    load_streams_reader(file, base)
}

/// Like [`load_streams_csv`] but accepts any `Read` source and an explicit
/// base directory.
///
/// Useful for embedded manifests (pass a `std::io::Cursor`).
pub fn load_streams_reader<R: Read>(reader: R, base: &Path) -> ScheduleResult<Vec<StreamDefinition>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut streams = Vec::new();

    for (row_no, result) in csv_reader.deserialize::<ManifestRecord>().enumerate() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let output = normalize(&base.join(&row.output)).display().to_string();

        let delays = parse_delays(&row.delays_secs)
            .and_then(|secs| DelayTable::from_secs_f64(&secs))
            .map_err(|e| ScheduleError::Config(format!("manifest row {}: {output}: {e}", row_no + 1)))?;

        let lines = load_template_lines(&base.join(&row.template))?;
        streams.push(StreamDefinition::with_offset_secs(
            output,
            lines,
            delays,
            row.start_offset_secs,
        )?);
    }

    if streams.is_empty() {
        return Err(ScheduleError::Config("manifest lists no streams".into()));
    }
    Ok(streams)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `path` without `.` segments.  `..` is kept: folding it would be wrong
/// across symlinks.
fn normalize(path: &Path) -> PathBuf {
    let out: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

fn parse_delays(s: &str) -> ScheduleResult<Vec<f64>> {
    s.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| {
                ScheduleError::Parse(format!("invalid delay {tok:?}: expected seconds as a number"))
            })
        })
        .collect()
}
