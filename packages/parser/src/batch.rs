//! NDJSON batch driver.
//!
//! Reads one JSON record per line, parses each independently and writes one
//! output line per non-blank input line, in input order. A record that cannot
//! be decoded or parsed becomes an error line; it never stops the batch.

use std::io::{BufRead, Write};
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::BATCH_CHUNK_SIZE;
use crate::error::{ParserError, Result};
use crate::parser::DocumentParser;
use crate::types::{ParsedDocument, RawDocumentRecord, FIELD_ID};

/// Batch driver options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Worker threads per chunk; 1 parses on the calling thread.
    pub jobs: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self { jobs: 1 }
    }
}

/// Running totals of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Output lines written.
    pub records: usize,

    /// Output lines that are error records.
    pub errors: usize,
}

/// Output line for a record that failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,

    /// Original record id, or null when it could not be recovered.
    pub id: Value,
}

impl ErrorRecord {
    fn to_json_line(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"unserializable error record","id":null}"#.to_string())
    }
}

/// One processed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedLine {
    /// Serialized output record.
    pub json: String,

    /// Whether `json` is an error record.
    pub failed: bool,
}

impl ProcessedLine {
    fn failed(error: impl ToString, id: Value) -> Self {
        let record = ErrorRecord {
            error: error.to_string(),
            id,
        };
        Self {
            json: record.to_json_line(),
            failed: true,
        }
    }
}

/// Parse one input line into its output line.
///
/// The id is recovered from the raw JSON whenever the line is a JSON object,
/// so even records with an invalid shape are reported against their id.
#[must_use]
pub fn process_line(parser: &DocumentParser, line: &str) -> ProcessedLine {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => return ProcessedLine::failed(ParserError::from(e), Value::Null),
    };
    let id = value.get(FIELD_ID).cloned().unwrap_or(Value::Null);

    let record = match RawDocumentRecord::from_value(value) {
        Ok(record) => record,
        Err(e) => return ProcessedLine::failed(e, id),
    };

    guarded(id, || parser.parse(&record))
}

/// Run `parse`, turning a panic or a serialization failure into an error line.
fn guarded(id: Value, parse: impl FnOnce() -> ParsedDocument) -> ProcessedLine {
    match panic::catch_unwind(AssertUnwindSafe(parse)) {
        Ok(doc) => match serde_json::to_string(&doc) {
            Ok(json) => ProcessedLine {
                json,
                failed: false,
            },
            Err(e) => ProcessedLine::failed(ParserError::from(e), id),
        },
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(id = %id, error = %message, "parser panicked on record");
            ProcessedLine::failed(format!("parser panicked: {message}"), id)
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Parse every record in `input` and write the results to `output`.
///
/// Blank lines are skipped. Input is read in chunks; with `jobs > 1` each
/// chunk is split across scoped worker threads and the results are written
/// back in input order. `on_progress` is called with the running totals
/// after each chunk.
///
/// Only I/O failures on the streams themselves are returned as errors.
pub fn run_batch<R, W, F>(
    parser: &DocumentParser,
    input: R,
    mut output: W,
    options: &BatchOptions,
    mut on_progress: F,
) -> Result<BatchSummary>
where
    R: BufRead,
    W: Write,
    F: FnMut(&BatchSummary),
{
    if options.jobs == 0 {
        return Err(ParserError::Config("jobs must be at least 1".into()));
    }

    let mut summary = BatchSummary::default();
    let mut chunk: Vec<String> = Vec::with_capacity(BATCH_CHUNK_SIZE);

    for line in input.split(b'\n') {
        let line = decode_line(line?);
        if line.trim().is_empty() {
            continue;
        }
        chunk.push(line);

        if chunk.len() == BATCH_CHUNK_SIZE {
            write_chunk(parser, &chunk, options.jobs, &mut output, &mut summary)?;
            on_progress(&summary);
            chunk.clear();
        }
    }

    if !chunk.is_empty() {
        write_chunk(parser, &chunk, options.jobs, &mut output, &mut summary)?;
        on_progress(&summary);
    }

    output.flush()?;
    tracing::info!(
        records = summary.records,
        errors = summary.errors,
        "batch complete"
    );
    Ok(summary)
}

/// Invalid UTF-8 is replaced rather than rejected; the JSON decoder then
/// reports the line as a record failure if it is unusable.
fn decode_line(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn write_chunk<W: Write>(
    parser: &DocumentParser,
    lines: &[String],
    jobs: usize,
    output: &mut W,
    summary: &mut BatchSummary,
) -> Result<()> {
    for processed in process_chunk(parser, lines, jobs)? {
        writeln!(output, "{}", processed.json)?;
        summary.records += 1;
        if processed.failed {
            summary.errors += 1;
        }
    }
    Ok(())
}

fn process_chunk(parser: &DocumentParser, lines: &[String], jobs: usize) -> Result<Vec<ProcessedLine>> {
    if jobs <= 1 || lines.len() < 2 {
        return Ok(lines.iter().map(|line| process_line(parser, line)).collect());
    }

    let per_worker = lines.len().div_ceil(jobs);
    std::thread::scope(|scope| -> Result<Vec<ProcessedLine>> {
        let handles: Vec<_> = lines
            .chunks(per_worker)
            .map(|part| {
                scope.spawn(move || {
                    part.iter()
                        .map(|line| process_line(parser, line))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut results = Vec::with_capacity(lines.len());
        for handle in handles {
            let part = handle
                .join()
                .map_err(|_| ParserError::Io(std::io::Error::other("batch worker thread panicked")))?;
            results.extend(part);
        }
        Ok(results)
    })
}
