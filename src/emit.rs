//! Record assembly, emission policy, and JSONL sinks.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::entity::{Entity, Record};
use crate::error::Result;

/// What to do with a record whose final entity list is empty.
///
/// A per-pipeline parameter, not an engine invariant: every shipped
/// pipeline skips empty records by default, but the CLI can keep them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitPolicy {
    /// Skip the record.
    #[default]
    SkipEmpty,
    /// Emit it anyway.
    KeepEmpty,
}

/// Assembles final records and applies the emission policy.
#[derive(Debug, Clone, Copy)]
pub struct RecordEmitter {
    policy: EmitPolicy,
}

impl RecordEmitter {
    /// Create an emitter with the given policy.
    #[must_use]
    pub fn new(policy: EmitPolicy) -> Self {
        Self { policy }
    }

    /// Build the record, or `None` when the policy filters it out.
    #[must_use]
    pub fn emit(&self, text: String, entities: Vec<Entity>) -> Option<Record> {
        if entities.is_empty() && self.policy == EmitPolicy::SkipEmpty {
            return None;
        }
        Some(Record { text, entities })
    }
}

/// One-JSON-object-per-line writer.
pub struct JsonlWriter {
    out: BufWriter<File>,
}

impl JsonlWriter {
    /// Create the file, making parent directories as needed.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            out: BufWriter::new(File::create(path)?),
        })
    }

    /// Append one value as a JSON line.
    pub fn write<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Dropped-entity log entry.
#[derive(Debug, Clone, Serialize)]
pub struct DroppedEntry<'a> {
    /// Sentence text
    pub text: &'a str,
    /// The dropped span's surface text
    pub entity: &'a str,
    /// Raw source tag code
    pub raw_tag: &'a str,
    /// Span start (char offset)
    pub start: usize,
    /// Span end (char offset, exclusive)
    pub end: usize,
}

/// Disambiguation decision log entry.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionEntry<'a> {
    /// Sentence text
    pub text: &'a str,
    /// The classified span's surface text
    pub entity: &'a str,
    /// Chosen label, or null when the rule dropped the span
    pub mapped_tag: Option<&'static str>,
    /// Span start (char offset)
    pub start: usize,
    /// Span end (char offset, exclusive)
    pub end: usize,
}

/// Diagnostic side channels for the offset-annotated pipeline.
///
/// Written next to the main output: `<stem>_dropped.jsonl` plus one
/// decision log per content-disambiguated code (`<stem>_atm.jsonl`,
/// `<stem>_ate.jsonl`). Side channels never affect the main output.
pub struct DiagnosticSinks {
    dropped: JsonlWriter,
    decisions: Vec<(&'static str, JsonlWriter)>,
}

impl DiagnosticSinks {
    /// Create the side files next to `output`.
    pub fn create(output: &Path) -> Result<Self> {
        Ok(Self {
            dropped: JsonlWriter::create(&sibling(output, "_dropped"))?,
            decisions: vec![
                ("A-TM", JsonlWriter::create(&sibling(output, "_atm"))?),
                ("A-TE", JsonlWriter::create(&sibling(output, "_ate"))?),
            ],
        })
    }

    /// Record a dropped span.
    pub fn log_dropped(&mut self, entry: &DroppedEntry<'_>) -> Result<()> {
        self.dropped.write(entry)
    }

    /// Record a disambiguation decision for `code`. Codes without a sink
    /// are ignored.
    pub fn log_decision(&mut self, code: &str, entry: &DecisionEntry<'_>) -> Result<()> {
        if let Some((_, sink)) = self.decisions.iter_mut().find(|(c, _)| *c == code) {
            sink.write(entry)?;
        }
        Ok(())
    }

    /// Flush every sink.
    pub fn flush(&mut self) -> Result<()> {
        self.dropped.flush()?;
        for (_, sink) in &mut self.decisions {
            sink.flush()?;
        }
        Ok(())
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    path.with_file_name(format!("{stem}{suffix}.jsonl"))
}
