//! Per-format conversion pipelines.
//!
//! Each driver walks its source files, runs every sentence or document
//! through the span engine (validate → resolve → merge → emit), and writes
//! canonical JSONL. Processing is single-threaded and purely functional at
//! document granularity; the only per-document state is the keyword
//! pipeline's claim set. A failure in one file is recorded in the summary
//! and never aborts the run.

use std::path::{Path, PathBuf};

use crate::claim::ClaimSet;
use crate::emit::{
    DecisionEntry, DiagnosticSinks, DroppedEntry, EmitPolicy, JsonlWriter, RecordEmitter,
};
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::formats::{keyword_json, marker, span_json, tag_table, RawSpan};
use crate::merge::merge_adjacent;
use crate::offset::CharText;
use crate::resolve::TagResolver;
use crate::validate::validate;

/// Accounting for one conversion run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Source files processed successfully.
    pub files: usize,
    /// Records written to the main output.
    pub records: usize,
    /// Entities dropped with a dropped-log entry.
    pub dropped: usize,
    /// Files skipped after a file-level failure, with the failure message.
    pub failures: Vec<(PathBuf, String)>,
}

impl RunSummary {
    fn record_failure(&mut self, path: PathBuf, err: &Error) {
        self.failures.push((path, err.to_string()));
    }
}

/// Convert a tree of offset-annotated labeling JSON files.
///
/// Recurses over `**/*.json` under `input_dir` in sorted order. Writes the
/// main output plus the dropped-entity and per-code decision logs next to
/// it.
pub fn convert_span_json(
    input_dir: &Path,
    output: &Path,
    policy: EmitPolicy,
) -> Result<RunSummary> {
    let files = sorted_files(input_dir, "**/*.json")?;
    let mut out = JsonlWriter::create(output)?;
    let mut sinks = DiagnosticSinks::create(output)?;
    let resolver = TagResolver::span_json();
    let emitter = RecordEmitter::new(policy);
    let mut summary = RunSummary::default();

    for path in files {
        let sentences = match span_json::read_file(&path) {
            Ok(sentences) => sentences,
            Err(e) => {
                summary.record_failure(path, &e);
                continue;
            }
        };
        for (text, spans) in sentences {
            let entities =
                resolve_spans(&text, spans, &resolver, Some(&mut sinks), &mut summary)?;
            let entities = merge_adjacent(&text, entities);
            if let Some(record) = emitter.emit(text.into_string(), entities) {
                out.write(&record)?;
                summary.records += 1;
            }
        }
        summary.files += 1;
    }

    out.flush()?;
    sinks.flush()?;
    Ok(summary)
}

/// Convert a tree of keyword-list labeling JSON files (one record per file).
///
/// Keywords are located through a per-document [`ClaimSet`] in source-list
/// order; keywords whose code does not resolve, or with no free occurrence
/// left, are dropped.
pub fn convert_keyword_json(
    input_dir: &Path,
    output: &Path,
    policy: EmitPolicy,
) -> Result<RunSummary> {
    let files = sorted_files(input_dir, "**/*.json")?;
    let mut out = JsonlWriter::create(output)?;
    let resolver = TagResolver::keyword();
    let emitter = RecordEmitter::new(policy);
    let mut summary = RunSummary::default();

    for path in files {
        let (raw_text, pairs) = match keyword_json::read_file(&path) {
            Ok(parsed) => parsed,
            Err(e) => {
                summary.record_failure(path, &e);
                continue;
            }
        };
        let text = CharText::new(raw_text);
        let mut claims = ClaimSet::new();
        let mut entities = Vec::new();

        for (keyword, code) in pairs {
            let Some(label) = resolver.resolve(&code, &keyword).label else {
                continue;
            };
            let Some((start, end)) = claims.claim_first(&text, &keyword) else {
                continue;
            };
            let Some(span) = validate(&text, start, end) else {
                continue;
            };
            entities.push(Entity::new(span.start, span.end, label));
        }

        let entities = merge_adjacent(&text, entities);
        if let Some(record) = emitter.emit(text.into_string(), entities) {
            out.write(&record)?;
            summary.records += 1;
        }
        summary.files += 1;
    }

    out.flush()?;
    Ok(summary)
}

/// Convert a directory of inline-marker annotated text files.
pub fn convert_marker(input_dir: &Path, output: &Path, policy: EmitPolicy) -> Result<RunSummary> {
    let files = sorted_files(input_dir, "*_NER.txt")?;
    let mut out = JsonlWriter::create(output)?;
    let resolver = TagResolver::marker();
    let emitter = RecordEmitter::new(policy);
    let mut summary = RunSummary::default();

    for path in files {
        let sentences = match marker::read_file(&path) {
            Ok(sentences) => sentences,
            Err(e) => {
                summary.record_failure(path, &e);
                continue;
            }
        };
        for (text, spans) in sentences {
            let entities = resolve_spans(&text, spans, &resolver, None, &mut summary)?;
            let entities = merge_adjacent(&text, entities);
            if let Some(record) = emitter.emit(text.into_string(), entities) {
                out.write(&record)?;
                summary.records += 1;
            }
        }
        summary.files += 1;
    }

    out.flush()?;
    Ok(summary)
}

/// Convert one word/tag table file.
pub fn convert_tag_table(
    input_file: &Path,
    output: &Path,
    policy: EmitPolicy,
) -> Result<RunSummary> {
    let sentences = tag_table::read_file(input_file)?;
    let mut out = JsonlWriter::create(output)?;
    let resolver = TagResolver::tag_table();
    let emitter = RecordEmitter::new(policy);
    let mut summary = RunSummary::default();

    for (text, spans) in sentences {
        let entities = resolve_spans(&text, spans, &resolver, None, &mut summary)?;
        let entities = merge_adjacent(&text, entities);
        if let Some(record) = emitter.emit(text.into_string(), entities) {
            out.write(&record)?;
            summary.records += 1;
        }
    }
    summary.files += 1;

    out.flush()?;
    Ok(summary)
}

/// Validate, resolve, and collect one sentence's raw spans.
///
/// Invalid spans are dropped individually; the sentence keeps its remaining
/// entities. Disambiguation decisions and loggable drops go to the sinks
/// when present.
fn resolve_spans(
    text: &CharText,
    spans: Vec<RawSpan>,
    resolver: &TagResolver,
    mut sinks: Option<&mut DiagnosticSinks>,
    summary: &mut RunSummary,
) -> Result<Vec<Entity>> {
    let mut entities = Vec::new();

    for raw in spans {
        let Some(span) = validate(text, raw.start, raw.end) else {
            continue;
        };
        let resolution = resolver.resolve(&raw.code, &span.text);

        if let (Some(sinks), Some(rule)) = (sinks.as_deref_mut(), resolution.rule) {
            sinks.log_decision(
                rule,
                &DecisionEntry {
                    text: text.as_str(),
                    entity: &span.text,
                    mapped_tag: resolution.label.map(|l| l.as_label()),
                    start: span.start,
                    end: span.end,
                },
            )?;
        }

        match resolution.label {
            Some(label) => entities.push(Entity::new(span.start, span.end, label)),
            None if resolution.log_drop => {
                if let Some(sinks) = sinks.as_deref_mut() {
                    sinks.log_dropped(&DroppedEntry {
                        text: text.as_str(),
                        entity: &span.text,
                        raw_tag: &raw.code,
                        start: span.start,
                        end: span.end,
                    })?;
                }
                summary.dropped += 1;
            }
            None => {}
        }
    }

    Ok(entities)
}

/// Deterministic, sorted file listing for a glob pattern under `dir`.
fn sorted_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = dir.join(pattern);
    let full = full
        .to_str()
        .ok_or_else(|| Error::invalid_input("input path is not valid UTF-8"))?;
    let mut files: Vec<PathBuf> = glob::glob(full)?
        .filter_map(std::result::Result::ok)
        .collect();
    files.sort();
    Ok(files)
}
