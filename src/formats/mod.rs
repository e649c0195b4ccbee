//! Source-format adapters.
//!
//! One module per supported corpus format. Each adapter reads one source
//! file and produces, per sentence or document, the text plus an ordered
//! list of [`RawSpan`]s — source-labeled character spans, untouched by any
//! canonicalization policy. Validation, tag resolution, and merging happen
//! downstream in [`crate::convert`].

pub mod keyword_json;
pub mod marker;
pub mod span_json;
pub mod tag_table;

use crate::offset::CharText;

/// A source-labeled span extracted by an adapter.
///
/// `code` is the raw source vocabulary (e.g. `O-PS`, `NOH`, `3`), not a
/// canonical label; offsets are character offsets into the sentence text.
/// Created per source item and consumed immediately, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpan {
    /// Raw source tag code
    pub code: String,
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

/// One sentence with its raw source-labeled spans.
pub type Sentence = (CharText, Vec<RawSpan>);
