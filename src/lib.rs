//! # nerconv
//!
//! Converts heterogeneous annotated-corpus formats into one canonical
//! character-offset entity-tagged JSONL format for NER training.
//!
//! ## Source Formats
//!
//! | Format | Module | Shape |
//! |--------|--------|-------|
//! | Offset-annotated JSON | [`formats::span_json`] | inclusive char offsets + literal cross-check |
//! | Keyword-list JSON | [`formats::keyword_json`] | keywords without offsets, claimed left to right |
//! | Inline-marker text | [`formats::marker`] | `<entity:CODE>` markers in sentence headers |
//! | Word/tag table | [`formats::tag_table`] | `idx⇥word⇥tag` rows, `{-, LABEL_B, LABEL_I}` |
//!
//! ## Output
//!
//! One JSON object per line:
//!
//! ```json
//! {"text": "홍길동이 서울에 산다.", "entities": [[0, 3, "PER"], [5, 7, "LOC"]]}
//! ```
//!
//! `start` is 0-based inclusive, `end` exclusive, both **character** offsets
//! into `text`; entities are sorted ascending and non-overlapping; labels
//! come from the closed ten-value vocabulary
//! (PER, LOC, ORG, DAT, TIM, QT, ADD, PHN, URL, EML).
//!
//! ## Pipeline
//!
//! ```text
//! adapter → validator → tag resolver → (keyword allocation) → merger → emitter
//! ```
//!
//! Each sentence flows through independently; no state crosses document
//! boundaries except the keyword pipeline's per-document claim set.
//! Per-file failures are isolated and reported in the run summary.
//!
//! ## Example
//!
//! ```rust
//! use nerconv::{merge_adjacent, CharText, Entity, Label};
//!
//! let text = CharText::new("경기도 수원시 문화관광과");
//! let merged = merge_adjacent(
//!     &text,
//!     vec![
//!         Entity::new(0, 7, Label::Location),
//!         Entity::new(8, 13, Label::Organization),
//!     ],
//! );
//! // The locality prefix and its department fuse into one ORG entity.
//! assert_eq!(merged, vec![Entity::new(0, 13, Label::Organization)]);
//! ```

#![warn(missing_docs)]

pub mod claim;
pub mod convert;
pub mod emit;
mod entity;
mod error;
pub mod formats;
pub mod merge;
pub mod offset;
pub mod resolve;
pub mod validate;

pub use claim::ClaimSet;
pub use convert::{
    convert_keyword_json, convert_marker, convert_span_json, convert_tag_table, RunSummary,
};
pub use emit::{EmitPolicy, RecordEmitter};
pub use entity::{Entity, Label, Record};
pub use error::{Error, Result};
pub use merge::merge_adjacent;
pub use offset::CharText;
pub use resolve::{ContentRule, TagResolver};
pub use validate::{validate, TrimmedSpan};
