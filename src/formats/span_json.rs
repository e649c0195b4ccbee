//! Offset-annotated JSON source format.
//!
//! Nested labeling files: `docu_info.sentences[]`, each sentence carrying
//! its text and annotation objects with a two-part tag code
//! (`Tagclass` + `TagCode`), an inclusive start offset, an inclusive end
//! offset, and the annotated literal (`TagText`) for cross-checking.
//!
//! Offsets are converted to half-open form here; a slice that disagrees
//! with the declared literal means the offsets are corrupt and the single
//! annotation is dropped while its siblings continue.

use std::path::Path;

use serde::Deserialize;

use super::{RawSpan, Sentence};
use crate::error::{Error, Result};
use crate::offset::CharText;

#[derive(Debug, Deserialize)]
struct LabelFile {
    docu_info: Option<DocuInfo>,
}

#[derive(Debug, Deserialize)]
struct DocuInfo {
    sentences: Option<Vec<SentenceObj>>,
}

#[derive(Debug, Deserialize)]
struct SentenceObj {
    #[serde(default)]
    sentence: String,
    annotations: Option<Vec<Annotation>>,
}

#[derive(Debug, Deserialize)]
struct Annotation {
    #[serde(rename = "TagText")]
    tag_text: Option<String>,
    #[serde(rename = "Tagclass", default)]
    tagclass: String,
    #[serde(rename = "TagCode", default)]
    tagcode: String,
    #[serde(rename = "startPos")]
    start_pos: Option<i64>,
    #[serde(rename = "endPos")]
    end_pos: Option<i64>,
}

/// Read one labeling file into sentences with raw spans.
pub fn read_file(path: &Path) -> Result<Vec<Sentence>> {
    let content = std::fs::read_to_string(path)?;
    parse(&content).map_err(|e| Error::parse(format!("{}: {e}", path.display())))
}

fn parse(content: &str) -> std::result::Result<Vec<Sentence>, serde_json::Error> {
    let file: LabelFile = serde_json::from_str(content)?;
    let sentences = file
        .docu_info
        .and_then(|d| d.sentences)
        .unwrap_or_default();

    Ok(sentences.into_iter().map(convert_sentence).collect())
}

fn convert_sentence(sent: SentenceObj) -> Sentence {
    let text = CharText::new(sent.sentence);
    let mut spans = Vec::new();

    for ann in sent.annotations.unwrap_or_default() {
        let (Some(start), Some(end_inclusive)) = (ann.start_pos, ann.end_pos) else {
            continue;
        };
        let end = end_inclusive + 1;
        if start < 0 || end <= start || end as usize > text.len() {
            continue;
        }
        let (start, end) = (start as usize, end as usize);

        // Corrupt-offset defense: the declared literal must match the slice.
        let extracted = text.slice(start, end);
        if let Some(declared) = &ann.tag_text {
            if *declared != extracted {
                continue;
            }
        }

        spans.push(RawSpan {
            code: format!("{}-{}", ann.tagclass, ann.tagcode),
            start,
            end,
        });
    }

    (text, spans)
}
