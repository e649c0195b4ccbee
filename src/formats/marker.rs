//! Inline-marker plain-text source format.
//!
//! Block-structured files: each sentence is exactly three `## `-prefixed
//! header lines (index, plain form, marker-annotated form) followed by
//! token lines; blank lines separate sentences. Entities are embedded as
//! `<entityText:LABELCODE>` in the third header line; the token lines are
//! not used.
//!
//! The adapter strips the markers while copying surrounding text verbatim,
//! recording for each marker the span its entity text occupies within the
//! stripped output. Offsets are accumulated from the emitted pieces, never
//! taken from the marked-up string.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{RawSpan, Sentence};
use crate::error::Result;
use crate::offset::CharText;

/// `<entityText:LABELCODE>` with a 2–4 letter uppercase code.
static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(.+?):([A-Z]{2,4})>").unwrap());

/// Read one marker-annotated file into sentences with raw spans.
pub fn read_file(path: &Path) -> Result<Vec<Sentence>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse(&content))
}

fn parse(content: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut headers: Vec<&str> = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if let Some(rest) = line.strip_prefix("## ") {
            headers.push(rest);
            if headers.len() == 3 {
                sentences.push(strip_markers(headers[2]));
            }
        } else if line.is_empty() {
            // Sentence boundary.
            headers.clear();
        }
    }

    sentences
}

/// Strip markers from the annotated form, returning the plain text and the
/// spans each entity occupies within it.
fn strip_markers(annotated: &str) -> Sentence {
    let mut plain = String::new();
    let mut cursor = 0usize; // char offset into `plain`
    let mut last_end = 0usize; // byte offset into `annotated`
    let mut spans = Vec::new();

    for caps in MARKER.captures_iter(annotated) {
        let Some(whole) = caps.get(0) else { continue };
        let prefix = &annotated[last_end..whole.start()];
        plain.push_str(prefix);
        cursor += prefix.chars().count();

        let entity_text = &caps[1];
        let len = entity_text.chars().count();
        spans.push(RawSpan {
            code: caps[2].to_string(),
            start: cursor,
            end: cursor + len,
        });
        plain.push_str(entity_text);
        cursor += len;
        last_end = whole.end();
    }
    plain.push_str(&annotated[last_end..]);

    (CharText::new(plain), spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_single_marker() {
        let (text, spans) = strip_markers("<홍길동:PER>이 왔다.");
        assert_eq!(text.as_str(), "홍길동이 왔다.");
        assert_eq!(
            spans,
            vec![RawSpan {
                code: "PER".to_string(),
                start: 0,
                end: 3
            }]
        );
    }

    #[test]
    fn test_strip_multiple_markers() {
        let (text, spans) = strip_markers("<홍길동:PER>이 <서울:LOC>에 산다.");
        assert_eq!(text.as_str(), "홍길동이 서울에 산다.");
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 3));
        assert_eq!((spans[1].start, spans[1].end), (5, 7));
        assert_eq!(spans[1].code, "LOC");
    }

    #[test]
    fn test_offsets_index_the_stripped_text() {
        let (text, spans) = strip_markers("오늘 <3시:TIM>에 보자");
        assert_eq!(text.as_str(), "오늘 3시에 보자");
        assert_eq!(text.slice(spans[0].start, spans[0].end), "3시");
    }

    #[test]
    fn test_no_markers_passes_text_through() {
        let (text, spans) = strip_markers("마커가 없는 문장.");
        assert_eq!(text.as_str(), "마커가 없는 문장.");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_unmapped_code_still_extracted() {
        // The resolver decides what to keep; the adapter extracts everything.
        let (_, spans) = strip_markers("<어떤이름:POH>이다.");
        assert_eq!(spans[0].code, "POH");
    }

    #[test]
    fn test_block_structure() {
        let content = "## 1\n\
                       ## 홍길동이 왔다.\n\
                       ## <홍길동:PER>이 왔다.\n\
                       홍길동\tNNP\tB_PER\n\
                       이\tJKS\tO\n\
                       \n\
                       ## 2\n\
                       ## 서울에 간다.\n\
                       ## <서울:LOC>에 간다.\n\
                       서울\tNNP\tB_LOC\n";
        let sentences = parse(content);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].0.as_str(), "홍길동이 왔다.");
        assert_eq!(sentences[1].1[0].code, "LOC");
    }

    #[test]
    fn test_headers_reset_on_blank_line() {
        // Two headers then a blank line: never reaches the annotated form,
        // so no sentence is produced.
        let content = "## 1\n## 원문뿐\n\n## 2\n## 원문\n## <서울:LOC>에 간다.\n";
        let sentences = parse(content);
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].0.as_str(), "서울에 간다.");
    }
}
