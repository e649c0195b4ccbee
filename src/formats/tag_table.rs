//! Word/tag table source format.
//!
//! Tab-separated `idx\tword\ttag` rows, grouped into sentences by blank
//! lines. The tag alphabet is `-` (outside), `LABEL_B` (entity begins), and
//! `LABEL_I` (entity continues). The sentence text is rebuilt by joining
//! words with a single space, and span offsets are accumulated on that
//! reconstruction.

use std::path::Path;

use super::{RawSpan, Sentence};
use crate::error::Result;
use crate::offset::CharText;

/// Read one table file into sentences with raw spans.
pub fn read_file(path: &Path) -> Result<Vec<Sentence>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse(&content))
}

fn parse(content: &str) -> Vec<Sentence> {
    parse_rows(content)
        .into_iter()
        .map(|(words, tags)| {
            let text = CharText::new(words.join(" "));
            let spans = extract_spans(&words, &tags);
            (text, spans)
        })
        .collect()
}

/// Split rows into per-sentence (words, tags); rows with a column count
/// other than 3 are skipped without affecting their siblings.
fn parse_rows(content: &str) -> Vec<(Vec<String>, Vec<String>)> {
    let mut sentences = Vec::new();
    let mut words: Vec<String> = Vec::new();
    let mut tags: Vec<String> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !words.is_empty() {
                sentences.push((std::mem::take(&mut words), std::mem::take(&mut tags)));
            }
            continue;
        }
        let mut parts = line.split('\t');
        let (Some(_idx), Some(word), Some(tag), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        words.push(word.to_string());
        tags.push(tag.to_string());
    }
    if !words.is_empty() {
        sentences.push((words, tags));
    }

    sentences
}

/// Walk the B/I tags, accumulating word offsets over the space-joined text.
///
/// `_B` opens a span; `_I` with the identical label extends it through the
/// joining space; `_B`, or `_I` with a different label, first closes the
/// open span (a malformed `_I` run starts a new span rather than being
/// lost); end of sentence force-closes. `-` and tags without an underscore
/// close the open span. An unrecognized suffix leaves the open span
/// untouched.
fn extract_spans(words: &[String], tags: &[String]) -> Vec<RawSpan> {
    let mut offsets = Vec::with_capacity(words.len());
    let mut cursor = 0usize;
    for word in words {
        offsets.push(cursor);
        cursor += word.chars().count() + 1; // +1: joining space
    }

    let mut spans = Vec::new();
    let mut current: Option<RawSpan> = None;

    for (i, (word, tag)) in words.iter().zip(tags).enumerate() {
        let Some((label, bio)) = tag.rsplit_once('_') else {
            if let Some(span) = current.take() {
                spans.push(span);
            }
            continue;
        };
        let w_start = offsets[i];
        let w_end = w_start + word.chars().count();

        match bio {
            "B" => {
                if let Some(span) = current.take() {
                    spans.push(span);
                }
                current = Some(RawSpan {
                    code: label.to_string(),
                    start: w_start,
                    end: w_end,
                });
            }
            "I" => match current.as_mut() {
                Some(span) if span.code == label => span.end = w_end,
                _ => {
                    if let Some(span) = current.take() {
                        spans.push(span);
                    }
                    current = Some(RawSpan {
                        code: label.to_string(),
                        start: w_start,
                        end: w_end,
                    });
                }
            },
            _ => {}
        }
    }
    if let Some(span) = current.take() {
        spans.push(span);
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_begin_inside_spans_joining_space() {
        let words = to_strings(&["김영삼", "대통령은", "떠났다"]);
        let tags = to_strings(&["PER_B", "PER_I", "-"]);
        let spans = extract_spans(&words, &tags);
        // "김영삼 대통령은 떠났다" — one span across the joining space.
        assert_eq!(
            spans,
            vec![RawSpan {
                code: "PER".to_string(),
                start: 0,
                end: 8
            }]
        );
    }

    #[test]
    fn test_two_begins_make_two_spans() {
        let words = to_strings(&["홍길동", "김철수"]);
        let tags = to_strings(&["PER_B", "PER_B"]);
        let spans = extract_spans(&words, &tags);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 3));
        assert_eq!((spans[1].start, spans[1].end), (4, 7));
    }

    #[test]
    fn test_differing_inside_label_starts_new_span() {
        let words = to_strings(&["서울", "3월"]);
        let tags = to_strings(&["LOC_B", "DAT_I"]);
        let spans = extract_spans(&words, &tags);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].code, "LOC");
        assert_eq!(spans[1].code, "DAT");
    }

    #[test]
    fn test_orphan_inside_starts_span() {
        let words = to_strings(&["어제", "서울"]);
        let tags = to_strings(&["-", "LOC_I"]);
        let spans = extract_spans(&words, &tags);
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (3, 5));
    }

    #[test]
    fn test_end_of_sentence_closes_open_span() {
        let words = to_strings(&["서울", "시청"]);
        let tags = to_strings(&["LOC_B", "LOC_I"]);
        let spans = extract_spans(&words, &tags);
        assert_eq!(spans, vec![RawSpan {
            code: "LOC".to_string(),
            start: 0,
            end: 5
        }]);
    }

    #[test]
    fn test_unrecognized_suffix_leaves_span_open() {
        let words = to_strings(&["서울", "어딘가", "시청"]);
        let tags = to_strings(&["LOC_B", "LOC_X", "LOC_I"]);
        let spans = extract_spans(&words, &tags);
        // The _X row neither extends nor closes; the later _I still extends.
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (0, 9));
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let content = "1\t홍길동\tPER_B\nbroken line\n2\t씨는\t-\n\n1\t서울\tLOC_B\n";
        let sentences = parse(content);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].0.as_str(), "홍길동 씨는");
        assert_eq!(sentences[0].1.len(), 1);
        assert_eq!(sentences[1].0.as_str(), "서울");
    }

    #[test]
    fn test_trailing_sentence_without_blank_line() {
        let content = "1\t서울\tLOC_B";
        let sentences = parse(content);
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].1.len(), 1);
    }
}
