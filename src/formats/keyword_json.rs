//! Keyword-list JSON source format.
//!
//! Flat labeling files: a document text (`explain`) plus a `taglist` of
//! `{Keyword, Type}` pairs. Keywords carry no offsets; the conversion
//! pipeline locates each one through the per-document claim set, in
//! source-list order. One output record per file.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct KeywordFile {
    #[serde(default)]
    explain: String,
    taglist: Option<Vec<TagItem>>,
}

#[derive(Debug, Deserialize)]
struct TagItem {
    #[serde(rename = "Keyword", default)]
    keyword: String,
    #[serde(rename = "Type")]
    type_code: Option<i64>,
}

/// Read one file into its text and ordered (keyword, type-code) pairs.
///
/// Items with an empty keyword or a missing type code are skipped; the
/// type code is passed on as a string for the tag resolver.
pub fn read_file(path: &Path) -> Result<(String, Vec<(String, String)>)> {
    let content = std::fs::read_to_string(path)?;
    parse(&content).map_err(|e| Error::parse(format!("{}: {e}", path.display())))
}

fn parse(
    content: &str,
) -> std::result::Result<(String, Vec<(String, String)>), serde_json::Error> {
    let file: KeywordFile = serde_json::from_str(content)?;
    let pairs = file
        .taglist
        .unwrap_or_default()
        .into_iter()
        .filter(|item| !item.keyword.is_empty())
        .filter_map(|item| item.type_code.map(|c| (item.keyword, c.to_string())))
        .collect();
    Ok((file.explain, pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs_in_order() {
        let json = r#"{
            "explain": "경복궁은 서울에 있다",
            "taglist": [
                {"Keyword": "경복궁", "Type": 1},
                {"Keyword": "서울", "Type": 1}
            ]
        }"#;
        let (text, pairs) = parse(json).unwrap();
        assert_eq!(text, "경복궁은 서울에 있다");
        assert_eq!(
            pairs,
            vec![
                ("경복궁".to_string(), "1".to_string()),
                ("서울".to_string(), "1".to_string())
            ]
        );
    }

    #[test]
    fn test_missing_type_or_keyword_skipped() {
        let json = r#"{
            "explain": "본문",
            "taglist": [
                {"Keyword": "", "Type": 1},
                {"Keyword": "남은것"},
                {"Keyword": "유효", "Type": 3}
            ]
        }"#;
        let (_, pairs) = parse(json).unwrap();
        assert_eq!(pairs, vec![("유효".to_string(), "3".to_string())]);
    }

    #[test]
    fn test_null_taglist() {
        let (text, pairs) = parse(r#"{"explain": "본문", "taglist": null}"#).unwrap();
        assert_eq!(text, "본문");
        assert!(pairs.is_empty());
    }
}
