//! Contact/title code disambiguation.
//!
//! The `A-TE` code is overloaded in the source data: the same code marks
//! phone and extension numbers, the department answering them, and the
//! administrative division the department belongs to. The span text tells
//! them apart.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ContentRule;
use crate::entity::Label;

static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[/:\-~,\s]+$").unwrap());
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());
static ORG_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(과|소|청|원|단|팀|센터|공원|공단|사무소|안내소|관리소|콜센터|공사|부|실|관)[)）]?$")
        .unwrap()
});
static LOC_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new("(군|시|구|읍|면|리|도|동)$").unwrap());

/// Splits the overloaded contact/title code into phone numbers, department
/// names, and administrative divisions.
///
/// - any digit → PHN (phone or extension number)
/// - organizational-unit suffix, optionally followed by a closing bracket → ORG
/// - administrative-division suffix → LOC
/// - empty, pure separators, or anything ambiguous → dropped, keeping noise
///   out of the training set
pub struct ContactTitleRule;

impl ContentRule for ContactTitleRule {
    fn code(&self) -> &'static str {
        "A-TE"
    }

    fn classify(&self, text: &str) -> Option<Label> {
        let clean = text.trim_matches(|c| matches!(c, '(' | ')' | '（' | '）' | ' '));
        if clean.is_empty() || SEPARATOR.is_match(clean) {
            return None;
        }
        if DIGIT.is_match(clean) {
            return Some(Label::Phone);
        }
        if ORG_SUFFIX.is_match(clean) {
            return Some(Label::Organization);
        }
        if LOC_SUFFIX.is_match(clean) {
            return Some(Label::Location);
        }
        None
    }
}
