//! Contact-method code disambiguation.
//!
//! The `A-TM` code is overloaded: the same code marks e-mail addresses,
//! web addresses (often mangled — truncated schemes like `ttp:` appear in
//! the data), and occasionally a bare place name. Anything else under the
//! code is garbage and dropped.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ContentRule;
use crate::entity::Label;

/// Scheme-ish prefixes, including truncated variants missing the leading
/// character.
const URL_PREFIXES: &[&str] = &["http", "www.", "ftp", "ttp:", "ttps:"];

static DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\w.-]+\.(kr|com|net|org|go\.kr|co\.kr|or\.kr|ne\.kr)").unwrap()
});
static NON_LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new("(?i)관광|여행|포털|없음|홈페이지|비짓|visit").unwrap());
static HANGUL_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new("^[가-힣]+$").unwrap());
static VERB_ENDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(하는|하다|이다|하며|하고|하면|이고|이며|하기|스러운|스럽다|올구양)$").unwrap()
});

/// Splits the overloaded contact-method code into e-mail addresses, web
/// addresses, and bare place names.
///
/// - contains `@` → EML
/// - scheme prefix or domain suffix → URL
/// - pure Hangul, no tourism-portal keyword, no verbal/adjectival ending
///   → LOC (the leftover real place names hiding under the code)
/// - everything else → dropped
pub struct ContactMethodRule;

impl ContentRule for ContactMethodRule {
    fn code(&self) -> &'static str {
        "A-TM"
    }

    fn classify(&self, text: &str) -> Option<Label> {
        if text.contains('@') {
            return Some(Label::Email);
        }
        if URL_PREFIXES.iter().any(|p| text.starts_with(p)) || DOMAIN.is_match(text) {
            return Some(Label::Url);
        }
        if HANGUL_ONLY.is_match(text)
            && !NON_LOCATION.is_match(text)
            && !VERB_ENDING.is_match(text)
        {
            return Some(Label::Location);
        }
        None
    }
}
