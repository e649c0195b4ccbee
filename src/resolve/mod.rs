//! Raw tag code → canonical label resolution.
//!
//! Each source format carries its own tag vocabulary. A per-source static
//! table maps every known code to a canonical [`Label`], to a drop, or to a
//! content-based rule for the two overloaded codes whose label depends on
//! what the annotated text actually says. Codes absent from a table are
//! dropped, never passed through.

mod contact;
mod method;

pub use contact::ContactTitleRule;
pub use method::ContactMethodRule;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::entity::Label;

/// What a mapping table says about a raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MapAction {
    /// Map to this canonical label.
    Keep(Label),
    /// Drop and record in the dropped-entity log.
    Drop,
    /// Drop without a log entry.
    DropSilent,
    /// Let the code's content rule decide from the span text.
    Disambiguate,
}

/// Content-based disambiguation strategy for one overloaded code.
///
/// One implementation per ambiguous code, selected through the static
/// code→rule table, so the resolver's dispatch stays uniform and each rule
/// is testable on its own.
pub trait ContentRule: Send + Sync {
    /// The raw code this rule owns.
    fn code(&self) -> &'static str;

    /// Classify the trimmed span text, or drop it.
    fn classify(&self, text: &str) -> Option<Label>;
}

/// Static code → strategy table.
fn rule_for(code: &str) -> Option<&'static dyn ContentRule> {
    match code {
        "A-TE" => Some(&ContactTitleRule),
        "A-TM" => Some(&ContactMethodRule),
        _ => None,
    }
}

/// Outcome of resolving one raw code against one span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The canonical label, or `None` when the span is dropped.
    pub label: Option<Label>,
    /// Code of the content rule that decided, when one did. The caller
    /// appends a decision-log entry for every rule invocation.
    pub rule: Option<&'static str>,
    /// Whether a dropped span belongs in the dropped-entity log. Silent
    /// drops are codes the conversion excludes on purpose and in bulk.
    pub log_drop: bool,
}

impl Resolution {
    fn keep(label: Label) -> Self {
        Resolution {
            label: Some(label),
            rule: None,
            log_drop: false,
        }
    }

    fn drop(log: bool) -> Self {
        Resolution {
            label: None,
            rule: None,
            log_drop: log,
        }
    }
}

// =============================================================================
// Per-source mapping tables
// =============================================================================
//
// Immutable process-wide configuration: built once, read everywhere.

static SPAN_JSON_TABLE: Lazy<HashMap<&'static str, MapAction>> = Lazy::new(|| {
    use Label::*;
    use MapAction::*;
    HashMap::from([
        ("O-PS", Keep(Person)),
        ("O-LC", Keep(Location)),
        ("O-OG", Keep(Organization)),
        ("O-DT", Keep(Date)),
        ("O-QT", Keep(Quantity)),
        ("A-AD", Keep(Address)),
        ("A-PO", Keep(Address)),
        ("A-TI", Keep(Time)),
        ("A-DA", Keep(Date)),
        // Phone vs. department name, and e-mail vs. URL vs. place name,
        // depend on the span text.
        ("A-TE", Disambiguate),
        ("A-TM", Disambiguate),
        // Excluded in bulk, not worth a log line each.
        ("O-AF", DropSilent),
        ("O-CV", DropSilent),
        ("O-AM", DropSilent),
        ("O-PT", DropSilent),
        ("O-TR", DropSilent),
        ("O-EV", DropSilent),
        // Excluded but rare enough to keep visible in the dropped log.
        ("A-ET", Drop),
        ("A-PR", Drop),
        ("A-TR", Drop),
        ("A-UN", Drop),
    ])
});

static KEYWORD_TABLE: Lazy<HashMap<&'static str, MapAction>> = Lazy::new(|| {
    use Label::*;
    use MapAction::*;
    HashMap::from([
        ("0", Keep(Date)),
        ("1", Keep(Location)),
        ("2", Keep(Organization)),
        ("3", Keep(Person)),
        ("4", Keep(Quantity)),
        ("5", Keep(Time)),
        // Durations fold into dates.
        ("6", Keep(Date)),
    ])
});

static MARKER_TABLE: Lazy<HashMap<&'static str, MapAction>> = Lazy::new(|| {
    use Label::*;
    use MapAction::*;
    HashMap::from([
        ("PER", Keep(Person)),
        ("ORG", Keep(Organization)),
        ("LOC", Keep(Location)),
        ("DAT", Keep(Date)),
        ("TIM", Keep(Time)),
        // Counts, money, and percentages fold into quantities.
        ("NOH", Keep(Quantity)),
        ("MNY", Keep(Quantity)),
        ("PNT", Keep(Quantity)),
        ("DUR", Keep(Date)),
        // Catch-all proper nouns carry no usable category.
        ("POH", DropSilent),
    ])
});

static TAG_TABLE_TABLE: Lazy<HashMap<&'static str, MapAction>> = Lazy::new(|| {
    use Label::*;
    use MapAction::*;
    HashMap::from([
        ("PER", Keep(Person)),
        ("ORG", Keep(Organization)),
        ("LOC", Keep(Location)),
        ("DAT", Keep(Date)),
        ("NUM", Keep(Quantity)),
        ("TIM", Keep(Time)),
        ("CVL", DropSilent),
        ("TRM", DropSilent),
        ("EVT", DropSilent),
        ("ANM", DropSilent),
        ("AFW", DropSilent),
        ("FLD", DropSilent),
        ("PLT", DropSilent),
        ("MAT", DropSilent),
    ])
});

/// Maps a raw source code to a canonical label, or drops it.
///
/// One resolver per source format; the underlying tables are static and
/// shared.
#[derive(Debug, Clone, Copy)]
pub struct TagResolver {
    table: &'static Lazy<HashMap<&'static str, MapAction>>,
    /// Category prefixes dropped outright, before table lookup.
    drop_prefixes: &'static [&'static str],
}

impl TagResolver {
    /// Resolver for the offset-annotated JSON vocabulary.
    #[must_use]
    pub fn span_json() -> Self {
        // The whole E (expression) category is excluded wholesale.
        TagResolver {
            table: &SPAN_JSON_TABLE,
            drop_prefixes: &["E-"],
        }
    }

    /// Resolver for the keyword-list type codes ("0".."6").
    #[must_use]
    pub fn keyword() -> Self {
        TagResolver {
            table: &KEYWORD_TABLE,
            drop_prefixes: &[],
        }
    }

    /// Resolver for the inline-marker label codes.
    #[must_use]
    pub fn marker() -> Self {
        TagResolver {
            table: &MARKER_TABLE,
            drop_prefixes: &[],
        }
    }

    /// Resolver for the word/tag-table label codes.
    #[must_use]
    pub fn tag_table() -> Self {
        TagResolver {
            table: &TAG_TABLE_TABLE,
            drop_prefixes: &[],
        }
    }

    /// Resolve a raw code against the trimmed span text.
    ///
    /// Unknown codes drop: a vocabulary we have not mapped must never leak
    /// into the training set.
    #[must_use]
    pub fn resolve(&self, code: &str, text: &str) -> Resolution {
        if self.drop_prefixes.iter().any(|p| code.starts_with(p)) {
            return Resolution::drop(false);
        }
        match self.table.get(code) {
            Some(MapAction::Keep(label)) => Resolution::keep(*label),
            Some(MapAction::Drop) => Resolution::drop(true),
            Some(MapAction::DropSilent) => Resolution::drop(false),
            Some(MapAction::Disambiguate) => match rule_for(code) {
                Some(rule) => Resolution {
                    label: rule.classify(text),
                    rule: Some(rule.code()),
                    log_drop: true,
                },
                None => Resolution::drop(true),
            },
            None => Resolution::drop(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_json_static_mappings() {
        let r = TagResolver::span_json();
        assert_eq!(r.resolve("O-PS", "홍길동").label, Some(Label::Person));
        assert_eq!(r.resolve("O-LC", "서울").label, Some(Label::Location));
        assert_eq!(r.resolve("A-PO", "우편번호").label, Some(Label::Address));
        assert_eq!(r.resolve("A-DA", "3월").label, Some(Label::Date));
    }

    #[test]
    fn test_category_prefix_dropped_silently() {
        let r = TagResolver::span_json();
        let res = r.resolve("E-P", "무엇이든");
        assert_eq!(res.label, None);
        assert!(!res.log_drop);
        // Even unmapped E codes fall under the prefix drop.
        let res = r.resolve("E-XX", "무엇이든");
        assert_eq!(res.label, None);
        assert!(!res.log_drop);
    }

    #[test]
    fn test_unknown_code_drops_and_logs() {
        let r = TagResolver::span_json();
        let res = r.resolve("O-ZZ", "무엇이든");
        assert_eq!(res.label, None);
        assert!(res.log_drop);
    }

    #[test]
    fn test_intentional_drops_split_by_loggability() {
        let r = TagResolver::span_json();
        assert!(!r.resolve("O-AF", "x").log_drop);
        assert!(r.resolve("A-UN", "x").log_drop);
    }

    #[test]
    fn test_disambiguated_codes_report_their_rule() {
        let r = TagResolver::span_json();
        let res = r.resolve("A-TE", "031-123-4567");
        assert_eq!(res.rule, Some("A-TE"));
        assert_eq!(res.label, Some(Label::Phone));

        let res = r.resolve("A-TM", "foo@bar.com");
        assert_eq!(res.rule, Some("A-TM"));
        assert_eq!(res.label, Some(Label::Email));
    }

    #[test]
    fn test_keyword_type_codes() {
        let r = TagResolver::keyword();
        assert_eq!(r.resolve("0", "").label, Some(Label::Date));
        assert_eq!(r.resolve("3", "").label, Some(Label::Person));
        assert_eq!(r.resolve("6", "").label, Some(Label::Date));
        assert_eq!(r.resolve("7", "").label, None);
        assert_eq!(r.resolve("-1", "").label, None);
    }

    #[test]
    fn test_marker_codes() {
        let r = TagResolver::marker();
        assert_eq!(r.resolve("NOH", "").label, Some(Label::Quantity));
        assert_eq!(r.resolve("MNY", "").label, Some(Label::Quantity));
        assert_eq!(r.resolve("DUR", "").label, Some(Label::Date));
        assert_eq!(r.resolve("POH", "").label, None);
        assert!(!r.resolve("POH", "").log_drop);
    }

    #[test]
    fn test_tag_table_codes() {
        let r = TagResolver::tag_table();
        assert_eq!(r.resolve("NUM", "").label, Some(Label::Quantity));
        assert_eq!(r.resolve("CVL", "").label, None);
        assert_eq!(r.resolve("PER", "").label, Some(Label::Person));
    }
}
