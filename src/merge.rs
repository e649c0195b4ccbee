//! Adjacent-span consolidation.
//!
//! Source annotations sometimes split what is semantically one entity into
//! fragments ("경기도 수원시" + "문화관광과"). The merger folds a
//! start-sorted span list into the minimal non-overlapping set, joining
//! spans whose gap is empty or all-whitespace.

use crate::entity::{Entity, Label};
use crate::offset::CharText;

/// Merge spans separated only by whitespace into consolidated entities.
///
/// The fold keeps one "current" span while walking the rest in ascending
/// start order:
///
/// - a gap containing any non-whitespace character closes the current span;
/// - across a blank gap, equal labels extend the current span;
/// - a LOC span followed by an ORG span extends and upgrades to ORG
///   (one direction only: a department name completes its locality prefix,
///   never the other way around);
/// - anything else closes the current span.
///
/// Produces a new vector; the input is consumed, never mutated in place.
/// Extension never shrinks the current span, so output spans stay
/// non-overlapping and ascending, and merging is idempotent.
#[must_use]
pub fn merge_adjacent(text: &CharText, entities: Vec<Entity>) -> Vec<Entity> {
    if entities.len() < 2 {
        return entities;
    }
    let mut sorted = entities;
    sorted.sort_by_key(|e| e.start);

    let mut iter = sorted.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };
    let mut merged = Vec::new();

    for next in iter {
        if !text.is_blank(current.end, next.start) {
            merged.push(current);
            current = next;
            continue;
        }
        if current.label == next.label {
            current.end = current.end.max(next.end);
        } else if current.label == Label::Location && next.label == Label::Organization {
            current.end = current.end.max(next.end);
            current.label = Label::Organization;
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const LABELS: [Label; 10] = [
        Label::Person,
        Label::Location,
        Label::Organization,
        Label::Date,
        Label::Time,
        Label::Quantity,
        Label::Address,
        Label::Phone,
        Label::Url,
        Label::Email,
    ];

    /// Non-overlapping spans over generated text; each item is
    /// (gap length, gap is whitespace, span length, label index).
    fn spans_with_text() -> impl Strategy<Value = (CharText, Vec<Entity>)> {
        prop::collection::vec((0usize..3, prop::bool::ANY, 1usize..4, 0usize..10), 0..8).prop_map(
            |items| {
                let mut text = String::new();
                let mut entities = Vec::new();
                let mut cursor = 0usize;
                for (gap, blank, len, label_idx) in items {
                    for _ in 0..gap {
                        text.push(if blank { ' ' } else { 'x' });
                    }
                    cursor += gap;
                    for _ in 0..len {
                        text.push('가');
                    }
                    entities.push(Entity::new(cursor, cursor + len, LABELS[label_idx]));
                    cursor += len;
                }
                (CharText::new(text), entities)
            },
        )
    }

    proptest! {
        #[test]
        fn merged_is_sorted_and_nonoverlapping((text, entities) in spans_with_text()) {
            let merged = merge_adjacent(&text, entities);
            for pair in merged.windows(2) {
                prop_assert!(pair[0].start <= pair[1].start);
                prop_assert!(pair[0].end <= pair[1].start);
            }
            for e in &merged {
                prop_assert!(e.start < e.end);
                prop_assert!(e.end <= text.len());
            }
        }

        #[test]
        fn merge_is_idempotent((text, entities) in spans_with_text()) {
            let once = merge_adjacent(&text, entities);
            let twice = merge_adjacent(&text, once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn merge_never_loses_coverage((text, entities) in spans_with_text()) {
            // Inputs are non-overlapping, so merging can only add gap
            // whitespace to the covered total, never remove annotated text.
            let total: usize = entities.iter().map(|e| e.end - e.start).sum();
            let merged = merge_adjacent(&text, entities);
            let covered: usize = merged.iter().map(|e| e.end - e.start).sum();
            prop_assert!(covered >= total);
        }
    }
}
