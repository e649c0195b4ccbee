//! Canonical labels, entity spans, and output records.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical entity label.
///
/// The closed ten-value vocabulary of the output format. Source-specific tag
/// codes are mapped into this set (or dropped) by the tag resolver; nothing
/// outside it is ever emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Person name (PER)
    Person,
    /// Place name (LOC)
    Location,
    /// Organization or institution name (ORG)
    Organization,
    /// Date expression (DAT)
    Date,
    /// Time expression (TIM)
    Time,
    /// Quantity: counts, money, percentages (QT)
    Quantity,
    /// Postal address (ADD)
    Address,
    /// Phone number (PHN)
    Phone,
    /// Web address (URL)
    Url,
    /// E-mail address (EML)
    Email,
}

impl Label {
    /// Convert to the output label string.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Label::Person => "PER",
            Label::Location => "LOC",
            Label::Organization => "ORG",
            Label::Date => "DAT",
            Label::Time => "TIM",
            Label::Quantity => "QT",
            Label::Address => "ADD",
            Label::Phone => "PHN",
            Label::Url => "URL",
            Label::Email => "EML",
        }
    }

    /// Parse from a label string. Returns `None` for anything outside the
    /// canonical vocabulary.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "PER" => Some(Label::Person),
            "LOC" => Some(Label::Location),
            "ORG" => Some(Label::Organization),
            "DAT" => Some(Label::Date),
            "TIM" => Some(Label::Time),
            "QT" => Some(Label::Quantity),
            "ADD" => Some(Label::Address),
            "PHN" => Some(Label::Phone),
            "URL" => Some(Label::Url),
            "EML" => Some(Label::Email),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_label())
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Label::from_label(&s).ok_or_else(|| de::Error::custom(format!("unknown label: {s}")))
    }
}

/// An entity span over a record's text.
///
/// `start` is inclusive, `end` exclusive, both character offsets (not bytes).
/// Serialized as the JSON array `[start, end, "LABEL"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Canonical label
    pub label: Label,
}

impl Entity {
    /// Create a new entity span.
    #[must_use]
    pub fn new(start: usize, end: usize, label: Label) -> Self {
        Self { start, end, label }
    }

    /// Check if this span overlaps with another.
    #[must_use]
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.start)?;
        tup.serialize_element(&self.end)?;
        tup.serialize_element(self.label.as_label())?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for Entity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntityVisitor;

        impl<'de> Visitor<'de> for EntityVisitor {
            type Value = Entity;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [start, end, label] triple")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Entity, A::Error> {
                let start = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let end = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let label: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let label = Label::from_label(&label)
                    .ok_or_else(|| de::Error::custom(format!("unknown label: {label}")))?;
                Ok(Entity { start, end, label })
            }
        }

        deserializer.deserialize_tuple(3, EntityVisitor)
    }
}

/// One output record: sentence text plus its entity spans.
///
/// Emitted as one JSON object per line. Entities are sorted ascending by
/// start and non-overlapping once the record has passed the merge step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Sentence or document text
    pub text: String,
    /// Entity spans, ascending and non-overlapping
    pub entities: Vec<Entity>,
}
