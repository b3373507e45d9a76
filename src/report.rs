//! Per-field validation report

use std::collections::BTreeMap;

use crate::{FieldId, Semigroup};

/// The complete outcome of one validation pass.
///
/// Maps every validated field to the messages of its failing rules, in rule
/// declaration order. An empty list means the field is currently valid.
/// Reports are rebuilt from scratch on every pass, so they never carry stale
/// messages. Fields iterate in id order.
///
/// ```
/// use formcheck::signup::{signup_engine, EMAIL, PASSWORD};
///
/// let engine = signup_engine();
/// let report = engine.validate_all([(EMAIL, "a@b.co"), (PASSWORD, "abc123")]);
///
/// assert!(!report.all_valid());
/// assert!(report.is_valid("email"));
/// assert_eq!(report.errors("password").len(), 1);
/// assert_eq!(report.invalid_fields().collect::<Vec<_>>(), [&PASSWORD]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ValidationReport {
    fields: BTreeMap<FieldId, Vec<String>>,
}

impl ValidationReport {
    /// An empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one field, replacing any previous entry.
    pub fn insert(&mut self, field: impl Into<FieldId>, messages: Vec<String>) {
        self.fields.insert(field.into(), messages);
    }

    /// True iff every field in the report has no messages.
    ///
    /// An empty report is valid.
    pub fn all_valid(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }

    /// True when `field` has no messages (or was not validated).
    pub fn is_valid(&self, field: &str) -> bool {
        self.errors(field).is_empty()
    }

    /// Messages for `field`; empty for valid or unknown fields.
    pub fn errors(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `field` took part in the pass.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Fields that have at least one message.
    pub fn invalid_fields(&self) -> impl Iterator<Item = &FieldId> {
        self.fields
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(field, _)| field)
    }

    /// Total number of messages across all fields.
    pub fn error_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Every validated field with its messages.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field, messages.as_slice()))
    }

    /// Number of fields in the report.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field was validated.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the report into its underlying map.
    pub fn into_inner(self) -> BTreeMap<FieldId, Vec<String>> {
        self.fields
    }
}

/// Merges field by field; messages for a field present in both reports are
/// concatenated, left first.
impl Semigroup for ValidationReport {
    fn combine(self, other: Self) -> Self {
        ValidationReport {
            fields: self.fields.combine(other.fields),
        }
    }
}

impl<K: Into<FieldId>> FromIterator<(K, Vec<String>)> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        ValidationReport {
            fields: iter
                .into_iter()
                .map(|(field, messages)| (field.into(), messages))
                .collect(),
        }
    }
}

impl IntoIterator for ValidationReport {
    type Item = (FieldId, Vec<String>);
    type IntoIter = std::collections::btree_map::IntoIter<FieldId, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
