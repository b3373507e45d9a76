//! Declarative field rules
//!
//! A [`Rule`] ties a predicate and a message to one field. A [`RuleSet`] is
//! the immutable, ordered collection the engine evaluates; it is assembled
//! once with [`RuleSetBuilder`] and never changes afterwards.
//!
//! # Example
//!
//! ```
//! use formcheck::predicate::{email_shape, required};
//! use formcheck::RuleSet;
//!
//! let rules = RuleSet::builder()
//!     .fields(["email", "name"])
//!     .rule("email", email_shape(), "Email is not valid")
//!     .rule("email", required(), "This field is mandatory")
//!     .rule("name", required(), "This field is mandatory")
//!     .build()?;
//!
//! assert_eq!(rules.len(), 3);
//! assert_eq!(rules.for_field("email").count(), 2);
//! # Ok::<(), formcheck::RuleSetError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::predicate::Predicate;
use crate::FieldId;

/// Errors raised while assembling a rule set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleSetError {
    /// A rule targets a field that was not declared with
    /// [`RuleSetBuilder::field`] or [`RuleSetBuilder::fields`].
    #[error("rule #{index} targets undeclared field `{field}`")]
    UnknownField {
        /// The offending field id.
        field: FieldId,
        /// Position of the rule in declaration order.
        index: usize,
    },
    /// A length rule was configured with `min > max`.
    #[error("length bounds for `{field}` are inverted: min {min} > max {max}")]
    InvertedBounds {
        /// Field the length rule targets.
        field: FieldId,
        /// Configured lower bound.
        min: usize,
        /// Configured upper bound.
        max: usize,
    },
}

/// One `(field, predicate, message)` triple.
///
/// The predicate is held directly, so there is no validator name to look up
/// or misspell.
#[derive(Clone)]
pub struct Rule {
    field: FieldId,
    check: Arc<dyn Predicate<str>>,
    message: String,
}

impl Rule {
    /// Create a rule.
    pub fn new<P>(field: impl Into<FieldId>, check: P, message: impl Into<String>) -> Self
    where
        P: Predicate<str> + 'static,
    {
        Rule {
            field: field.into(),
            check: Arc::new(check),
            message: message.into(),
        }
    }

    /// The field this rule targets.
    pub fn field(&self) -> &FieldId {
        &self.field
    }

    /// The message reported when the predicate fails.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether `value` satisfies this rule.
    #[inline]
    pub fn passes(&self, value: &str) -> bool {
        self.check.check(value)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// An immutable, ordered set of rules plus the fields they cover.
///
/// Cloning is cheap: predicates are shared.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    fields: Vec<FieldId>,
}

impl RuleSet {
    /// Start building a rule set.
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// All rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules for one field, in declaration order.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| rule.field == *field)
    }

    /// The fields of the form, in declaration order.
    ///
    /// These are the explicitly declared fields, or, when none were declared,
    /// every field named by a rule in order of first appearance.
    pub fn fields(&self) -> &[FieldId] {
        &self.fields
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder for [`RuleSet`].
///
/// Declaring fields turns on the unknown-field check in
/// [`build`](RuleSetBuilder::build). Fields may be declared without any
/// rule; they are then always valid but still part of the form.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
    declared: Vec<FieldId>,
}

impl RuleSetBuilder {
    /// Declare one field of the form.
    pub fn field(mut self, field: impl Into<FieldId>) -> Self {
        let field = field.into();
        if !self.declared.contains(&field) {
            self.declared.push(field);
        }
        self
    }

    /// Declare several fields of the form.
    pub fn fields<I>(self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldId>,
    {
        fields.into_iter().fold(self, |builder, field| builder.field(field))
    }

    /// Append a rule. Rules for the same field are evaluated in the order they
    /// are added.
    pub fn rule<P>(mut self, field: impl Into<FieldId>, check: P, message: impl Into<String>) -> Self
    where
        P: Predicate<str> + 'static,
    {
        self.rules.push(Rule::new(field, check, message));
        self
    }

    /// Append a prebuilt rule.
    pub fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Finish the set.
    ///
    /// Fails with [`RuleSetError::UnknownField`] if fields were declared and a
    /// rule names one that was not.
    pub fn build(self) -> Result<RuleSet, RuleSetError> {
        let fields = if self.declared.is_empty() {
            let mut inferred: Vec<FieldId> = Vec::new();
            for rule in &self.rules {
                if !inferred.contains(&rule.field) {
                    inferred.push(rule.field.clone());
                }
            }
            inferred
        } else {
            if let Some((index, rule)) = self
                .rules
                .iter()
                .enumerate()
                .find(|(_, rule)| !self.declared.contains(&rule.field))
            {
                return Err(RuleSetError::UnknownField {
                    field: rule.field.clone(),
                    index,
                });
            }
            self.declared
        };

        Ok(RuleSet {
            rules: self.rules,
            fields,
        })
    }
}
