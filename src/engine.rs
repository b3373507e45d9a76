//! The validation engine
//!
//! [`ValidationEngine`] evaluates an immutable [`RuleSet`] against plain
//! string values. It keeps no state between calls: every method is a pure
//! function of the rules and its arguments, so calling it on each keystroke
//! and again on submit always gives fresh, repeatable answers.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use formcheck::predicate::{email_shape, required};
//! use formcheck::{RuleSet, ValidationEngine};
//!
//! let rules = RuleSet::builder()
//!     .rule("email", email_shape(), "Email is not valid")
//!     .rule("email", required(), "This field is mandatory")
//!     .build()?;
//! let engine = ValidationEngine::new(rules);
//!
//! assert_eq!(
//!     engine.validate_field("email", ""),
//!     ["Email is not valid", "This field is mandatory"]
//! );
//!
//! let values = HashMap::from([("email", "a@b.co")]);
//! assert!(engine.validate_all(values).all_valid());
//! # Ok::<(), formcheck::RuleSetError>(())
//! ```

use std::collections::BTreeMap;

use crate::{FieldId, RuleSet, Validation, ValidationReport};

/// Field values that passed validation, keyed by field id.
pub type FieldValues = BTreeMap<FieldId, String>;

/// Evaluates a fixed rule set against field values.
///
/// Cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    rules: RuleSet,
}

impl ValidationEngine {
    /// Create an engine over `rules`.
    pub fn new(rules: RuleSet) -> Self {
        ValidationEngine { rules }
    }

    /// The rule set this engine evaluates.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Messages of every rule for `field` that `value` fails, in declaration order.
    ///
    /// All rules for the field run; none short-circuits another. A field with
    /// no rules yields an empty list.
    pub fn validate_field(&self, field: impl AsRef<str>, value: &str) -> Vec<String> {
        let field = field.as_ref();
        self.rules
            .for_field(field)
            .filter(|rule| !rule.passes(value))
            .map(|rule| {
                #[cfg(feature = "tracing")]
                tracing::trace!(field, message = rule.message(), "rule failed");
                rule.message().to_owned()
            })
            .collect()
    }

    /// Validate every field present in `values`.
    ///
    /// Accepts anything that iterates `(field, value)` pairs: a `HashMap`, a
    /// `BTreeMap`, an array of tuples. Fields without rules appear in the
    /// report with no messages. Declared fields missing from `values` are not
    /// reported.
    pub fn validate_all<I, K, V>(&self, values: I) -> ValidationReport
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<FieldId>,
        V: AsRef<str>,
    {
        let report: ValidationReport = values
            .into_iter()
            .map(|(field, value)| {
                let field = field.into();
                let messages = self.validate_field(&field, value.as_ref());
                (field, messages)
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            fields = report.len(),
            errors = report.error_count(),
            "validated form values"
        );

        report
    }

    /// Validate `values` and hand them back only if every field passes.
    ///
    /// ```
    /// use formcheck::signup::{signup_engine, ADDRESS, EMAIL, NAME, PASSWORD};
    /// use formcheck::Validation;
    ///
    /// let engine = signup_engine();
    /// let checked = engine.check([
    ///     (EMAIL, "a@b.co"),
    ///     (NAME, "X"),
    ///     (ADDRESS, "Y"),
    ///     (PASSWORD, "Abcdef1!"),
    /// ]);
    ///
    /// match checked {
    ///     Validation::Success(values) => assert_eq!(values["email"], "a@b.co"),
    ///     Validation::Failure(report) => panic!("unexpected errors: {report:?}"),
    /// }
    /// ```
    pub fn check<I, K, V>(&self, values: I) -> Validation<FieldValues, ValidationReport>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<FieldId>,
        V: AsRef<str>,
    {
        let values: FieldValues = values
            .into_iter()
            .map(|(field, value)| (field.into(), value.as_ref().to_owned()))
            .collect();
        let report = self.validate_all(&values);

        if report.all_valid() {
            Validation::success(values)
        } else {
            Validation::failure(report)
        }
    }
}

impl From<RuleSet> for ValidationEngine {
    fn from(rules: RuleSet) -> Self {
        ValidationEngine::new(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{len_min, required};
    use std::collections::HashMap;

    fn engine() -> ValidationEngine {
        RuleSet::builder()
            .rule("name", required(), "name required")
            .rule("code", required(), "code required")
            .rule("code", len_min(3), "code too short")
            .rule("code", |s: &str| s.chars().all(|c| c.is_ascii_digit()), "digits only")
            .build()
            .unwrap()
            .into()
    }

    #[test]
    fn validate_field_collects_every_failure_in_order() {
        assert_eq!(
            engine().validate_field("code", ""),
            ["code required", "code too short"]
        );
        assert_eq!(
            engine().validate_field("code", "a"),
            ["code too short", "digits only"]
        );
        assert!(engine().validate_field("code", "123").is_empty());
    }

    #[test]
    fn validate_field_unknown_field_is_empty() {
        assert!(engine().validate_field("nope", "").is_empty());
        assert!(ValidationEngine::default().validate_field("name", "").is_empty());
    }

    #[test]
    fn validate_all_reports_only_input_fields() {
        let report = engine().validate_all([("name", "")]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors("name"), ["name required"]);
        assert!(!report.contains("code"));
    }

    #[test]
    fn validate_all_includes_fields_without_rules() {
        let report = engine().validate_all([("name", "Ada"), ("nickname", "")]);
        assert!(report.contains("nickname"));
        assert!(report.all_valid());
    }

    #[test]
    fn validate_all_accepts_maps() {
        let values = HashMap::from([("name".to_string(), String::new())]);
        assert!(!engine().validate_all(&values).all_valid());
        assert!(!engine().validate_all(values).all_valid());
    }

    #[test]
    fn validate_all_is_idempotent() {
        let values = [("name", ""), ("code", "x1")];
        let engine = engine();
        assert_eq!(engine.validate_all(values), engine.validate_all(values));
    }

    #[test]
    fn check_returns_values_or_report() {
        let ok = engine().check([("name", "Ada"), ("code", "123")]);
        let values = ok.into_result().unwrap();
        assert_eq!(values["code"], "123");

        let bad = engine().check([("name", ""), ("code", "123")]);
        let report = bad.into_result().unwrap_err();
        assert_eq!(report.errors("name"), ["name required"]);
    }

    #[cfg(feature = "tracing")]
    #[test]
    #[tracing_test::traced_test]
    fn failing_rules_are_traced() {
        engine().validate_all([("code", "x")]);
        assert!(logs_contain("rule failed"));
        assert!(logs_contain("code too short"));
        assert!(logs_contain("validated form values"));
    }
}
