//! Property-based tests for the validation engine

use formcheck::predicate::{email_shape, Predicate};
use formcheck::signup::{signup_engine, ADDRESS, EMAIL, NAME, PASSWORD};
use formcheck::ValidationReport;
use proptest::prelude::*;

fn any_field() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("email".to_string()),
        Just("name".to_string()),
        Just("address".to_string()),
        Just("password".to_string()),
        "[a-z]{1,8}",
    ]
}

proptest! {
    #[test]
    fn prop_email_errors_iff_empty_or_malformed(value in ".{0,24}") {
        let errors = signup_engine().validate_field(&EMAIL, &value);
        let expected_invalid = value.is_empty() || !email_shape().check(&value);
        prop_assert_eq!(!errors.is_empty(), expected_invalid);
    }

    #[test]
    fn prop_shaped_emails_pass(
        local in "[A-Za-z0-9_.+-]{1,10}",
        labels in prop::collection::vec("[A-Za-z0-9-]{1,8}", 1..4),
        tld in "[A-Za-z0-9]{2,4}",
    ) {
        let email = format!("{local}@{}.{tld}", labels.join("."));
        prop_assert!(signup_engine().validate_field(&EMAIL, &email).is_empty());
    }

    #[test]
    fn prop_fields_without_rules_never_fail(
        field in "[a-z]{1,8}".prop_filter("signup field", |f| {
            !matches!(f.as_str(), "email" | "name" | "address" | "password")
        }),
        value in ".*",
    ) {
        prop_assert!(signup_engine().validate_field(&field, &value).is_empty());
    }

    #[test]
    fn prop_validate_all_is_idempotent(
        values in prop::collection::btree_map(any_field(), ".{0,20}", 0..6)
    ) {
        let engine = signup_engine();
        prop_assert_eq!(engine.validate_all(&values), engine.validate_all(&values));
    }

    #[test]
    fn prop_all_valid_iff_every_list_empty(
        values in prop::collection::btree_map(any_field(), ".{0,20}", 0..6)
    ) {
        let report = signup_engine().validate_all(&values);
        let every_empty = report.iter().all(|(_, messages)| messages.is_empty());
        prop_assert_eq!(report.all_valid(), every_empty);
        prop_assert_eq!(report.len(), values.len());
    }

    #[test]
    fn prop_report_matches_per_field_validation(
        email in ".{0,16}",
        name in ".{0,8}",
        address in ".{0,8}",
        password in ".{0,20}",
    ) {
        let engine = signup_engine();
        let report = engine.validate_all([
            (EMAIL, &email),
            (NAME, &name),
            (ADDRESS, &address),
            (PASSWORD, &password),
        ]);

        let email_errors = engine.validate_field(&EMAIL, &email);
        let password_errors = engine.validate_field(&PASSWORD, &password);
        prop_assert_eq!(report.errors("email"), email_errors.as_slice());
        prop_assert_eq!(report.errors("password"), password_errors.as_slice());
        prop_assert_eq!(report.is_valid("name"), !name.is_empty());
        prop_assert_eq!(report.is_valid("address"), !address.is_empty());
    }

    #[test]
    fn prop_combining_reports_keeps_left_messages_first(
        left in prop::collection::vec("[a-z]{1,5}", 0..4),
        right in prop::collection::vec("[a-z]{1,5}", 0..4),
    ) {
        use formcheck::Semigroup;

        let a: ValidationReport = [("email", left.clone())].into_iter().collect();
        let b: ValidationReport = [("email", right.clone())].into_iter().collect();
        let combined = a.combine(b);

        let expected: Vec<String> = left.into_iter().chain(right).collect();
        prop_assert_eq!(combined.errors("email"), expected.as_slice());
    }
}
