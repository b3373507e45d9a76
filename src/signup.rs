//! Rules for the registration and login forms
//!
//! The registration form has four fields: email, name, address and
//! password. Every field is mandatory, the email must be well shaped, and
//! the password must be strong and within the configured length bounds.
//!
//! ```
//! use formcheck::signup::{signup_engine, EMAIL, PASSWORD};
//!
//! let engine = signup_engine();
//! assert_eq!(engine.validate_field(&EMAIL, "not-an-email"), ["Email is not valid"]);
//! assert!(engine.validate_field(&PASSWORD, "Abcdef1!").is_empty());
//! ```

use crate::predicate::{email_shape, len_between, password_strength, required};
use crate::{FieldId, RuleSet, RuleSetError, ValidationEngine};

/// The email field.
pub const EMAIL: FieldId = FieldId::from_static("email");
/// The full-name field.
pub const NAME: FieldId = FieldId::from_static("name");
/// The postal address field.
pub const ADDRESS: FieldId = FieldId::from_static("address");
/// The password field.
pub const PASSWORD: FieldId = FieldId::from_static("password");

/// Reported for a malformed email.
pub const MSG_EMAIL_INVALID: &str = "Email is not valid";
/// Reported for an empty mandatory field.
pub const MSG_REQUIRED: &str = "This field is mandatory";
/// Reported for a weak password.
pub const MSG_PASSWORD_WEAK: &str = "Password should contain at least one lowercase and one uppercase letter, one number and one special character, but no whitespace";

/// Tunables for the registration rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SignupConfig {
    /// Shortest accepted password, in characters.
    pub password_min_len: usize,
    /// Longest accepted password, in characters.
    pub password_max_len: usize,
}

impl Default for SignupConfig {
    fn default() -> Self {
        SignupConfig {
            password_min_len: 6,
            password_max_len: 15,
        }
    }
}

impl SignupConfig {
    /// Message reported when the password length is out of bounds.
    pub fn password_length_message(&self) -> String {
        format!(
            "Password should be {}-{} characters long",
            self.password_min_len, self.password_max_len
        )
    }
}

/// Build the registration rule set.
///
/// Rule order, and therefore message order per field:
///
/// 1. email: shape, then required
/// 2. name: required
/// 3. address: required
/// 4. password: required, then strength, then length
pub fn signup_rules(config: &SignupConfig) -> Result<RuleSet, RuleSetError> {
    if config.password_min_len > config.password_max_len {
        return Err(RuleSetError::InvertedBounds {
            field: PASSWORD,
            min: config.password_min_len,
            max: config.password_max_len,
        });
    }

    RuleSet::builder()
        .fields([EMAIL, NAME, ADDRESS, PASSWORD])
        .rule(EMAIL, email_shape(), MSG_EMAIL_INVALID)
        .rule(EMAIL, required(), MSG_REQUIRED)
        .rule(NAME, required(), MSG_REQUIRED)
        .rule(ADDRESS, required(), MSG_REQUIRED)
        .rule(PASSWORD, required(), MSG_REQUIRED)
        .rule(PASSWORD, password_strength(), MSG_PASSWORD_WEAK)
        .rule(
            PASSWORD,
            len_between(config.password_min_len, config.password_max_len),
            config.password_length_message(),
        )
        .build()
}

/// Engine over the registration rules with the default configuration.
pub fn signup_engine() -> ValidationEngine {
    let rules = signup_rules(&SignupConfig::default()).expect("default signup rules are valid");
    ValidationEngine::new(rules)
}

/// Fields of the login form. Login input is not validated locally; the
/// identity provider is the judge.
pub fn login_fields() -> [FieldId; 2] {
    [EMAIL, PASSWORD]
}
