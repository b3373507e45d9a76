//! # formcheck
//!
//! Declarative field validation for registration and login forms.
//!
//! ## Philosophy
//!
//! **Pure core, imperative shell**:
//! - The **core** is a [`ValidationEngine`] over an immutable [`RuleSet`].
//!   Each rule pairs one field with a predicate and a message; validating is
//!   a pure function of the rules and the current values.
//! - The **shell** ([`shell`]) wires the engine to a view, an identity
//!   provider and a profile store through capability traits.
//!
//! ## Quick Example
//!
//! ```rust
//! use formcheck::signup::{signup_engine, ADDRESS, EMAIL, NAME, PASSWORD};
//!
//! let engine = signup_engine();
//!
//! // every failing rule is reported, in declaration order
//! assert_eq!(
//!     engine.validate_field(&EMAIL, ""),
//!     ["Email is not valid", "This field is mandatory"]
//! );
//!
//! let report = engine.validate_all([
//!     (EMAIL, "a@b.co"),
//!     (NAME, "X"),
//!     (ADDRESS, "Y"),
//!     (PASSWORD, "Abcdef1!"),
//! ]);
//! assert!(report.all_valid());
//! ```
//!
//! ## Custom rules
//!
//! ```rust
//! use formcheck::predicate::*;
//! use formcheck::{RuleSet, ValidationEngine};
//!
//! let rules = RuleSet::builder()
//!     .fields(["username"])
//!     .rule("username", required(), "Pick a username")
//!     .rule("username", len_between(3, 20), "3 to 20 characters")
//!     .rule("username", |s: &str| !s.contains(' '), "No spaces")
//!     .build()?;
//! let engine = ValidationEngine::new(rules);
//!
//! assert_eq!(engine.validate_field("username", "a b"), ["No spaces"]);
//! # Ok::<(), formcheck::RuleSetError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod engine;
pub mod field;
pub mod predicate;
pub mod report;
pub mod rule;
pub mod semigroup;
pub mod shell;
pub mod signup;
pub mod testing;
pub mod validation;

// Re-exports
pub use engine::{FieldValues, ValidationEngine};
pub use field::FieldId;
pub use report::ValidationReport;
pub use rule::{Rule, RuleSet, RuleSetBuilder, RuleSetError};
pub use semigroup::Semigroup;
pub use validation::Validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{FieldValues, ValidationEngine};
    pub use crate::field::FieldId;
    pub use crate::predicate::{Predicate, PredicateExt};
    pub use crate::report::ValidationReport;
    pub use crate::rule::{RuleSet, RuleSetError};
    pub use crate::semigroup::Semigroup;
    pub use crate::validation::Validation;
}
