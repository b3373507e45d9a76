//! Predicate prelude for convenient imports
//!
//! ```rust
//! use formcheck::predicate::prelude::*;
//!
//! let p = required().and(len_max(40));
//! assert!(p.check("12 Main Street"));
//! ```

// Core trait
pub use super::combinators::{Predicate, PredicateExt};

// Built-in checks
pub use super::string::{
    email_shape, len_between, len_max, len_min, matches, password_strength, required,
};
