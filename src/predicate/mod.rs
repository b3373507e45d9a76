//! Predicate combinators for field checks
//!
//! A predicate is a pure `&str -> bool` test. Rules attach a message to a
//! predicate; the engine reports the message whenever the predicate returns
//! false. Built-ins cover the usual form checks, and `and`/`or`/`not` build
//! anything else from them. Plain closures work too.
//!
//! # Example
//!
//! ```rust
//! use formcheck::predicate::*;
//!
//! assert!(required().check("Ada"));
//! assert!(email_shape().check("ada@example.com"));
//! assert!(password_strength().and(len_between(6, 15)).check("Abcdef1!"));
//!
//! let no_digits = |s: &str| !s.chars().any(|c| c.is_ascii_digit());
//! assert!(no_digits.and(required()).check("Ada"));
//! ```

mod combinators;
mod string;

pub mod prelude;

// Re-export core trait
pub use combinators::{And, Not, Or, Predicate, PredicateExt};

// Re-export string predicates
pub use string::{
    all_chars, any_char, email_shape, len_between, len_max, len_min, matches, password_strength,
    required, AllChars, AnyChar, EmailShape, LenBetween, Matches, NotEmpty, PasswordStrength,
    EMAIL_PATTERN, PASSWORD_MIN_CHARS,
};
