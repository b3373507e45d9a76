//! Semigroup trait for merging validation output
//!
//! Validation never stops at the first failure: messages from independent
//! rules, fields or passes are merged with an associative `combine`. The
//! engine relies on this for [`Validation::and`](crate::Validation::and) and
//! for merging [`ValidationReport`](crate::ValidationReport)s.
//!
//! # Laws
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use formcheck::Semigroup;
//!
//! let first = vec!["Email is not valid"];
//! let second = vec!["This field is mandatory"];
//! assert_eq!(
//!     first.combine(second),
//!     vec!["Email is not valid", "This field is mandatory"]
//! );
//! ```

use std::collections::BTreeMap;

/// A type that supports an associative binary operation.
///
/// `combine` takes both operands by value; clone first if the originals are
/// still needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively.
    fn combine(self, other: Self) -> Self;
}

// Appends, keeping the left operand's order first.
impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

/// Key-wise merge: entries present on both sides are combined, left first.
///
/// ```
/// use std::collections::BTreeMap;
/// use formcheck::Semigroup;
///
/// let left = BTreeMap::from([("email", vec!["a"])]);
/// let right = BTreeMap::from([("email", vec!["b"]), ("name", vec![])]);
///
/// let merged = left.combine(right);
/// assert_eq!(merged["email"], vec!["a", "b"]);
/// assert!(merged["name"].is_empty());
/// ```
impl<K: Ord, V: Semigroup> Semigroup for BTreeMap<K, V> {
    fn combine(mut self, other: Self) -> Self {
        for (key, value) in other {
            let merged = match self.remove(&key) {
                Some(existing) => existing.combine(value),
                None => value,
            };
            self.insert(key, merged);
        }
        self
    }
}
