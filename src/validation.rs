//! Validation outcome that accumulates errors
//!
//! `Validation` is shaped like `Result`, but combining two failures keeps both
//! error values (via [`Semigroup`]) instead of stopping at the first one. The
//! engine uses it to hand back either the checked form values or the full
//! [`ValidationReport`](crate::ValidationReport).
//!
//! # Examples
//!
//! ```
//! use formcheck::Validation;
//!
//! let email = Validation::<&str, Vec<&str>>::failure(vec!["Email is not valid"]);
//! let name = Validation::<&str, Vec<&str>>::failure(vec!["This field is mandatory"]);
//!
//! assert_eq!(
//!     email.and(name),
//!     Validation::Failure(vec!["Email is not valid", "This field is mandatory"])
//! );
//! ```

use crate::Semigroup;

/// A validation that either succeeds with a value or fails with accumulated errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with accumulated errors
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Convert this validation to a Result
    ///
    /// # Examples
    ///
    /// ```
    /// use formcheck::Validation;
    ///
    /// let v = Validation::<i32, &str>::failure("This field is mandatory");
    /// assert_eq!(v.into_result(), Err("This field is mandatory"));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }

    /// Check if this validation is successful
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Check if this validation failed
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Transform the success value if present
    #[inline]
    pub fn map<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Transform the error value if present
    ///
    /// # Examples
    ///
    /// ```
    /// use formcheck::Validation;
    ///
    /// let v = Validation::<(), _>::failure(vec!["a", "b"]);
    /// assert_eq!(v.map_err(|errors| errors.len()), Validation::Failure(2));
    /// ```
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(error) => Validation::Failure(f(error)),
        }
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Combine two validations, accumulating errors using the Semigroup instance.
    ///
    /// Both successes yield a tuple; any failure yields the combined errors of
    /// every failing side, left first.
    pub fn and<U>(self, other: Validation<U, E>) -> Validation<(T, U), E> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(e1), Validation::Failure(e2)) => {
                Validation::Failure(e1.combine(e2))
            }
            (Validation::Failure(e), _) => Validation::Failure(e),
            (_, Validation::Failure(e)) => Validation::Failure(e),
        }
    }

    /// Chain a dependent validation.
    ///
    /// `f` only runs when this validation succeeded.
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> Validation<U, E>,
    {
        match self {
            Validation::Success(value) => f(value),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for Validation<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Validation::Success(value),
            Err(error) => Validation::Failure(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_failure_predicates() {
        let ok = Validation::<_, Vec<&str>>::success("a@b.co");
        let bad = Validation::<&str, _>::failure(vec!["Email is not valid"]);
        assert!(ok.is_success());
        assert!(!ok.is_failure());
        assert!(bad.is_failure());
        assert!(!bad.is_success());
    }

    #[test]
    fn test_and_both_success() {
        let v1 = Validation::<_, Vec<&str>>::success("a@b.co");
        let v2 = Validation::<_, Vec<&str>>::success("Ada");
        assert_eq!(v1.and(v2), Validation::Success(("a@b.co", "Ada")));
    }

    #[test]
    fn test_and_accumulates_in_order() {
        let v1 = Validation::<i32, _>::failure(vec!["first"]);
        let v2 = Validation::<i32, _>::failure(vec!["second", "third"]);
        assert_eq!(
            v1.and(v2),
            Validation::Failure(vec!["first", "second", "third"])
        );
    }

    #[test]
    fn test_and_one_side_failure() {
        let ok = Validation::<_, Vec<&str>>::success(1);
        let bad = Validation::<i32, _>::failure(vec!["bad"]);
        assert_eq!(ok.clone().and(bad.clone()), Validation::Failure(vec!["bad"]));
        assert_eq!(bad.and(ok), Validation::Failure(vec!["bad"]));
    }

    #[test]
    fn test_and_then_runs_only_on_success() {
        let v = Validation::<_, Vec<&str>>::success(6);
        assert_eq!(
            v.and_then(|n| Validation::success(n * 2)),
            Validation::Success(12)
        );

        let v = Validation::<i32, _>::failure(vec!["bad"]);
        let result = v.and_then(|_| -> Validation<i32, Vec<&str>> {
            panic!("must not run on failure")
        });
        assert_eq!(result, Validation::Failure(vec!["bad"]));
    }

    #[test]
    fn test_map_and_map_err() {
        let v = Validation::<_, String>::success(3);
        assert_eq!(v.map(|n| n + 1), Validation::Success(4));

        let v = Validation::<i32, _>::failure("x".to_string());
        assert_eq!(v.map_err(|e| e.len()), Validation::Failure(1));
    }

    #[test]
    fn test_result_round_trip() {
        let v: Validation<i32, &str> = Ok(1).into();
        assert_eq!(v.into_result(), Ok(1));

        let v: Validation<i32, &str> = Err("nope").into();
        assert_eq!(v.into_result(), Err("nope"));
    }
}
