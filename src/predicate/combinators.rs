//! The [`Predicate`] trait and its boolean combinators

/// A pure yes/no check over a borrowed value.
///
/// Predicates must be pure: the same input always gives the same answer, and
/// checking never touches outside state. Rules rely on this to make every
/// validation pass repeatable.
///
/// # Example
///
/// ```rust
/// use formcheck::predicate::*;
///
/// let username = len_between(3, 20).and(all_chars(|c| c.is_alphanumeric() || c == '_'));
/// assert!(username.check("john_doe"));
/// assert!(!username.check("ab"));
/// assert!(!username.check("invalid-name"));
/// ```
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Whether `value` passes.
    fn check(&self, value: &T) -> bool;
}

// closures are predicates
impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &T) -> bool {
        self(value)
    }
}

/// `and`, `or` and `not` for every predicate.
///
/// Each method returns a concrete combinator type; nothing is boxed until the
/// predicate is stored in a [`Rule`](crate::Rule).
pub trait PredicateExt<T: ?Sized>: Predicate<T> + Sized {
    /// Passes when both `self` and `other` pass.
    ///
    /// # Example
    ///
    /// ```rust
    /// use formcheck::predicate::*;
    ///
    /// let p = required().and(len_max(5));
    /// assert!(p.check("hello"));
    /// assert!(!p.check(""));
    /// assert!(!p.check("toolong"));
    /// ```
    fn and<P: Predicate<T>>(self, other: P) -> And<Self, P> {
        And(self, other)
    }

    /// Passes when `self` or `other` passes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use formcheck::predicate::*;
    ///
    /// // optional field: empty, or a well-formed address
    /// let p = required().not().or(email_shape());
    /// assert!(p.check(""));
    /// assert!(p.check("a@b.co"));
    /// assert!(!p.check("a@b"));
    /// ```
    fn or<P: Predicate<T>>(self, other: P) -> Or<Self, P> {
        Or(self, other)
    }

    /// Passes exactly when `self` fails.
    fn not(self) -> Not<Self> {
        Not(self)
    }
}

impl<T: ?Sized, P: Predicate<T>> PredicateExt<T> for P {}

/// Conjunction built by [`PredicateExt::and`].
#[derive(Clone, Copy, Debug)]
pub struct And<P1, P2>(pub P1, pub P2);

impl<T: ?Sized, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for And<P1, P2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) && self.1.check(value)
    }
}

/// Disjunction built by [`PredicateExt::or`].
#[derive(Clone, Copy, Debug)]
pub struct Or<P1, P2>(pub P1, pub P2);

impl<T: ?Sized, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for Or<P1, P2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) || self.1.check(value)
    }
}

/// Negation built by [`PredicateExt::not`].
#[derive(Clone, Copy, Debug)]
pub struct Not<P>(pub P);

impl<T: ?Sized, P: Predicate<T>> Predicate<T> for Not<P> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        !self.0.check(value)
    }
}
