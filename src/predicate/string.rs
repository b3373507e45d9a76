//! String predicates
//!
//! The built-in checks used by form rules. Lengths are counted in characters,
//! not bytes, so `"héllo"` has length 5.

use std::sync::LazyLock;

use regex::Regex;

use super::combinators::Predicate;

/// Pattern for [`email_shape`]: local part of word, dot, plus and dash
/// characters, then `@`, one or more dash-friendly alphanumeric labels each
/// followed by a dot, and a final alphanumeric label of 2 to 4 characters.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9_.+-]+@(?:[A-Za-z0-9-]+\.)+[A-Za-z0-9]{2,4}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"));

/// Shortest password [`password_strength`] accepts.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Predicate that checks if a string is not empty.
#[derive(Clone, Copy, Default, Debug)]
pub struct NotEmpty;

impl Predicate<str> for NotEmpty {
    #[inline]
    fn check(&self, value: &str) -> bool {
        !value.is_empty()
    }
}

/// Create a predicate that fails only on the empty string.
///
/// Whitespace counts as content: `"  "` passes.
///
/// ```rust
/// use formcheck::predicate::*;
///
/// assert!(required().check("hello"));
/// assert!(required().check(" "));
/// assert!(!required().check(""));
/// ```
pub fn required() -> NotEmpty {
    NotEmpty
}

/// Predicate that checks string length (in chars) is in an inclusive range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LenBetween {
    min: usize,
    max: usize,
}

impl LenBetween {
    /// Lower bound, inclusive.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Upper bound, inclusive.
    pub fn max(&self) -> usize {
        self.max
    }
}

impl Predicate<str> for LenBetween {
    #[inline]
    fn check(&self, value: &str) -> bool {
        let len = value.chars().count();
        len >= self.min && len <= self.max
    }
}

/// Create a predicate that checks if string length is between min and max (inclusive).
///
/// # Example
///
/// ```rust
/// use formcheck::predicate::*;
///
/// let p = len_between(6, 15);
/// assert!(!p.check("abcde"));
/// assert!(p.check("abcdef"));
/// assert!(p.check("abcdefghijklmno"));
/// assert!(!p.check("abcdefghijklmnop"));
/// ```
pub fn len_between(min: usize, max: usize) -> LenBetween {
    LenBetween { min, max }
}

/// Create a predicate that checks if string length is at least min.
pub fn len_min(min: usize) -> LenBetween {
    LenBetween {
        min,
        max: usize::MAX,
    }
}

/// Create a predicate that checks if string length is at most max.
pub fn len_max(max: usize) -> LenBetween {
    LenBetween { min: 0, max }
}

/// Predicate that checks a string against a regular expression.
#[derive(Clone, Debug)]
pub struct Matches(Regex);

impl Predicate<str> for Matches {
    #[inline]
    fn check(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

/// Create a predicate from a compiled regex.
///
/// The regex is used as-is; anchor it with `^...$` for whole-value matches.
///
/// ```rust
/// use formcheck::predicate::*;
/// use regex::Regex;
///
/// let zip = matches(Regex::new(r"^\d{5}$").unwrap());
/// assert!(zip.check("12345"));
/// assert!(!zip.check("1234"));
/// ```
pub fn matches(regex: Regex) -> Matches {
    Matches(regex)
}

/// Predicate for the shape of an email address. See [`EMAIL_PATTERN`].
#[derive(Clone, Copy, Default, Debug)]
pub struct EmailShape;

impl Predicate<str> for EmailShape {
    #[inline]
    fn check(&self, value: &str) -> bool {
        EMAIL_RE.is_match(value)
    }
}

/// Create a predicate that accepts well-shaped email addresses.
///
/// This is a shape check only; it says nothing about deliverability.
///
/// ```rust
/// use formcheck::predicate::*;
///
/// assert!(email_shape().check("first.last+tag@mail.example.com"));
/// assert!(email_shape().check("a@b.co"));
/// assert!(!email_shape().check("not-an-email"));
/// assert!(!email_shape().check("a@b.c"));
/// assert!(!email_shape().check("a@b.museum"));
/// ```
pub fn email_shape() -> EmailShape {
    EmailShape
}

/// Predicate for password strength.
///
/// Requires an ASCII lowercase letter, an ASCII uppercase letter, an ASCII
/// digit, a symbol (any char that is neither an ASCII letter nor an ASCII
/// digit), no whitespace anywhere, and at least [`PASSWORD_MIN_CHARS`]
/// characters. There is no upper bound; pair it with [`len_between`].
#[derive(Clone, Copy, Default, Debug)]
pub struct PasswordStrength;

impl Predicate<str> for PasswordStrength {
    fn check(&self, value: &str) -> bool {
        let mut lower = false;
        let mut upper = false;
        let mut digit = false;
        let mut symbol = false;
        let mut count = 0;

        for c in value.chars() {
            if c.is_whitespace() {
                return false;
            }
            match c {
                'a'..='z' => lower = true,
                'A'..='Z' => upper = true,
                '0'..='9' => digit = true,
                _ => symbol = true,
            }
            count += 1;
        }

        lower && upper && digit && symbol && count >= PASSWORD_MIN_CHARS
    }
}

/// Create a password-strength predicate.
///
/// ```rust
/// use formcheck::predicate::*;
///
/// assert!(password_strength().check("Abcdef1!"));
/// assert!(!password_strength().check("abc123"));   // no uppercase, no symbol
/// assert!(!password_strength().check("Abc 1!xy")); // whitespace
/// assert!(!password_strength().check("Ab1!"));     // too short
/// ```
pub fn password_strength() -> PasswordStrength {
    PasswordStrength
}

/// Predicate that checks if all characters satisfy a predicate.
#[derive(Clone, Copy, Debug)]
pub struct AllChars<F>(pub F);

impl<F: Fn(char) -> bool + Send + Sync> Predicate<str> for AllChars<F> {
    #[inline]
    fn check(&self, value: &str) -> bool {
        value.chars().all(&self.0)
    }
}

/// Create a predicate that checks if all characters satisfy a condition.
pub fn all_chars<F: Fn(char) -> bool + Send + Sync>(f: F) -> AllChars<F> {
    AllChars(f)
}

/// Predicate that checks if any character satisfies a predicate.
#[derive(Clone, Copy, Debug)]
pub struct AnyChar<F>(pub F);

impl<F: Fn(char) -> bool + Send + Sync> Predicate<str> for AnyChar<F> {
    #[inline]
    fn check(&self, value: &str) -> bool {
        value.chars().any(&self.0)
    }
}

/// Create a predicate that checks if any character satisfies a condition.
///
/// ```rust
/// use formcheck::predicate::*;
///
/// assert!(any_char(|c| c.is_ascii_digit()).check("abc1"));
/// assert!(!any_char(|c| c.is_ascii_digit()).check("abc"));
/// ```
pub fn any_char<F: Fn(char) -> bool + Send + Sync>(f: F) -> AnyChar<F> {
    AnyChar(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required().check("x"));
        assert!(required().check(" "));
        assert!(!required().check(""));
    }

    #[test]
    fn test_len_between_is_inclusive() {
        let p = len_between(6, 15);
        assert!(!p.check("12345"));
        assert!(p.check("123456"));
        assert!(p.check("123456789012345"));
        assert!(!p.check("1234567890123456"));
        assert_eq!((p.min(), p.max()), (6, 15));
    }

    #[test]
    fn test_len_counts_chars_not_bytes() {
        // 6 chars, 7 bytes
        assert!(len_min(6).check("héllo!"));
        assert!(len_max(5).check("ééééé"));
    }

    #[test]
    fn test_len_counts_astral_chars_once() {
        // one scalar value, two UTF-16 units
        assert_eq!("Ab1!\u{1F600}".chars().count(), 5);
        assert!(len_max(5).check("Ab1!\u{1F600}"));
        assert!(!len_min(6).check("Ab1!\u{1F600}"));
    }

    #[test]
    fn test_email_final_label_is_at_most_four_chars() {
        assert!(email_shape().check("a@b.info"));
        for email in ["a@b.museum", "x@y.travel", "user@example.comms"] {
            assert!(!email_shape().check(email), "{email} should be rejected");
        }
    }

    #[test]
    fn test_len_min_and_max() {
        assert!(len_min(3).check("abc"));
        assert!(!len_min(3).check("ab"));
        assert!(len_max(2).check(""));
        assert!(!len_max(2).check("abc"));
    }

    #[test]
    fn test_email_shape_accepts() {
        for email in [
            "a@b.co",
            "user@example.com",
            "first.last@sub.example.org",
            "x_y+z-w@my-host.info",
            "UPPER@CASE.IO",
            "1@2.34",
        ] {
            assert!(email_shape().check(email), "{email} should be accepted");
        }
    }

    #[test]
    fn test_email_shape_rejects() {
        for email in [
            "",
            "not-an-email",
            "@example.com",
            "user@",
            "user@example",
            "user@example.c",
            "user@example.comms",
            "user name@example.com",
            "user@exa_mple.com",
            "user@@example.com",
            "user@example..com",
        ] {
            assert!(!email_shape().check(email), "{email} should be rejected");
        }
    }

    #[test]
    fn test_password_strength() {
        assert!(password_strength().check("Abcdef1!"));
        assert!(password_strength().check("aB3$xy"));
        // missing classes
        assert!(!password_strength().check("abcdef1!"));
        assert!(!password_strength().check("ABCDEF1!"));
        assert!(!password_strength().check("Abcdefg!"));
        assert!(!password_strength().check("Abcdef12"));
        // whitespace anywhere
        assert!(!password_strength().check(" Abcdef1!"));
        assert!(!password_strength().check("Abc\tdef1!"));
        // too short
        assert!(!password_strength().check("aB3$x"));
    }

    #[test]
    fn test_password_strength_non_ascii_counts_as_symbol() {
        assert!(password_strength().check("Abcdé1"));
    }

    #[test]
    fn test_password_strength_has_no_upper_bound() {
        assert!(password_strength().check("Abcdef1!Abcdef1!Abcdef1!"));
    }

    #[test]
    fn test_matches() {
        let p = matches(Regex::new(r"^[a-z]+$").expect("regex"));
        assert!(p.check("abc"));
        assert!(!p.check("abc1"));
    }

    #[test]
    fn test_char_predicates() {
        assert!(all_chars(char::is_alphabetic).check("hello"));
        assert!(!all_chars(char::is_alphabetic).check("hello123"));
        assert!(any_char(char::is_numeric).check("hello123"));
        assert!(!any_char(char::is_numeric).check("hello"));
    }
}
