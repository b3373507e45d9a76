//! Field identifiers

use std::borrow::{Borrow, Cow};
use std::fmt;

/// Names one logical input of a form, such as `"email"` or `"password"`.
///
/// Rules and values must use the same identifiers. Static ids can be
/// declared as constants:
///
/// ```
/// use formcheck::FieldId;
///
/// const PHONE: FieldId = FieldId::from_static("phone");
/// assert_eq!(PHONE.as_str(), "phone");
/// assert_eq!(PHONE, FieldId::from("phone"));
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FieldId(Cow<'static, str>);

impl FieldId {
    /// Create an id from a string literal without allocating.
    pub const fn from_static(id: &'static str) -> Self {
        FieldId(Cow::Borrowed(id))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// Lets maps keyed by FieldId be queried with &str.
impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        FieldId(Cow::Owned(id.to_owned()))
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        FieldId(Cow::Owned(id))
    }
}

impl From<&String> for FieldId {
    fn from(id: &String) -> Self {
        FieldId::from(id.as_str())
    }
}

impl From<&FieldId> for FieldId {
    fn from(id: &FieldId) -> Self {
        id.clone()
    }
}

impl PartialEq<str> for FieldId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for FieldId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
