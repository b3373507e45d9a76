//! Capability traits the shell drives
//!
//! The crate never renders anything, stores anything or talks to the
//! network. These traits name what the surrounding application must provide:
//! a view (field values, error display, notices, greeting), an identity
//! provider and a profile store.

use std::future::Future;
use std::sync::Arc;

use futures::stream::BoxStream;

use crate::FieldId;

/// Current text of each form input.
///
/// Change and submit notifications flow the other way: the UI calls
/// [`RegistrationForm::on_input`](super::RegistrationForm::on_input) on every
/// edit and [`submit`](super::RegistrationForm::submit) on submit.
pub trait FieldSource {
    /// Current raw value of `field`; empty when the field has no input.
    fn value(&self, field: &FieldId) -> String;

    /// Clear every input.
    fn reset(&mut self);
}

/// Displays per-field validation messages.
pub trait ErrorSink {
    /// Render `messages` next to `field` and mark it invalid.
    fn show_errors(&mut self, field: &FieldId, messages: &[String]);

    /// Remove any messages and the invalid mark from `field`.
    fn clear_errors(&mut self, field: &FieldId);
}

/// Outcome banner shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The submission went through.
    Success,
    /// The provider refused it; the message is shown verbatim.
    Failure(String),
}

/// Form-level status region: outcome notices and the submit control.
pub trait NoticeSink {
    /// Show an outcome notice.
    fn show_notice(&mut self, notice: Notice);

    /// Hide any outcome notice.
    fn clear_notices(&mut self);

    /// Enable or disable the submit control.
    fn set_submit_enabled(&mut self, enabled: bool);
}

/// Welcome banner for a signed-in user.
pub trait Greeter {
    /// Show the banner with `name`.
    fn greet(&mut self, name: &str);

    /// Hide the banner.
    fn clear_greeting(&mut self);
}

/// A signed-in account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserHandle {
    /// Provider-assigned account id; profiles are keyed by it.
    pub uid: String,
    /// Email the account was created with, when the provider exposes it.
    pub email: Option<String>,
}

/// Failure reported by the identity provider.
///
/// Displays as the provider's message, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    /// Machine-readable code, e.g. `auth/email-already-in-use`.
    pub code: String,
    /// Human-readable message meant for the end user.
    pub message: String,
}

impl AuthError {
    /// Create an error from a provider code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        AuthError {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Failure reported by the profile store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    /// Machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl StoreError {
    /// Create an error from a store code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The profile record saved for every registered account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Postal address.
    pub address: String,
}

/// External account service.
pub trait IdentityProvider: Send + Sync {
    /// Register a new account and sign it in.
    fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<UserHandle, AuthError>> + Send;

    /// Sign an existing account in.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<UserHandle, AuthError>> + Send;

    /// Sign the current account out.
    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Auth state changes: `Some` on sign-in, `None` on sign-out.
    ///
    /// The stream starts with the current state.
    fn auth_state_changes(&self) -> BoxStream<'static, Option<UserHandle>>;
}

/// External profile database.
pub trait ProfileStore: Send + Sync {
    /// Create or overwrite the profile of `user_id`.
    fn put(
        &self,
        user_id: &str,
        profile: Profile,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Snapshots of the profile of `user_id`: the current one first, then
    /// one per change. `None` while no profile exists.
    fn subscribe(&self, user_id: &str) -> BoxStream<'static, Option<Profile>>;
}

impl<T: IdentityProvider> IdentityProvider for Arc<T> {
    fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<UserHandle, AuthError>> + Send {
        (**self).create_account(email, password)
    }

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<UserHandle, AuthError>> + Send {
        (**self).sign_in(email, password)
    }

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>> + Send {
        (**self).sign_out()
    }

    fn auth_state_changes(&self) -> BoxStream<'static, Option<UserHandle>> {
        (**self).auth_state_changes()
    }
}

impl<T: ProfileStore> ProfileStore for Arc<T> {
    fn put(
        &self,
        user_id: &str,
        profile: Profile,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).put(user_id, profile)
    }

    fn subscribe(&self, user_id: &str) -> BoxStream<'static, Option<Profile>> {
        (**self).subscribe(user_id)
    }
}
