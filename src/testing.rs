//! Testing utilities
//!
//! In-memory stand-ins for every capability the shell needs, plus assertion
//! macros for reports. Enable the `proptest` feature for generators of valid
//! form input.
//!
//! # Examples
//!
//! ```rust
//! use formcheck::signup::{signup_engine, EMAIL};
//! use formcheck::{assert_field_errors, assert_invalid, assert_valid};
//!
//! let engine = signup_engine();
//!
//! assert_valid!(engine.validate_all([(EMAIL, "a@b.co")]));
//!
//! let report = engine.validate_all([(EMAIL, "")]);
//! assert_invalid!(report, EMAIL);
//! assert_field_errors!(report, EMAIL, ["Email is not valid", "This field is mandatory"]);
//! ```

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::channel::mpsc::{self, UnboundedSender};
use futures::stream::{self, BoxStream};
use futures::StreamExt;

use crate::shell::{
    AuthError, ErrorSink, FieldSource, Greeter, IdentityProvider, Notice, NoticeSink, Profile,
    ProfileStore, StoreError, UserHandle,
};
use crate::FieldId;

/// Assert that every field in a report is valid.
#[macro_export]
macro_rules! assert_valid {
    ($report:expr) => {{
        let report: &$crate::ValidationReport = &$report;
        if !report.all_valid() {
            panic!("Expected a valid report, got errors: {:?}", report);
        }
    }};
}

/// Assert that a report has errors, optionally for a specific field.
#[macro_export]
macro_rules! assert_invalid {
    ($report:expr) => {{
        let report: &$crate::ValidationReport = &$report;
        if report.all_valid() {
            panic!("Expected an invalid report, got: {:?}", report);
        }
    }};
    ($report:expr, $field:expr) => {{
        let report: &$crate::ValidationReport = &$report;
        let field_id = &$field;
        let field: &str = ::core::convert::AsRef::<str>::as_ref(field_id);
        if report.is_valid(field) {
            panic!("Expected errors for field `{}`, got: {:?}", field, report);
        }
    }};
}

/// Assert the exact messages reported for one field, in order.
#[macro_export]
macro_rules! assert_field_errors {
    ($report:expr, $field:expr, $expected:expr) => {{
        let report: &$crate::ValidationReport = &$report;
        let field_id = &$field;
        let field: &str = ::core::convert::AsRef::<str>::as_ref(field_id);
        let expected: &[&str] = &$expected;
        assert_eq!(
            report.errors(field),
            expected,
            "messages for field `{}`",
            field
        );
    }};
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A view that records everything the shell asks it to do.
///
/// Implements [`FieldSource`], [`ErrorSink`], [`NoticeSink`] and [`Greeter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingView {
    /// Current input values.
    pub values: BTreeMap<FieldId, String>,
    /// Messages currently rendered per field.
    pub errors: BTreeMap<FieldId, Vec<String>>,
    /// Whether the submit control is enabled.
    pub submit_enabled: bool,
    /// Notice currently shown.
    pub notice: Option<Notice>,
    /// Greeting currently shown.
    pub greeting: Option<String>,
}

impl RecordingView {
    /// An empty view with submit disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set_value`](Self::set_value).
    pub fn with_value(mut self, field: impl Into<FieldId>, value: &str) -> Self {
        self.set_value(field, value);
        self
    }

    /// Start with a notice already shown.
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    /// Start with a greeting already shown.
    pub fn with_greeting(mut self, name: &str) -> Self {
        self.greeting = Some(name.to_owned());
        self
    }

    /// Type into a field.
    pub fn set_value(&mut self, field: impl Into<FieldId>, value: &str) {
        self.values.insert(field.into(), value.to_owned());
    }

    /// Messages currently rendered for `field`.
    pub fn errors_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl FieldSource for RecordingView {
    fn value(&self, field: &FieldId) -> String {
        self.values.get(field).cloned().unwrap_or_default()
    }

    fn reset(&mut self) {
        self.values.clear();
    }
}

impl ErrorSink for RecordingView {
    fn show_errors(&mut self, field: &FieldId, messages: &[String]) {
        self.errors.insert(field.clone(), messages.to_vec());
    }

    fn clear_errors(&mut self, field: &FieldId) {
        self.errors.remove(field);
    }
}

impl NoticeSink for RecordingView {
    fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn clear_notices(&mut self) {
        self.notice = None;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }
}

impl Greeter for RecordingView {
    fn greet(&mut self, name: &str) {
        self.greeting = Some(name.to_owned());
    }

    fn clear_greeting(&mut self) {
        self.greeting = None;
    }
}

#[derive(Debug)]
struct Account {
    uid: String,
    password: String,
}

#[derive(Debug, Default)]
struct IdentityState {
    accounts: BTreeMap<String, Account>,
    current: Option<UserHandle>,
    next_uid: u64,
}

/// In-memory identity provider.
///
/// Mirrors the error codes of a typical hosted auth service. Its auth stream
/// yields the current state once and ends.
#[derive(Debug, Default)]
pub struct MemoryIdentity {
    state: Mutex<IdentityState>,
}

impl MemoryIdentity {
    /// A provider with no accounts and nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Who is signed in.
    pub fn current_user(&self) -> Option<UserHandle> {
        lock(&self.state).current.clone()
    }

    /// Whether an account exists for `email`.
    pub fn has_account(&self, email: &str) -> bool {
        lock(&self.state).accounts.contains_key(email)
    }
}

impl IdentityProvider for MemoryIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<UserHandle, AuthError> {
        let mut state = lock(&self.state);
        if state.accounts.contains_key(email) {
            return Err(AuthError::new(
                "auth/email-already-in-use",
                "The email address is already in use by another account.",
            ));
        }
        if password.chars().count() < 6 {
            return Err(AuthError::new(
                "auth/weak-password",
                "Password should be at least 6 characters",
            ));
        }

        state.next_uid += 1;
        let uid = format!("uid-{}", state.next_uid);
        state.accounts.insert(
            email.to_owned(),
            Account {
                uid: uid.clone(),
                password: password.to_owned(),
            },
        );

        let user = UserHandle {
            uid,
            email: Some(email.to_owned()),
        };
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserHandle, AuthError> {
        let mut state = lock(&self.state);
        let uid = match state.accounts.get(email) {
            None => {
                return Err(AuthError::new(
                    "auth/user-not-found",
                    "There is no user record corresponding to this identifier.",
                ))
            }
            Some(account) if account.password != password => {
                return Err(AuthError::new(
                    "auth/wrong-password",
                    "The password is invalid or the user does not have a password.",
                ))
            }
            Some(account) => account.uid.clone(),
        };

        let user = UserHandle {
            uid,
            email: Some(email.to_owned()),
        };
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        lock(&self.state).current = None;
        Ok(())
    }

    fn auth_state_changes(&self) -> BoxStream<'static, Option<UserHandle>> {
        stream::iter([self.current_user()]).boxed()
    }
}

/// In-memory profile store.
///
/// Subscriptions yield the current snapshot once and end.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<BTreeMap<String, Profile>>,
    write_failure: Mutex<Option<StoreError>>,
}

impl MemoryProfileStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `put` fail with `error`.
    pub fn fail_writes(&self, error: StoreError) {
        *lock(&self.write_failure) = Some(error);
    }

    /// The stored profile of `user_id`.
    pub fn get(&self, user_id: &str) -> Option<Profile> {
        lock(&self.profiles).get(user_id).cloned()
    }

    /// Whether no profile has been stored.
    pub fn is_empty(&self) -> bool {
        lock(&self.profiles).is_empty()
    }
}

impl ProfileStore for MemoryProfileStore {
    async fn put(&self, user_id: &str, profile: Profile) -> Result<(), StoreError> {
        if let Some(error) = lock(&self.write_failure).clone() {
            return Err(error);
        }
        lock(&self.profiles).insert(user_id.to_owned(), profile);
        Ok(())
    }

    fn subscribe(&self, user_id: &str) -> BoxStream<'static, Option<Profile>> {
        stream::iter([self.get(user_id)]).boxed()
    }
}

/// Identity provider whose auth stream is driven by hand.
///
/// Each call to `auth_state_changes` opens a fresh stream; [`push`](Self::push)
/// feeds it and [`close`](Self::close) ends it. Account calls succeed with
/// the email as uid and push the resulting state.
#[derive(Debug, Default)]
pub struct ScriptedIdentity {
    sender: Mutex<Option<UnboundedSender<Option<UserHandle>>>>,
}

impl ScriptedIdentity {
    /// A provider nobody is watching yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an auth stream is open and still being read.
    pub fn is_watched(&self) -> bool {
        lock(&self.sender)
            .as_ref()
            .is_some_and(|sender| !sender.is_closed())
    }

    /// Send an auth state to the open stream. Returns false if none is open.
    pub fn push(&self, state: Option<UserHandle>) -> bool {
        lock(&self.sender)
            .as_ref()
            .is_some_and(|sender| sender.unbounded_send(state).is_ok())
    }

    /// End the open stream.
    pub fn close(&self) {
        lock(&self.sender).take();
    }

    fn signed_in(&self, email: &str) -> UserHandle {
        let user = UserHandle {
            uid: email.to_owned(),
            email: Some(email.to_owned()),
        };
        self.push(Some(user.clone()));
        user
    }
}

impl IdentityProvider for ScriptedIdentity {
    async fn create_account(&self, email: &str, _password: &str) -> Result<UserHandle, AuthError> {
        Ok(self.signed_in(email))
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<UserHandle, AuthError> {
        Ok(self.signed_in(email))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.push(None);
        Ok(())
    }

    fn auth_state_changes(&self) -> BoxStream<'static, Option<UserHandle>> {
        let (sender, receiver) = mpsc::unbounded();
        *lock(&self.sender) = Some(sender);
        receiver.boxed()
    }
}

/// Profile store with live subscriptions.
///
/// Every `subscribe` opens a channel; [`publish`](Self::publish) sends a
/// snapshot to the subscribers of one user that are still listening.
#[derive(Debug, Default)]
pub struct ChannelProfileStore {
    subscribers: Mutex<BTreeMap<String, Vec<UnboundedSender<Option<Profile>>>>>,
}

impl ChannelProfileStore {
    /// A store with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether some subscription to `user_id` is still being read.
    pub fn is_subscribed(&self, user_id: &str) -> bool {
        lock(&self.subscribers)
            .get(user_id)
            .is_some_and(|senders| senders.iter().any(|sender| !sender.is_closed()))
    }

    /// Send `snapshot` to every live subscription of `user_id`. Returns how
    /// many received it.
    pub fn publish(&self, user_id: &str, snapshot: Option<Profile>) -> usize {
        let mut subscribers = lock(&self.subscribers);
        let Some(senders) = subscribers.get_mut(user_id) else {
            return 0;
        };
        senders.retain(|sender| !sender.is_closed());
        senders
            .iter()
            .filter(|sender| sender.unbounded_send(snapshot.clone()).is_ok())
            .count()
    }

    /// End every subscription.
    pub fn close_all(&self) {
        lock(&self.subscribers).clear();
    }
}

impl ProfileStore for ChannelProfileStore {
    async fn put(&self, user_id: &str, profile: Profile) -> Result<(), StoreError> {
        self.publish(user_id, Some(profile));
        Ok(())
    }

    fn subscribe(&self, user_id: &str) -> BoxStream<'static, Option<Profile>> {
        let (sender, receiver) = mpsc::unbounded();
        lock(&self.subscribers)
            .entry(user_id.to_owned())
            .or_default()
            .push(sender);
        receiver.boxed()
    }
}

/// Proptest generators for form input that passes the signup rules.
#[cfg(feature = "proptest")]
pub mod strategies {
    use proptest::prelude::*;

    /// Email addresses accepted by [`email_shape`](crate::predicate::email_shape).
    pub fn valid_email() -> impl Strategy<Value = String> {
        "[a-z0-9_.+-]{1,12}@([a-z0-9-]{1,10}\\.){1,3}[a-z0-9]{2,4}"
    }

    /// Passwords of 6 to 15 characters accepted by
    /// [`password_strength`](crate::predicate::password_strength).
    pub fn strong_password() -> impl Strategy<Value = String> {
        (
            "[a-z]",
            "[A-Z]",
            "[0-9]",
            "[!#$%&*+?@^_~-]",
            "[A-Za-z0-9!#$%&*+?@^_~-]{2,11}",
        )
            .prop_map(|(lower, upper, digit, symbol, rest)| {
                format!("{rest}{upper}{lower}{symbol}{digit}")
            })
    }

    /// Non-empty single-line text for name and address fields.
    pub fn filled_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 ,.]{1,30}"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::{signup_engine, EMAIL, PASSWORD};

    #[test]
    fn assert_valid_macro() {
        assert_valid!(signup_engine().validate_all([(EMAIL, "a@b.co")]));
    }

    #[test]
    fn assert_field_errors_macro() {
        let report = signup_engine().validate_all([(PASSWORD, "abc123"), (EMAIL, "a@b.co")]);
        assert_invalid!(report);
        assert_invalid!(report, "password");
        assert_field_errors!(report, EMAIL, []);
        assert_field_errors!(
            report,
            PASSWORD,
            [crate::signup::MSG_PASSWORD_WEAK]
        );
    }

    #[test]
    #[should_panic(expected = "Expected a valid report")]
    fn assert_valid_panics_on_errors() {
        assert_valid!(signup_engine().validate_all([(EMAIL, "")]));
    }

    #[test]
    #[should_panic(expected = "Expected errors for field `email`")]
    fn assert_invalid_panics_on_valid_field() {
        assert_invalid!(signup_engine().validate_all([(EMAIL, "a@b.co")]), EMAIL);
    }

    #[test]
    fn recording_view_tracks_errors() {
        let mut view = RecordingView::new().with_value("email", "x");
        assert_eq!(view.value(&EMAIL), "x");
        assert_eq!(view.value(&PASSWORD), "");

        view.show_errors(&EMAIL, &["bad".to_string()]);
        assert_eq!(view.errors_for("email"), ["bad"]);
        view.clear_errors(&EMAIL);
        assert!(view.errors_for("email").is_empty());

        view.reset();
        assert!(view.values.is_empty());
    }

    #[tokio::test]
    async fn memory_identity_rejects_short_password() {
        let err = MemoryIdentity::new()
            .create_account("a@b.co", "Ab1!")
            .await
            .unwrap_err();
        assert_eq!(err.code, "auth/weak-password");
    }

    #[tokio::test]
    async fn memory_identity_auth_stream_reports_current_state() {
        let identity = MemoryIdentity::new();
        let states: Vec<_> = identity.auth_state_changes().collect().await;
        assert_eq!(states, [None]);

        let user = identity.create_account("a@b.co", "Abcdef1!").await.unwrap();
        let states: Vec<_> = identity.auth_state_changes().collect().await;
        assert_eq!(states, [Some(user)]);
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryProfileStore::new();
        assert!(store.is_empty());
        let profile = Profile {
            name: "Ada".into(),
            ..Profile::default()
        };
        store.put("u1", profile.clone()).await.unwrap();

        let snapshots: Vec<_> = store.subscribe("u1").collect().await;
        assert_eq!(snapshots, [Some(profile)]);
        let snapshots: Vec<_> = store.subscribe("u2").collect().await;
        assert_eq!(snapshots, [None]);
    }

    #[tokio::test]
    async fn scripted_identity_feeds_open_stream() {
        let identity = ScriptedIdentity::new();
        assert!(!identity.push(None));

        let mut states = identity.auth_state_changes();
        assert!(identity.is_watched());
        let user = identity.sign_in("a@b.co", "x").await.unwrap();
        identity.sign_out().await.unwrap();
        identity.close();

        let seen: Vec<_> = states.by_ref().collect().await;
        assert_eq!(seen, [Some(user), None]);
        assert!(!identity.is_watched());
    }

    #[tokio::test]
    async fn channel_store_tracks_live_subscribers() {
        let store = ChannelProfileStore::new();
        let subscription = store.subscribe("u1");
        assert!(store.is_subscribed("u1"));
        assert!(!store.is_subscribed("u2"));

        drop(subscription);
        assert!(!store.is_subscribed("u1"));
        assert_eq!(store.publish("u1", None), 0);

        let mut live = store.subscribe("u1");
        store.put("u1", Profile::default()).await.unwrap();
        store.close_all();
        let seen: Vec<_> = live.by_ref().collect().await;
        assert_eq!(seen, [Some(Profile::default())]);
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use super::strategies::*;
        use crate::signup::{signup_engine, ADDRESS, EMAIL, NAME, PASSWORD};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn generated_signups_are_valid(
                email in valid_email(),
                password in strong_password(),
                name in filled_text(),
                address in filled_text(),
            ) {
                let report = signup_engine().validate_all([
                    (EMAIL, email),
                    (NAME, name),
                    (ADDRESS, address),
                    (PASSWORD, password),
                ]);
                prop_assert!(report.all_valid(), "{:?}", report);
            }
        }
    }
}
