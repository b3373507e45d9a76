//! Imperative shell around the validation engine
//!
//! The engine is pure; this module connects it to the outside world through
//! capability traits. The application supplies a view, an
//! [`IdentityProvider`] and a [`ProfileStore`]; the controllers decide when
//! to validate, what to render, and when to call the providers.
//!
//! - [`RegistrationForm`]: live validation, submit gating, sign-up
//! - [`LoginForm`] and [`sign_out`]: sign-in and sign-out
//! - [`SessionWatcher`]: greeting for the signed-in user
//!
//! # Example
//!
//! ```
//! use formcheck::shell::{Notice, RegistrationForm};
//! use formcheck::signup::{signup_engine, ADDRESS, EMAIL, NAME, PASSWORD};
//! use formcheck::testing::{MemoryIdentity, MemoryProfileStore, RecordingView};
//!
//! # tokio_test::block_on(async {
//! let view = RecordingView::new()
//!     .with_value(EMAIL, "ada@example.com")
//!     .with_value(NAME, "Ada")
//!     .with_value(ADDRESS, "12 Main St")
//!     .with_value(PASSWORD, "Abcdef1!");
//! let mut form = RegistrationForm::new(
//!     signup_engine(),
//!     view,
//!     MemoryIdentity::new(),
//!     MemoryProfileStore::new(),
//! );
//!
//! assert!(form.on_input(&PASSWORD).all_valid());
//! assert!(form.view().submit_enabled);
//!
//! form.submit().await.expect("registration succeeds");
//! assert_eq!(form.view().notice, Some(Notice::Success));
//! # });
//! ```

mod capabilities;
mod login;
mod registration;
mod session;

pub use capabilities::{
    AuthError, ErrorSink, FieldSource, Greeter, IdentityProvider, Notice, NoticeSink, Profile,
    ProfileStore, StoreError, UserHandle,
};
pub use login::{sign_out, LoginForm};
pub use registration::{RegistrationForm, SubmitError};
pub use session::SessionWatcher;
