//! Registration form controller

use crate::shell::{
    AuthError, ErrorSink, FieldSource, IdentityProvider, Notice, NoticeSink, Profile,
    ProfileStore, StoreError, UserHandle,
};
use crate::signup::{ADDRESS, EMAIL, NAME, PASSWORD};
use crate::{FieldId, FieldValues, Validation, ValidationEngine, ValidationReport};

/// Why a registration did not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The form still has invalid fields; nothing was sent.
    #[error("form has {} invalid field(s)", .0.invalid_fields().count())]
    Invalid(ValidationReport),
    /// The identity provider refused the account.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The account exists but its profile could not be saved.
    #[error("account {uid} was created but its profile was not saved: {source}")]
    Store {
        /// Id of the account that was created.
        uid: String,
        /// The store's error.
        #[source]
        source: StoreError,
    },
}

/// Drives the registration form: live validation on every edit, submit
/// gating, account creation and profile storage.
///
/// The view `V` supplies field values and renders errors and notices.
#[derive(Debug)]
pub struct RegistrationForm<V, A, S> {
    engine: ValidationEngine,
    view: V,
    identity: A,
    profiles: S,
}

impl<V, A, S> RegistrationForm<V, A, S>
where
    V: FieldSource + ErrorSink + NoticeSink,
    A: IdentityProvider,
    S: ProfileStore,
{
    /// Wire a form. The engine's rule set must cover the signup fields
    /// ([`signup_engine`](crate::signup::signup_engine) does).
    pub fn new(engine: ValidationEngine, view: V, identity: A, profiles: S) -> Self {
        RegistrationForm {
            engine,
            view,
            identity,
            profiles,
        }
    }

    /// The view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The view, mutably; the UI writes field values through it.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Take the form apart.
    pub fn into_parts(self) -> (V, A, S) {
        (self.view, self.identity, self.profiles)
    }

    /// Handle an edit of `field`.
    ///
    /// Re-validates `field` and refreshes its error display, then validates
    /// the whole form and enables submit only if every field passes. Returns
    /// the whole-form report.
    pub fn on_input(&mut self, field: &FieldId) -> ValidationReport {
        let value = self.view.value(field);
        let messages = self.engine.validate_field(field, &value);

        self.view.clear_errors(field);
        if !messages.is_empty() {
            self.view.show_errors(field, &messages);
        }

        let report = self.engine.validate_all(read_form(&self.engine, &self.view));
        self.view.set_submit_enabled(report.all_valid());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            %field,
            field_errors = messages.len(),
            form_valid = report.all_valid(),
            "registration field edited"
        );

        report
    }

    /// Register the account described by the form.
    ///
    /// The form is re-checked first; an invalid form is refused without
    /// contacting the provider. A provider error is shown verbatim in the
    /// notice region and not retried. After the account exists its profile
    /// is saved; on success the form shows [`Notice::Success`] and resets.
    pub async fn submit(&mut self) -> Result<UserHandle, SubmitError> {
        let mut values = match self.engine.check(read_form(&self.engine, &self.view)) {
            Validation::Success(values) => values,
            Validation::Failure(report) => {
                self.view.set_submit_enabled(false);
                return Err(SubmitError::Invalid(report));
            }
        };

        let email = take(&mut values, &EMAIL);
        let password = take(&mut values, &PASSWORD);

        let user = match self.identity.create_account(&email, &password).await {
            Ok(user) => user,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(code = %err.code, "account creation refused");
                self.view.show_notice(Notice::Failure(err.message.clone()));
                return Err(err.into());
            }
        };

        let profile = Profile {
            name: take(&mut values, &NAME),
            email,
            address: take(&mut values, &ADDRESS),
        };

        if let Err(source) = self.profiles.put(&user.uid, profile).await {
            #[cfg(feature = "tracing")]
            tracing::error!(uid = %user.uid, code = %source.code, "failed to save profile");
            return Err(SubmitError::Store {
                uid: user.uid,
                source,
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(uid = %user.uid, "account registered");

        self.view.show_notice(Notice::Success);
        self.view.reset();
        Ok(user)
    }
}

// Current value of every field the engine's rule set declares.
fn read_form<V>(engine: &ValidationEngine, view: &V) -> Vec<(FieldId, String)>
where
    V: FieldSource + ?Sized,
{
    engine
        .rules()
        .fields()
        .iter()
        .map(|field| (field.clone(), view.value(field)))
        .collect()
}

fn take(values: &mut FieldValues, field: &FieldId) -> String {
    values.remove(field.as_str()).unwrap_or_default()
}
