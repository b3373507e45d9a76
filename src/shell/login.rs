//! Login form controller and sign-out

use crate::shell::{AuthError, FieldSource, IdentityProvider, Notice, NoticeSink, UserHandle};
use crate::signup::{EMAIL, PASSWORD};

/// Drives the login form. Input is passed to the provider as typed; the
/// provider's verdict is the only validation.
#[derive(Debug)]
pub struct LoginForm<V, A> {
    view: V,
    identity: A,
}

impl<V, A> LoginForm<V, A>
where
    V: FieldSource + NoticeSink,
    A: IdentityProvider,
{
    /// Wire a login form.
    pub fn new(view: V, identity: A) -> Self {
        LoginForm { view, identity }
    }

    /// The view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The view, mutably.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The identity provider.
    pub fn identity(&self) -> &A {
        &self.identity
    }

    /// Sign in with the current email and password.
    ///
    /// Earlier notices are hidden first. Success shows [`Notice::Success`]
    /// and resets the form; failure shows the provider's message verbatim.
    pub async fn submit(&mut self) -> Result<UserHandle, AuthError> {
        self.view.clear_notices();

        let email = self.view.value(&EMAIL);
        let password = self.view.value(&PASSWORD);

        match self.identity.sign_in(&email, &password).await {
            Ok(user) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(uid = %user.uid, "signed in");
                self.view.show_notice(Notice::Success);
                self.view.reset();
                Ok(user)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(code = %err.code, "sign-in refused");
                self.view.show_notice(Notice::Failure(err.message.clone()));
                Err(err)
            }
        }
    }
}

/// Sign the current account out and hide stale notices.
///
/// On failure the notices are left alone and the error is returned.
pub async fn sign_out<A, N>(identity: &A, notices: &mut N) -> Result<(), AuthError>
where
    A: IdentityProvider + ?Sized,
    N: NoticeSink + ?Sized,
{
    match identity.sign_out().await {
        Ok(()) => {
            notices.clear_notices();
            Ok(())
        }
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(code = %err.code, "sign-out failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryIdentity, RecordingView};

    async fn identity_with_ada() -> MemoryIdentity {
        let identity = MemoryIdentity::new();
        identity
            .create_account("ada@example.com", "Abcdef1!")
            .await
            .unwrap();
        identity.sign_out().await.unwrap();
        identity
    }

    #[tokio::test]
    async fn login_success_shows_notice_and_resets() {
        let view = RecordingView::new()
            .with_value(EMAIL, "ada@example.com")
            .with_value(PASSWORD, "Abcdef1!")
            .with_notice(Notice::Failure("old".into()));
        let mut form = LoginForm::new(view, identity_with_ada().await);

        let user = form.submit().await.unwrap();

        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(form.view().notice, Some(Notice::Success));
        assert!(form.view().values.is_empty());
        assert_eq!(form.identity().current_user(), Some(user));
    }

    #[tokio::test]
    async fn login_failure_shows_provider_message() {
        let view = RecordingView::new()
            .with_value(EMAIL, "ada@example.com")
            .with_value(PASSWORD, "wrong");
        let mut form = LoginForm::new(view, identity_with_ada().await);

        let err = form.submit().await.unwrap_err();

        assert_eq!(err.code, "auth/wrong-password");
        assert_eq!(form.view().notice, Some(Notice::Failure(err.message.clone())));
        assert_eq!(form.view().values.len(), 2);
    }

    #[tokio::test]
    async fn login_unknown_user() {
        let view = RecordingView::new()
            .with_value(EMAIL, "bob@example.com")
            .with_value(PASSWORD, "Abcdef1!");
        let mut form = LoginForm::new(view, MemoryIdentity::new());

        let err = form.submit().await.unwrap_err();
        assert_eq!(err.code, "auth/user-not-found");
    }

    #[tokio::test]
    async fn sign_out_clears_notices() {
        let identity = MemoryIdentity::new();
        identity
            .create_account("ada@example.com", "Abcdef1!")
            .await
            .unwrap();
        let mut view = RecordingView::new().with_notice(Notice::Success);

        sign_out(&identity, &mut view).await.unwrap();

        assert_eq!(view.notice, None);
        assert_eq!(identity.current_user(), None);
    }
}
