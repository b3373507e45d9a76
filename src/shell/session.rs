//! Signed-in session tracking
//!
//! Follows the identity provider's auth state and, while someone is signed
//! in, their profile snapshots, keeping the welcome banner current.

use futures::stream::{self, BoxStream, Fuse};
use futures::StreamExt;

use crate::shell::{Greeter, IdentityProvider, NoticeSink, Profile, ProfileStore, UserHandle};

enum SessionEvent {
    Auth(Option<UserHandle>),
    Profile(Option<Profile>),
}

/// Keeps the greeting in sync with who is signed in.
#[derive(Debug)]
pub struct SessionWatcher<V, S> {
    view: V,
    profiles: S,
    current: Option<UserHandle>,
}

impl<V, S> SessionWatcher<V, S>
where
    V: Greeter + NoticeSink,
    S: ProfileStore,
{
    /// Create a watcher; nobody is signed in yet.
    pub fn new(view: V, profiles: S) -> Self {
        SessionWatcher {
            view,
            profiles,
            current: None,
        }
    }

    /// The view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The account currently signed in, if any.
    pub fn current_user(&self) -> Option<&UserHandle> {
        self.current.as_ref()
    }

    /// Apply an auth state change.
    ///
    /// On sign-in returns the profile subscription to follow. On sign-out
    /// hides the greeting and any notices and returns `None`.
    pub fn on_auth_state(
        &mut self,
        state: Option<UserHandle>,
    ) -> Option<BoxStream<'static, Option<Profile>>> {
        match state {
            Some(user) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(uid = %user.uid, "session started");
                let snapshots = self.profiles.subscribe(&user.uid);
                self.current = Some(user);
                Some(snapshots)
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!("session ended");
                self.current = None;
                self.view.clear_greeting();
                self.view.clear_notices();
                None
            }
        }
    }

    /// Apply a profile snapshot. Missing profiles leave the view untouched.
    pub fn on_profile(&mut self, snapshot: Option<Profile>) {
        if let Some(profile) = snapshot {
            self.view.greet(&profile.name);
        }
    }

    /// Follow `identity` until its auth stream and the current profile
    /// subscription both end.
    ///
    /// Every auth change drops the previous profile subscription.
    pub async fn run<A>(&mut self, identity: &A)
    where
        A: IdentityProvider + ?Sized,
    {
        let mut auth_states = identity.auth_state_changes().fuse();
        let mut snapshots: Fuse<BoxStream<'static, Option<Profile>>> =
            stream::empty().boxed().fuse();

        loop {
            let event = futures::select! {
                state = auth_states.next() => state.map(SessionEvent::Auth),
                snapshot = snapshots.next() => snapshot.map(SessionEvent::Profile),
                complete => break,
            };

            match event {
                Some(SessionEvent::Auth(state)) => {
                    snapshots = match self.on_auth_state(state) {
                        Some(subscription) => subscription.fuse(),
                        None => stream::empty().boxed().fuse(),
                    };
                }
                Some(SessionEvent::Profile(snapshot)) => self.on_profile(snapshot),
                None => {}
            }
        }
    }
}
