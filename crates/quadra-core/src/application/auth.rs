//! Auth context - session state over an [`AuthProvider`]
//!
//! Holds the signed-in user in a `watch` channel so screens can react to
//! sign-in, profile edits, and logout.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::domain::{validate_email, validate_password, AuthError, ProfileUpdate, UserProfile};
use crate::repository::AuthProvider;

pub struct AuthContext {
    provider: Arc<dyn AuthProvider>,
    current: watch::Sender<Option<UserProfile>>,
}

impl AuthContext {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let (current, _) = watch::channel(None);
        Self { provider, current }
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<UserProfile> {
        self.current.borrow().clone()
    }

    /// Receiver that observes every change of the signed-in user
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.current.subscribe()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let email = email.trim();
        validate_email(email)?;

        let user = self.provider.sign_in(email, password).await?;

        info!(uid = %user.uid, "[AuthContext] Signed in");
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    /// Register and sign in as the new user
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<UserProfile, AuthError> {
        let email = email.trim();
        validate_email(email)?;
        validate_password(password)?;

        let user = self.provider.sign_up(email, password, display_name).await?;

        info!(uid = %user.uid, "[AuthContext] Signed up");
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    pub fn logout(&self) {
        if let Some(user) = self.current.send_replace(None) {
            info!(uid = %user.uid, "[AuthContext] Logged out");
        }
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let uid = self.require_uid()?;
        validate_password(new_password)?;

        self.provider
            .change_password(&uid, current_password, new_password)
            .await?;

        info!(uid = %uid, "[AuthContext] Changed password");
        Ok(())
    }

    pub async fn update_user_profile(
        &self,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AuthError> {
        let uid = self.require_uid()?;

        let user = self.provider.update_profile(&uid, update).await?;

        info!(uid = %uid, "[AuthContext] Updated profile");
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    fn require_uid(&self) -> Result<String, AuthError> {
        self.current
            .borrow()
            .as_ref()
            .map(|user| user.uid.clone())
            .ok_or(AuthError::NotSignedIn)
    }
}
