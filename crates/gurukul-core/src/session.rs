//! Session state and the authentication collaborator seam.
//!
//! The current user is process-scoped context with an explicit lifecycle,
//! injected into views, never an ambient global. Route guarding is the
//! [`Session::is_authenticated`] predicate checked before any protected
//! view renders.

use std::future::Future;

use serde::{Deserialize, Serialize};

// ─── SessionUser ─────────────────────────────────────────────────────────────

/// The authenticated user as reported by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
  pub name:  String,
  pub email: String,
  /// Avatar URL; the collaborator sends one but nothing here requires it.
  #[serde(default)]
  pub picture: Option<String>,
}

// ─── AuthProvider ────────────────────────────────────────────────────────────

/// Abstraction over the authentication/session collaborator.
pub trait AuthProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The current user, or `None` when unauthenticated.
  fn current_user(
    &self,
  ) -> impl Future<Output = Result<Option<SessionUser>, Self::Error>> + Send + '_;

  /// Terminate the session on the collaborator side.
  fn logout(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Where a browser must be pointed to initiate the login flow.
  fn login_url(&self) -> String;
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Process-scoped session context: one per application, owning the cached
/// current user between explicit `initialize`/`teardown` calls.
pub struct Session<A: AuthProvider> {
  provider: A,
  user:     Option<SessionUser>,
}

impl<A: AuthProvider> Session<A> {
  pub fn new(provider: A) -> Self {
    Self {
      provider,
      user: None,
    }
  }

  /// Fetch and cache the current user. Call at startup and after a login
  /// attempt; an error leaves the session unauthenticated.
  pub async fn initialize(&mut self) -> Result<(), A::Error> {
    self.user = self.provider.current_user().await?;
    Ok(())
  }

  /// Log out and drop the cached user. The local session ends even when
  /// the collaborator call fails; the error is still reported.
  pub async fn teardown(&mut self) -> Result<(), A::Error> {
    let result = self.provider.logout().await;
    self.user = None;
    result
  }

  pub fn user(&self) -> Option<&SessionUser> { self.user.as_ref() }

  /// The route-guard predicate: protected views render only when this
  /// holds, otherwise the login view is shown.
  pub fn is_authenticated(&self) -> bool { self.user.is_some() }

  pub fn login_url(&self) -> String { self.provider.login_url() }
}
