//! Auth collaborator client — session check, logout, login URL.

use gurukul_core::session::{AuthProvider, SessionUser};
use reqwest::StatusCode;

use crate::{
  api::ApiClient,
  error::{ApiError, Result},
};

/// Client for the collaborator's session endpoints. Login itself is a
/// browser flow; this side only checks the session and terminates it.
#[derive(Clone)]
pub struct AuthApi {
  client: ApiClient,
}

impl AuthApi {
  pub fn new(client: ApiClient) -> Self { Self { client } }
}

impl AuthProvider for AuthApi {
  type Error = ApiError;

  /// `GET /auth/user`: a 401/403 means "not signed in", not a failure.
  async fn current_user(&self) -> Result<Option<SessionUser>> {
    let req = self.client.http().get(self.client.url("/auth/user"));
    let resp = req.send().await.map_err(|e| ApiError::Network {
      detail: e.to_string(),
    })?;

    match resp.status() {
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
      status if status.is_success() => {
        let user = resp.json().await.map_err(|e| ApiError::Network {
          detail: format!("deserialising user: {e}"),
        })?;
        Ok(Some(user))
      }
      status => Err(ApiError::Rejected {
        status:  status.as_u16(),
        message: None,
      }),
    }
  }

  /// `GET /auth/logout`: the body is ignored.
  async fn logout(&self) -> Result<()> {
    self
      .client
      .execute(self.client.http().get(self.client.url("/auth/logout")))
      .await?;
    Ok(())
  }

  /// The browser-initiated Google sign-in flow.
  fn login_url(&self) -> String { self.client.url("/auth/google") }
}
