//! Client error taxonomy.
//!
//! `Display` doubles as the user-facing message: a network failure reads as
//! the generic connection hint, while a server rejection surfaces the
//! collaborator-supplied `message` verbatim when one was sent.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  /// The request could not be sent, or the response body could not be
  /// parsed. `detail` is kept for logs only.
  #[error("Connection failed. Is the backend running?")]
  Network { detail: String },

  /// A non-2xx response. `message` is the `{"message": …}` the collaborator
  /// attached, if any.
  #[error("{}", .message.as_deref().unwrap_or("Server error"))]
  Rejected {
    status:  u16,
    message: Option<String>,
  },

  /// The HTTP client itself could not be constructed. Startup-only.
  #[error("failed to build HTTP client: {detail}")]
  Setup { detail: String },
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
