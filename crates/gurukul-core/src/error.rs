//! Error types for `gurukul-core`.

use thiserror::Error;

/// A validation gap: a draft failed its boundary checks. These are caught
/// before any network call is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("rating must be between 1 and 5, got {0}")]
  RatingOutOfRange(u8),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
