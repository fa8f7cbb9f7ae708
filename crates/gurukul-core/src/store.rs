//! The `RecordStore` trait — the seam between controllers and the remote
//! collection endpoints.
//!
//! The trait is implemented by transport backends (e.g. the reqwest client
//! in `gurukul-client`). Controllers and views depend on this abstraction,
//! not on any concrete transport, so the state machine is testable with an
//! in-memory fake.

use std::future::Future;

use crate::Result;

// ─── Draft / Record ──────────────────────────────────────────────────────────

/// An in-memory, not-yet-persisted copy of a record's editable fields.
pub trait Draft: Clone + Default + Send + Sync {
  /// Record-kind constraints (required fields, ranges), checked at the
  /// boundary before any network call is issued.
  fn validate(&self) -> Result<()>;
}

/// A canonical, server-owned record.
pub trait Record: Clone + Send + Sync {
  type Draft: Draft;

  /// The opaque server-assigned identifier, unique within its collection.
  fn id(&self) -> &str;

  /// Snapshot the editable fields into a draft buffer (begin-edit).
  fn to_draft(&self) -> Self::Draft;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over one remote record collection.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes (e.g. tokio).
pub trait RecordStore: Send + Sync {
  type Record: Record;
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the whole collection, in server order.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<Self::Record>, Self::Error>> + Send + '_;

  /// Create a record from `draft`; the server assigns `id` and `timestamp`
  /// and returns the canonical stored form.
  fn create<'a>(
    &'a self,
    draft: &'a <Self::Record as Record>::Draft,
  ) -> impl Future<Output = Result<Self::Record, Self::Error>> + Send + 'a;

  /// Replace the editable fields of `id`; returns the canonical updated
  /// form, which callers must adopt over their local draft.
  fn update<'a>(
    &'a self,
    id: &'a str,
    draft: &'a <Self::Record as Record>::Draft,
  ) -> impl Future<Output = Result<Self::Record, Self::Error>> + Send + 'a;

  /// Delete `id`. Any success status counts; the body is ignored.
  fn delete<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
