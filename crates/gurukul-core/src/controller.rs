//! The record-list controller — the state machine every list-bearing page
//! drives.
//!
//! A controller owns a local, authoritative-once-fetched copy of one remote
//! collection and mediates all view-triggered mutations:
//!
//! ```text
//! idle --load()--> loading --success--> ready
//! loading --failure--> error
//! ready --load()--> loading
//! ready --begin_edit(id)--> ready[editing=id]
//! ready[editing=id] --commit_edit ok--> ready[editing=none]
//! ready[editing=id] --commit_edit err--> ready[editing=id]   (retry/cancel)
//! ready[editing=id] --cancel_edit--> ready[editing=none]
//! error --load()--> loading
//! ```
//!
//! There is no terminal state; the controller lives as long as its owning
//! view. No state is shared between controller instances; each page owns
//! its own copy of the fetched records.

use std::time::{Duration, Instant};

use crate::store::{Draft as _, Record, RecordStore};

// ─── Status banner ───────────────────────────────────────────────────────────

/// How long a status banner stays visible. A display timer, not a network
/// timeout; posting a new banner restarts the window.
pub const BANNER_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
  Success,
  Error,
}

/// A transient status message with a fixed 5-second lifetime.
#[derive(Debug, Clone)]
pub struct Banner {
  pub message: String,
  pub kind:    BannerKind,
  posted_at:   Instant,
}

impl Banner {
  pub fn success(message: impl Into<String>) -> Self {
    Self::new(message, BannerKind::Success)
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self::new(message, BannerKind::Error)
  }

  fn new(message: impl Into<String>, kind: BannerKind) -> Self {
    Self {
      message: message.into(),
      kind,
      posted_at: Instant::now(),
    }
  }

  pub fn is_expired(&self) -> bool { self.posted_at.elapsed() >= BANNER_TTL }

  /// Shift the posting instant into the past. Test-only.
  #[cfg(test)]
  pub(crate) fn backdate(&mut self, by: Duration) { self.posted_at -= by; }
}

// ─── Phase ───────────────────────────────────────────────────────────────────

/// Load phase of the collection region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
  Idle,
  Loading,
  Ready,
  /// A list fetch failed; `detail` is rendered in place of the data, and
  /// the previously fetched records are left untouched.
  Error { detail: String },
}

impl Phase {
  pub fn is_loading(&self) -> bool { matches!(self, Phase::Loading) }
}

// ─── Edit session ────────────────────────────────────────────────────────────

/// An in-progress edit: the target id plus the draft buffer holding the
/// not-yet-committed field values.
#[derive(Debug, Clone)]
pub struct EditSession<D> {
  pub id:    String,
  pub draft: D,
}

// ─── Controller ──────────────────────────────────────────────────────────────

type DraftOf<S> = <<S as RecordStore>::Record as Record>::Draft;

/// State machine and data operations for one record collection.
pub struct ListController<S: RecordStore> {
  store:   S,
  phase:   Phase,
  /// Server response order; never re-sorted locally.
  records: Vec<S::Record>,

  editing:        Option<EditSession<DraftOf<S>>>,
  selected_id:    Option<String>,
  pending_remove: Option<String>,
  banner:         Option<Banner>,

  /// Monotonic token; bumped by every load start and every local mutation
  /// so completions from superseded loads are discarded instead of
  /// overwriting newer state.
  generation: u64,
  /// Monotonic change counter, the subscription seam for views.
  revision: u64,
}

impl<S: RecordStore> ListController<S> {
  pub fn new(store: S) -> Self {
    Self {
      store,
      phase: Phase::Idle,
      records: Vec::new(),
      editing: None,
      selected_id: None,
      pending_remove: None,
      banner: None,
      generation: 0,
      revision: 0,
    }
  }

  // ── Read accessors ────────────────────────────────────────────────────────

  /// The transport backend this controller drives.
  pub fn store(&self) -> &S { &self.store }

  pub fn phase(&self) -> &Phase { &self.phase }

  pub fn records(&self) -> &[S::Record] { &self.records }

  pub fn record(&self, id: &str) -> Option<&S::Record> {
    self.records.iter().find(|r| r.id() == id)
  }

  pub fn editing_id(&self) -> Option<&str> {
    self.editing.as_ref().map(|s| s.id.as_str())
  }

  pub fn selected_id(&self) -> Option<&str> { self.selected_id.as_deref() }

  pub fn pending_remove(&self) -> Option<&str> { self.pending_remove.as_deref() }

  /// The current draft buffer, if an edit is in progress.
  pub fn draft(&self) -> Option<&DraftOf<S>> {
    self.editing.as_ref().map(|s| &s.draft)
  }

  /// Mutable access to the draft buffer: field updates land here and
  /// nowhere else until `commit_edit` succeeds.
  pub fn draft_mut(&mut self) -> Option<&mut DraftOf<S>> {
    self.revision += 1;
    self.editing.as_mut().map(|s| &mut s.draft)
  }

  /// The active status banner, if one was posted within the last 5 s.
  pub fn banner(&self) -> Option<&Banner> {
    self.banner.as_ref().filter(|b| !b.is_expired())
  }

  /// Bumped on every observable state change; views that are not redrawn
  /// unconditionally can diff this instead of subscribing to events.
  pub fn revision(&self) -> u64 { self.revision }

  /// Records passing `predicate`, in list order. Pure; the underlying
  /// records are never reordered or mutated by filtering.
  pub fn filtered<'a, P>(&'a self, predicate: P) -> Vec<&'a S::Record>
  where
    P: Fn(&S::Record) -> bool,
  {
    self.records.iter().filter(|r| predicate(r)).collect()
  }

  // ── Loading ───────────────────────────────────────────────────────────────

  /// Fetch the collection and replace `records` wholesale on success.
  /// Safe to call repeatedly; each call restarts the cycle.
  pub async fn load(&mut self) {
    let token = self.start_load();
    let outcome = self.store.list().await.map_err(|e| e.to_string());
    self.finish_load(token, outcome);
  }

  /// Transition `idle|ready|error → loading` and return the generation
  /// token the matching [`finish_load`](Self::finish_load) must present.
  pub fn start_load(&mut self) -> u64 {
    self.generation += 1;
    self.phase = Phase::Loading;
    self.revision += 1;
    self.generation
  }

  /// Apply a load completion. A completion whose token was superseded by a
  /// newer load or a local mutation is discarded, so it cannot overwrite
  /// state that changed while it was in flight.
  pub fn finish_load(
    &mut self,
    token: u64,
    outcome: Result<Vec<S::Record>, String>,
  ) {
    if token != self.generation {
      return;
    }
    match outcome {
      Ok(records) => {
        self.records = records;
        self.phase = Phase::Ready;
      }
      // Records from the previous successful load stay untouched.
      Err(detail) => self.phase = Phase::Error { detail },
    }
    self.revision += 1;
  }

  // ── Create ────────────────────────────────────────────────────────────────

  /// Validate and submit a new record, then reload the collection.
  /// Returns `true` on success so the caller can clear its form. A
  /// validation gap or a rejected call surfaces an error banner and leaves
  /// all local state unchanged; a gap issues no network call at all.
  pub async fn create(&mut self, draft: &DraftOf<S>) -> bool {
    if let Err(gap) = draft.validate() {
      self.post(Banner::error(gap.to_string()));
      return false;
    }
    match self.store.create(draft).await {
      Ok(_) => {
        self.load().await;
        true
      }
      Err(e) => {
        self.post(Banner::error(e.to_string()));
        false
      }
    }
  }

  // ── Edit-in-place ─────────────────────────────────────────────────────────

  /// Snapshot `id`'s editable fields into the draft buffer and enter edit
  /// mode. Entering edit mode hides the action affordances. Returns `false`
  /// if `id` is not in the collection.
  pub fn begin_edit(&mut self, id: &str) -> bool {
    let Some(record) = self.record(id) else {
      return false;
    };
    self.editing = Some(EditSession {
      id:    id.to_string(),
      draft: record.to_draft(),
    });
    self.selected_id = None;
    self.revision += 1;
    true
  }

  /// Submit the draft buffer for `id`. On success the server-returned
  /// canonical record is spliced over the matching entry and edit mode
  /// ends. On failure the edit session stays open so the user can retry or
  /// cancel; no partial change is ever applied locally.
  pub async fn commit_edit(&mut self, id: &str) -> bool {
    let draft = match &self.editing {
      Some(session) if session.id == id => session.draft.clone(),
      _ => return false,
    };
    if let Err(gap) = draft.validate() {
      self.post(Banner::error(gap.to_string()));
      return false;
    }
    match self.store.update(id, &draft).await {
      Ok(canonical) => {
        // This mutation supersedes any in-flight load; the local records
        // are authoritative again.
        self.generation += 1;
        self.phase = Phase::Ready;
        if let Some(slot) = self.records.iter_mut().find(|r| r.id() == id) {
          *slot = canonical;
        }
        self.editing = None;
        self.revision += 1;
        true
      }
      Err(e) => {
        self.post(Banner::error(e.to_string()));
        false
      }
    }
  }

  /// Leave edit mode, discarding the draft buffer unconditionally.
  pub fn cancel_edit(&mut self) {
    self.editing = None;
    self.selected_id = None;
    self.revision += 1;
  }

  // ── Selection ─────────────────────────────────────────────────────────────

  /// Toggle the click-to-reveal selection. Selecting the row currently
  /// mid-edit is suppressed entirely; selection and an edit of a
  /// *different* row may coexist.
  pub fn select(&mut self, id: &str) {
    if self.editing.as_ref().is_some_and(|s| s.id == id) {
      return;
    }
    if self.selected_id.as_deref() == Some(id) {
      self.selected_id = None;
    } else {
      self.selected_id = Some(id.to_string());
    }
    self.revision += 1;
  }

  // ── Removal ───────────────────────────────────────────────────────────────

  /// Stage `id` for deletion. The delete call itself only ever fires from
  /// [`confirm_remove`](Self::confirm_remove); an explicit yes/no step is
  /// part of the contract, not a view nicety.
  pub fn request_remove(&mut self, id: &str) -> bool {
    if self.record(id).is_none() {
      return false;
    }
    self.pending_remove = Some(id.to_string());
    self.revision += 1;
    true
  }

  /// Abort a staged deletion.
  pub fn decline_remove(&mut self) {
    self.pending_remove = None;
    self.revision += 1;
  }

  /// Issue the staged delete. On success the entry is removed and any
  /// selection/edit referencing it is cleared; on failure the records are
  /// left unchanged and an error banner is shown.
  pub async fn confirm_remove(&mut self) -> bool {
    let Some(id) = self.pending_remove.take() else {
      return false;
    };
    self.revision += 1;
    match self.store.delete(&id).await {
      Ok(()) => {
        self.generation += 1;
        self.phase = Phase::Ready;
        self.records.retain(|r| r.id() != id);
        if self.selected_id.as_deref() == Some(id.as_str()) {
          self.selected_id = None;
        }
        if self.editing.as_ref().is_some_and(|s| s.id == id) {
          self.editing = None;
        }
        self.revision += 1;
        true
      }
      Err(e) => {
        self.post(Banner::error(e.to_string()));
        false
      }
    }
  }

  // ── Internal ──────────────────────────────────────────────────────────────

  fn post(&mut self, banner: Banner) {
    self.banner = Some(banner);
    self.revision += 1;
  }
}
