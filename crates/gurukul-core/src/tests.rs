//! Controller, filter, and session tests against in-memory fakes.

use std::sync::{
  Mutex,
  atomic::{AtomicUsize, Ordering},
};

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
  controller::{Banner, ListController, Phase},
  draft::{FeedbackDraft, ImprovementDraft},
  filter::FeedbackFilter,
  record::{FeedbackRecord, House},
  session::{AuthProvider, Session, SessionUser},
  store::{Draft as _, Record as _, RecordStore},
};

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn ts(raw: &str) -> DateTime<Utc> { raw.parse().expect("valid timestamp") }

fn day(raw: &str) -> NaiveDate { raw.parse().expect("valid date") }

fn feedback(
  id: &str,
  name: Option<&str>,
  house: Option<House>,
  rating: u8,
  stamp: &str,
) -> FeedbackRecord {
  FeedbackRecord {
    id: id.to_string(),
    student_name: name.map(str::to_string),
    house,
    rating,
    comment: None,
    timestamp: ts(stamp),
  }
}

fn canonical(
  id: &str,
  stamp: DateTime<Utc>,
  draft: &FeedbackDraft,
) -> FeedbackRecord {
  FeedbackRecord {
    id: id.to_string(),
    student_name: (!draft.student_name.is_empty())
      .then(|| draft.student_name.clone()),
    house: Some(draft.house),
    rating: draft.rating,
    comment: (!draft.comment.is_empty()).then(|| draft.comment.clone()),
    timestamp: stamp,
  }
}

// ─── Fake store ──────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct FakeError(String);

/// In-memory stand-in for the remote collection. Each `fail_*` slot makes
/// the next matching call fail once with that message.
#[derive(Default)]
struct FakeStore {
  records:     Mutex<Vec<FeedbackRecord>>,
  fail_list:   Mutex<Option<String>>,
  fail_create: Mutex<Option<String>>,
  fail_update: Mutex<Option<String>>,
  fail_delete: Mutex<Option<String>>,

  list_calls:   AtomicUsize,
  create_calls: AtomicUsize,
  delete_calls: AtomicUsize,
  next_id:      AtomicUsize,
}

impl FakeStore {
  fn with_records(records: Vec<FeedbackRecord>) -> Self {
    Self {
      records: Mutex::new(records),
      ..Self::default()
    }
  }

  fn fail_next(slot: &Mutex<Option<String>>, message: &str) {
    *slot.lock().unwrap() = Some(message.to_string());
  }
}

impl RecordStore for FakeStore {
  type Record = FeedbackRecord;
  type Error = FakeError;

  async fn list(&self) -> Result<Vec<FeedbackRecord>, FakeError> {
    self.list_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(msg) = self.fail_list.lock().unwrap().take() {
      return Err(FakeError(msg));
    }
    Ok(self.records.lock().unwrap().clone())
  }

  async fn create(
    &self,
    draft: &FeedbackDraft,
  ) -> Result<FeedbackRecord, FakeError> {
    self.create_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(msg) = self.fail_create.lock().unwrap().take() {
      return Err(FakeError(msg));
    }
    let n = self.next_id.fetch_add(1, Ordering::SeqCst);
    let record =
      canonical(&format!("new{n}"), ts("2024-06-01T09:00:00Z"), draft);
    self.records.lock().unwrap().push(record.clone());
    Ok(record)
  }

  async fn update(
    &self,
    id: &str,
    draft: &FeedbackDraft,
  ) -> Result<FeedbackRecord, FakeError> {
    if let Some(msg) = self.fail_update.lock().unwrap().take() {
      return Err(FakeError(msg));
    }
    let mut records = self.records.lock().unwrap();
    let slot = records
      .iter_mut()
      .find(|r| r.id == id)
      .ok_or_else(|| FakeError(format!("no record {id}")))?;
    let updated = canonical(id, slot.timestamp, draft);
    *slot = updated.clone();
    Ok(updated)
  }

  async fn delete(&self, id: &str) -> Result<(), FakeError> {
    self.delete_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(msg) = self.fail_delete.lock().unwrap().take() {
      return Err(FakeError(msg));
    }
    self.records.lock().unwrap().retain(|r| r.id != id);
    Ok(())
  }
}

fn seeded() -> ListController<FakeStore> {
  ListController::new(FakeStore::with_records(vec![
    feedback(
      "f1",
      Some("Ann"),
      Some(House::Megh),
      5,
      "2024-01-01T10:00:00Z",
    ),
    feedback(
      "f2",
      Some("Bina"),
      Some(House::Bhairav),
      3,
      "2024-01-02T10:00:00Z",
    ),
  ]))
}

// ─── Loading ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_replaces_records_and_reaches_ready() {
  let mut c = seeded();
  assert_eq!(*c.phase(), Phase::Idle);

  c.load().await;
  assert_eq!(*c.phase(), Phase::Ready);
  assert_eq!(c.records().len(), 2);
  assert_eq!(c.records()[0].id, "f1");
}

#[tokio::test]
async fn load_failure_reports_detail_and_keeps_records() {
  let mut c = seeded();
  c.load().await;

  FakeStore::fail_next(&c_store(&c).fail_list, "boom");
  c.load().await;

  assert_eq!(
    *c.phase(),
    Phase::Error {
      detail: "boom".to_string()
    }
  );
  // Records from the last successful load are untouched.
  assert_eq!(c.records().len(), 2);
}

#[tokio::test]
async fn load_after_error_restarts_the_cycle() {
  let mut c = seeded();
  FakeStore::fail_next(&c_store(&c).fail_list, "down");
  c.load().await;
  assert!(matches!(c.phase(), Phase::Error { .. }));

  c.load().await;
  assert_eq!(*c.phase(), Phase::Ready);
  assert_eq!(c.records().len(), 2);
}

#[tokio::test]
async fn stale_load_completion_is_discarded() {
  let mut c = seeded();
  c.load().await;
  let before = c.records().to_vec();

  // A slow reload starts, then the user deletes f1 while it is in flight.
  let token = c.start_load();
  assert!(c.request_remove("f1"));
  assert!(c.confirm_remove().await);
  assert_eq!(c.records().len(), 1);

  // The superseded completion arrives with the pre-delete snapshot; it
  // must not resurrect the removed record.
  c.finish_load(token, Ok(before));
  assert_eq!(c.records().len(), 1);
  assert!(c.record("f1").is_none());
  assert_eq!(*c.phase(), Phase::Ready);
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_reloads_the_list() {
  let mut c = seeded();
  c.load().await;

  let draft = FeedbackDraft {
    student_name: "Chitra".to_string(),
    house: House::Megh,
    rating: 4,
    comment: "good week".to_string(),
  };
  assert!(c.create(&draft).await);
  assert_eq!(c.records().len(), 3);
  assert!(
    c.records()
      .iter()
      .any(|r| r.student_name.as_deref() == Some("Chitra"))
  );
}

#[tokio::test]
async fn create_validation_gap_issues_no_network_call() {
  let mut c = seeded();
  c.load().await;

  let draft = FeedbackDraft {
    rating: 0,
    ..FeedbackDraft::default()
  };
  assert!(!c.create(&draft).await);
  assert_eq!(c_store(&c).create_calls.load(Ordering::SeqCst), 0);

  let banner = c.banner().expect("a validation banner");
  assert_eq!(banner.message, "rating must be between 1 and 5, got 0");
}

#[tokio::test]
async fn create_failure_surfaces_server_message_verbatim() {
  let mut c = seeded();
  c.load().await;

  FakeStore::fail_next(&c_store(&c).fail_create, "db down");
  assert!(!c.create(&FeedbackDraft::default()).await);

  assert_eq!(c.banner().expect("error banner").message, "db down");
  assert_eq!(c.records().len(), 2);
}

// ─── Edit-in-place ───────────────────────────────────────────────────────────

#[tokio::test]
async fn begin_edit_snapshots_the_record_and_clears_selection() {
  let mut c = seeded();
  c.load().await;
  c.select("f1");
  assert_eq!(c.selected_id(), Some("f1"));

  assert!(c.begin_edit("f1"));
  assert_eq!(c.editing_id(), Some("f1"));
  assert_eq!(c.selected_id(), None);

  let draft = c.draft().expect("draft buffer");
  assert_eq!(draft.student_name, "Ann");
  assert_eq!(draft.house, House::Megh);
  assert_eq!(draft.rating, 5);
}

#[tokio::test]
async fn begin_edit_requires_an_existing_record() {
  let mut c = seeded();
  c.load().await;
  assert!(!c.begin_edit("missing"));
  assert_eq!(c.editing_id(), None);
}

#[tokio::test]
async fn commit_edit_replaces_exactly_one_record() {
  let mut c = seeded();
  c.load().await;
  let untouched = c.record("f2").unwrap().clone();

  assert!(c.begin_edit("f1"));
  c.draft_mut().unwrap().rating = 2;
  c.draft_mut().unwrap().comment = "revised".to_string();
  assert!(c.commit_edit("f1").await);

  assert_eq!(c.editing_id(), None);
  let edited = c.record("f1").unwrap();
  assert_eq!(edited.rating, 2);
  assert_eq!(edited.comment.as_deref(), Some("revised"));
  // Edits never change the recorded submission time.
  assert_eq!(edited.timestamp, ts("2024-01-01T10:00:00Z"));
  assert_eq!(*c.record("f2").unwrap(), untouched);
}

#[tokio::test]
async fn commit_edit_failure_keeps_the_edit_session_open() {
  let mut c = seeded();
  c.load().await;
  let original = c.record("f1").unwrap().clone();

  assert!(c.begin_edit("f1"));
  c.draft_mut().unwrap().rating = 1;
  FakeStore::fail_next(&c_store(&c).fail_update, "db down");
  assert!(!c.commit_edit("f1").await);

  // Still in edit mode, draft intact, nothing applied locally.
  assert_eq!(c.editing_id(), Some("f1"));
  assert_eq!(c.draft().unwrap().rating, 1);
  assert_eq!(*c.record("f1").unwrap(), original);
  assert_eq!(c.banner().expect("error banner").message, "db down");
}

#[tokio::test]
async fn commit_edit_for_a_different_id_is_rejected() {
  let mut c = seeded();
  c.load().await;
  assert!(c.begin_edit("f1"));
  assert!(!c.commit_edit("f2").await);
  assert_eq!(c.editing_id(), Some("f1"));
}

#[tokio::test]
async fn cancel_edit_discards_all_draft_changes() {
  let mut c = seeded();
  c.load().await;
  let original = c.record("f1").unwrap().clone();

  assert!(c.begin_edit("f1"));
  c.draft_mut().unwrap().student_name = "Someone Else".to_string();
  c.cancel_edit();

  assert_eq!(c.editing_id(), None);
  assert!(c.draft().is_none());
  assert_eq!(*c.record("f1").unwrap(), original);
}

// ─── Selection ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn select_toggles() {
  let mut c = seeded();
  c.load().await;

  c.select("f1");
  assert_eq!(c.selected_id(), Some("f1"));
  c.select("f1");
  assert_eq!(c.selected_id(), None);
}

#[tokio::test]
async fn select_is_suppressed_for_the_row_mid_edit() {
  let mut c = seeded();
  c.load().await;
  assert!(c.begin_edit("f1"));

  c.select("f1");
  assert_eq!(c.selected_id(), None);

  // Selection and an edit of a different row may coexist.
  c.select("f2");
  assert_eq!(c.selected_id(), Some("f2"));
  assert_eq!(c.editing_id(), Some("f1"));
}

// ─── Removal ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn remove_never_fires_without_confirmation() {
  let mut c = seeded();
  c.load().await;

  assert!(c.request_remove("f1"));
  assert_eq!(c.pending_remove(), Some("f1"));
  assert_eq!(c_store(&c).delete_calls.load(Ordering::SeqCst), 0);

  c.decline_remove();
  assert_eq!(c.pending_remove(), None);
  assert_eq!(c_store(&c).delete_calls.load(Ordering::SeqCst), 0);
  assert_eq!(c.records().len(), 2);
}

#[tokio::test]
async fn confirmed_remove_deletes_exactly_one_and_clears_selection() {
  let mut c = seeded();
  c.load().await;
  c.select("f1");

  assert!(c.request_remove("f1"));
  assert!(c.confirm_remove().await);

  assert_eq!(c.records().len(), 1);
  assert!(c.record("f1").is_none());
  assert_eq!(c.selected_id(), None);
  assert_eq!(c.pending_remove(), None);
}

#[tokio::test]
async fn failed_remove_leaves_records_unchanged() {
  let mut c = seeded();
  c.load().await;

  FakeStore::fail_next(&c_store(&c).fail_delete, "db down");
  assert!(c.request_remove("f1"));
  assert!(!c.confirm_remove().await);

  assert_eq!(c.records().len(), 2);
  assert!(c.record("f1").is_some());
  assert_eq!(c.banner().expect("error banner").message, "db down");
}

// ─── Banner ──────────────────────────────────────────────────────────────────

#[test]
fn banner_expires_after_five_seconds() {
  let mut banner = Banner::success("Saved.");
  assert!(!banner.is_expired());

  banner.backdate(std::time::Duration::from_millis(5001));
  assert!(banner.is_expired());
}

// ─── Filtering ───────────────────────────────────────────────────────────────

fn sample_records() -> Vec<FeedbackRecord> {
  vec![
    feedback(
      "f1",
      Some("Ann Rao"),
      Some(House::Megh),
      5,
      "2024-03-05T00:00:00Z",
    ),
    feedback(
      "f2",
      Some("Bina"),
      Some(House::Bhairav),
      3,
      "2024-03-05T12:30:00Z",
    ),
    feedback("f3", None, None, 5, "2024-03-05T23:59:59.999Z"),
    feedback(
      "f4",
      Some("annika"),
      Some(House::Bhageshree),
      1,
      "2024-03-06T00:00:00Z",
    ),
  ]
}

fn ids(records: &[FeedbackRecord], filter: &FeedbackFilter) -> Vec<String> {
  records
    .iter()
    .filter(|r| filter.matches(r))
    .map(|r| r.id.clone())
    .collect()
}

#[test]
fn empty_filter_matches_everything() {
  let records = sample_records();
  let filter = FeedbackFilter::default();
  assert!(filter.is_unconstrained());
  assert_eq!(ids(&records, &filter), ["f1", "f2", "f3", "f4"]);
}

#[test]
fn name_filter_is_case_insensitive_substring() {
  let records = sample_records();
  let filter = FeedbackFilter {
    student_name: "ANN".to_string(),
    ..FeedbackFilter::default()
  };
  // Matches "Ann Rao" and "annika"; the anonymous record never matches.
  assert_eq!(ids(&records, &filter), ["f1", "f4"]);
}

#[test]
fn rating_filter_matches_exactly() {
  let records = sample_records();
  for rating in 1..=5u8 {
    let filter = FeedbackFilter {
      rating: Some(rating),
      ..FeedbackFilter::default()
    };
    assert!(
      records
        .iter()
        .filter(|r| filter.matches(r))
        .all(|r| r.rating == rating)
    );
  }
  let fives = FeedbackFilter {
    rating: Some(5),
    ..FeedbackFilter::default()
  };
  assert_eq!(ids(&records, &fives), ["f1", "f3"]);
}

#[test]
fn house_filter_matches_exactly() {
  let records = sample_records();
  let filter = FeedbackFilter {
    house: Some(House::Megh),
    ..FeedbackFilter::default()
  };
  assert_eq!(ids(&records, &filter), ["f1"]);
}

#[test]
fn single_day_range_spans_midnight_to_end_of_day() {
  let records = sample_records();
  let filter = FeedbackFilter::for_day(day("2024-03-05"));
  // 00:00:00.000 and 23:59:59.999 are inclusive; the next midnight is out.
  assert_eq!(ids(&records, &filter), ["f1", "f2", "f3"]);
}

#[test]
fn date_bounds_apply_independently() {
  let records = sample_records();

  let from = FeedbackFilter {
    start_date: Some(day("2024-03-06")),
    ..FeedbackFilter::default()
  };
  assert_eq!(ids(&records, &from), ["f4"]);

  let until = FeedbackFilter {
    end_date: Some(day("2024-03-05")),
    ..FeedbackFilter::default()
  };
  assert_eq!(ids(&records, &until), ["f1", "f2", "f3"]);
}

// ─── Wire format ─────────────────────────────────────────────────────────────

#[test]
fn feedback_record_decodes_the_collaborator_shape() {
  let raw = r#"{
    "_id": "1",
    "studentName": "Ann",
    "rating": 5,
    "house": "Megh",
    "timestamp": "2024-01-01T10:00:00Z"
  }"#;
  let record: FeedbackRecord = serde_json::from_str(raw).unwrap();

  assert_eq!(record.id, "1");
  assert_eq!(record.display_name(), "Ann");
  assert_eq!(record.house, Some(House::Megh));
  assert_eq!(record.rating, 5);
  assert_eq!(record.display_comment(), "No comment provided.");
}

#[test]
fn anonymous_records_fall_back_to_placeholders() {
  let raw = r#"{"_id":"2","rating":3,"timestamp":"2024-01-01T10:00:00Z"}"#;
  let record: FeedbackRecord = serde_json::from_str(raw).unwrap();
  assert_eq!(record.display_name(), "Anonymous");
  assert_eq!(record.house, None);
}

#[test]
fn drafts_serialise_only_the_editable_fields() {
  let value = serde_json::to_value(FeedbackDraft {
    student_name: "Ann".to_string(),
    house: House::Bhairav,
    rating: 4,
    comment: String::new(),
  })
  .unwrap();

  let map = value.as_object().unwrap();
  let mut keys: Vec<_> = map.keys().map(String::as_str).collect();
  keys.sort_unstable();
  assert_eq!(keys, ["comment", "house", "rating", "studentName"]);
  assert_eq!(map["house"], "Bhairav");
}

#[test]
fn house_round_trips_through_display_and_parse() {
  for house in House::ALL {
    let parsed: House = house.to_string().parse().unwrap();
    assert_eq!(parsed, house);
  }
  assert!("Gandhar".parse::<House>().is_err());
}

// ─── Draft validation ────────────────────────────────────────────────────────

#[test]
fn feedback_submission_requires_a_name() {
  let draft = FeedbackDraft {
    student_name: "   ".to_string(),
    ..FeedbackDraft::default()
  };
  assert_eq!(
    draft.validate_submission(),
    Err(crate::Error::MissingField("student name"))
  );
  // The record kind itself allows anonymity: plain validation passes.
  assert_eq!(draft.validate(), Ok(()));
}

#[test]
fn improvement_drafts_require_all_three_fields() {
  let complete = ImprovementDraft {
    problem: "projector flickers".to_string(),
    solution: "replace the cable".to_string(),
    submitted_by: "Ann".to_string(),
  };
  assert_eq!(complete.validate(), Ok(()));

  for (field, wreck) in [
    ("submitted by", ImprovementDraft {
      submitted_by: String::new(),
      ..complete.clone()
    }),
    ("problem description", ImprovementDraft {
      problem: String::new(),
      ..complete.clone()
    }),
    ("proposed solution", ImprovementDraft {
      solution: String::new(),
      ..complete.clone()
    }),
  ] {
    assert_eq!(wreck.validate(), Err(crate::Error::MissingField(field)));
  }
}

#[test]
fn record_to_draft_round_trip_snapshots_editable_fields() {
  let record = feedback(
    "f1",
    Some("Ann"),
    Some(House::Megh),
    5,
    "2024-01-01T10:00:00Z",
  );
  let draft = record.to_draft();
  assert_eq!(draft.student_name, "Ann");
  assert_eq!(draft.house, House::Megh);
  assert_eq!(draft.rating, 5);
  assert_eq!(draft.comment, "");
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeAuth {
  user:         Mutex<Option<SessionUser>>,
  logout_calls: AtomicUsize,
}

impl AuthProvider for FakeAuth {
  type Error = FakeError;

  async fn current_user(&self) -> Result<Option<SessionUser>, FakeError> {
    Ok(self.user.lock().unwrap().clone())
  }

  async fn logout(&self) -> Result<(), FakeError> {
    self.logout_calls.fetch_add(1, Ordering::SeqCst);
    *self.user.lock().unwrap() = None;
    Ok(())
  }

  fn login_url(&self) -> String { "http://auth.test/auth/google".to_string() }
}

#[tokio::test]
async fn session_guard_follows_the_provider() {
  let provider = FakeAuth::default();
  *provider.user.lock().unwrap() = Some(SessionUser {
    name:    "Priya".to_string(),
    email:   "priya@example.edu".to_string(),
    picture: None,
  });

  let mut session = Session::new(provider);
  assert!(!session.is_authenticated());

  session.initialize().await.unwrap();
  assert!(session.is_authenticated());
  assert_eq!(session.user().unwrap().name, "Priya");

  session.teardown().await.unwrap();
  assert!(!session.is_authenticated());
  assert!(session.user().is_none());
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Peek at the fake store inside a controller.
fn c_store(c: &ListController<FakeStore>) -> &FakeStore { c.store() }
