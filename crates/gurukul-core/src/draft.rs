//! Draft types — the editable-field sets sent to the collaborator.
//!
//! A draft never carries `id` or `timestamp`; the server assigns those and
//! returns the canonical record. Drafts are validated at this boundary so a
//! required-field gap never turns into a network round trip.

use serde::Serialize;

use crate::{
  Error, Result,
  record::House,
  store::Draft,
};

// ─── FeedbackDraft ───────────────────────────────────────────────────────────

/// Editable fields of a reflection. Serialises to the camelCase wire shape
/// of a create/update body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDraft {
  pub student_name: String,
  pub house:        House,
  pub rating:       u8,
  pub comment:      String,
}

impl Default for FeedbackDraft {
  /// The submit form's initial state: house Bhairav, rating 5.
  fn default() -> Self {
    Self {
      student_name: String::new(),
      house:        House::default(),
      rating:       5,
      comment:      String::new(),
    }
  }
}

impl FeedbackDraft {
  /// Submit-form constraints: the quick-submit entry point additionally
  /// requires a student name, while stored records (and edits of them) may
  /// stay anonymous.
  pub fn validate_submission(&self) -> Result<()> {
    if self.student_name.trim().is_empty() {
      return Err(Error::MissingField("student name"));
    }
    self.validate()
  }
}

impl Draft for FeedbackDraft {
  fn validate(&self) -> Result<()> {
    if !(1..=5).contains(&self.rating) {
      return Err(Error::RatingOutOfRange(self.rating));
    }
    Ok(())
  }
}

// ─── ImprovementDraft ────────────────────────────────────────────────────────

/// Editable fields of an improvement report. All three are required.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementDraft {
  pub problem:      String,
  pub solution:     String,
  pub submitted_by: String,
}

impl Draft for ImprovementDraft {
  fn validate(&self) -> Result<()> {
    if self.submitted_by.trim().is_empty() {
      return Err(Error::MissingField("submitted by"));
    }
    if self.problem.trim().is_empty() {
      return Err(Error::MissingField("problem description"));
    }
    if self.solution.trim().is_empty() {
      return Err(Error::MissingField("proposed solution"));
    }
    Ok(())
  }
}
