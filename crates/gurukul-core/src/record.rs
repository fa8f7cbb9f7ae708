//! Record types — the canonical, server-owned representations.
//!
//! The storage collaborator assigns `id` and `timestamp` at creation and
//! returns the canonical form after every create/update. Clients must adopt
//! that returned object, never their local draft, as the source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  draft::{FeedbackDraft, ImprovementDraft},
  store::Record,
};

// ─── House ───────────────────────────────────────────────────────────────────

/// The fixed, closed set of school houses a reflection can be filed under.
/// Serialised by name; the wire format uses the same spelling.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
pub enum House {
  #[default]
  Bhairav,
  Bhageshree,
  Megh,
}

impl House {
  pub const ALL: [House; 3] = [House::Bhairav, House::Bhageshree, House::Megh];

  /// The house motto shown on the home screen.
  pub fn motto(self) -> &'static str {
    match self {
      House::Bhairav => "Excellence & Leadership",
      House::Bhageshree => "Innovation & Creativity",
      House::Megh => "Wisdom & Knowledge",
    }
  }
}

// ─── FeedbackRecord ──────────────────────────────────────────────────────────

/// A stored student reflection. Field names follow the collaborator's JSON
/// wire format (`_id`, camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
  #[serde(rename = "_id")]
  pub id: String,

  /// Optional on stored records; displayed as "Anonymous" when absent.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub student_name: Option<String>,

  /// Optional on stored records; entries predating houses have none.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub house: Option<House>,

  /// Integer in the closed range [1, 5].
  pub rating: u8,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub comment: Option<String>,

  /// Server-assigned creation time; never changed by edits.
  pub timestamp: DateTime<Utc>,
}

impl FeedbackRecord {
  /// Student name with the "Anonymous" fallback the views display.
  pub fn display_name(&self) -> &str {
    self
      .student_name
      .as_deref()
      .filter(|name| !name.is_empty())
      .unwrap_or("Anonymous")
  }

  /// Comment with the placeholder the views display.
  pub fn display_comment(&self) -> &str {
    self
      .comment
      .as_deref()
      .filter(|comment| !comment.is_empty())
      .unwrap_or("No comment provided.")
  }
}

impl Record for FeedbackRecord {
  type Draft = FeedbackDraft;

  fn id(&self) -> &str { &self.id }

  fn to_draft(&self) -> FeedbackDraft {
    FeedbackDraft {
      student_name: self.student_name.clone().unwrap_or_default(),
      house:        self.house.unwrap_or_default(),
      rating:       self.rating,
      comment:      self.comment.clone().unwrap_or_default(),
    }
  }
}

// ─── ImprovementRecord ───────────────────────────────────────────────────────

/// A stored improvement report: a problem and its proposed solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementRecord {
  #[serde(rename = "_id")]
  pub id: String,

  pub problem:      String,
  pub solution:     String,
  pub submitted_by: String,

  /// Server-assigned creation time; never changed by edits.
  pub timestamp: DateTime<Utc>,
}

impl Record for ImprovementRecord {
  type Draft = ImprovementDraft;

  fn id(&self) -> &str { &self.id }

  fn to_draft(&self) -> ImprovementDraft {
    ImprovementDraft {
      problem:      self.problem.clone(),
      solution:     self.solution.clone(),
      submitted_by: self.submitted_by.clone(),
    }
  }
}
