//! Client-side feedback filtering — pure and synchronous.
//!
//! A filter is re-evaluated over the current records snapshot whenever
//! either side changes; it never mutates the records themselves. Every
//! unset field imposes no constraint.

use chrono::{NaiveDate, NaiveTime};

use crate::record::{FeedbackRecord, House};

/// Predicate parameters for the filter page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackFilter {
  /// Case-insensitive substring match on the student name. Records without
  /// a name never match a non-empty query.
  pub student_name: String,
  /// Exact match when set.
  pub house: Option<House>,
  /// Exact match when set.
  pub rating: Option<u8>,
  /// Inclusive lower bound at start of day (00:00:00.000).
  pub start_date: Option<NaiveDate>,
  /// Inclusive upper bound at end of day (23:59:59.999).
  pub end_date: Option<NaiveDate>,
}

impl FeedbackFilter {
  /// The filter page's default: both date bounds set to `day`.
  pub fn for_day(day: NaiveDate) -> Self {
    Self {
      start_date: Some(day),
      end_date: Some(day),
      ..Self::default()
    }
  }

  pub fn is_unconstrained(&self) -> bool {
    self.student_name.is_empty()
      && self.house.is_none()
      && self.rating.is_none()
      && self.start_date.is_none()
      && self.end_date.is_none()
  }

  /// Evaluate the predicate against one record.
  pub fn matches(&self, record: &FeedbackRecord) -> bool {
    if !self.student_name.is_empty() {
      let name = record.student_name.as_deref().unwrap_or("").to_lowercase();
      if !name.contains(&self.student_name.to_lowercase()) {
        return false;
      }
    }

    if let Some(house) = self.house
      && record.house != Some(house)
    {
      return false;
    }

    if let Some(rating) = self.rating
      && record.rating != rating
    {
      return false;
    }

    let ts = record.timestamp.naive_utc();
    if let Some(start) = self.start_date
      && ts < start.and_time(NaiveTime::MIN)
    {
      return false;
    }
    if let Some(end) = self.end_date
      && end
        .and_hms_milli_opt(23, 59, 59, 999)
        .is_some_and(|bound| ts > bound)
    {
      return false;
    }

    true
  }
}
