//! Filter screen — searchable feedback list with click-to-reveal actions,
//! edit-in-place, and confirmation-gated deletion.

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use gurukul_client::FeedbackApi;
use gurukul_core::{
  controller::ListController,
  filter::FeedbackFilter,
  record::{FeedbackRecord, House},
  store::Record as _,
};

use crate::{
  form::TextInput,
  screens::home::{cycle_house, cycle_rating},
};

// ─── Focus model ─────────────────────────────────────────────────────────────

/// Filter-bar fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
  Name,
  House,
  Rating,
  Start,
  End,
}

impl FilterField {
  fn next(self) -> Option<Self> {
    match self {
      Self::Name => Some(Self::House),
      Self::House => Some(Self::Rating),
      Self::Rating => Some(Self::Start),
      Self::Start => Some(Self::End),
      Self::End => None, // falls through to the results list
    }
  }
}

/// Which half of the screen owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterZone {
  Filters(FilterField),
  Results,
}

/// Fields of the edit-in-place form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
  Name,
  House,
  Rating,
  Comment,
}

impl EditField {
  fn next(self) -> Self {
    match self {
      Self::Name => Self::House,
      Self::House => Self::Rating,
      Self::Rating => Self::Comment,
      Self::Comment => Self::Name,
    }
  }
}

// ─── Screen state ────────────────────────────────────────────────────────────

pub struct FilterScreen {
  pub controller: ListController<FeedbackApi>,

  pub name_input:  TextInput,
  pub house:       Option<House>,
  pub rating:      Option<u8>,
  pub start_input: TextInput,
  pub end_input:   TextInput,

  pub zone: FilterZone,
  /// Typing into the focused filter text field.
  pub editing_field: bool,

  /// Cursor within the *filtered* results.
  pub cursor: usize,

  pub edit_focus: EditField,
  /// Typing into the focused edit-form text field.
  pub edit_typing: bool,
}

impl FilterScreen {
  pub fn new(api: FeedbackApi) -> Self {
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    Self {
      controller: ListController::new(api),
      name_input: TextInput::default(),
      house: None,
      rating: None,
      start_input: TextInput::new(today.clone()),
      end_input: TextInput::new(today),
      zone: FilterZone::Filters(FilterField::Name),
      editing_field: false,
      cursor: 0,
      edit_focus: EditField::Name,
      edit_typing: false,
    }
  }

  /// The predicate built from the current inputs. An unparseable date is
  /// treated as unset, imposing no constraint.
  pub fn filter(&self) -> FeedbackFilter {
    FeedbackFilter {
      student_name: self.name_input.value().trim().to_string(),
      house:        self.house,
      rating:       self.rating,
      start_date:   parse_day(self.start_input.value()),
      end_date:     parse_day(self.end_input.value()),
    }
  }

  /// Records passing the current filter, in server order.
  pub fn visible(&self) -> Vec<&FeedbackRecord> {
    let filter = self.filter();
    self.controller.filtered(|r| filter.matches(r))
  }

  fn visible_id(&self, index: usize) -> Option<String> {
    self.visible().get(index).map(|r| r.id().to_string())
  }

  fn clamp_cursor(&mut self) {
    let len = self.visible().len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }

  /// Restore the default filter: everything unset except both date bounds
  /// pinned to today.
  pub fn clear_filters(&mut self) {
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    self.name_input.clear();
    self.house = None;
    self.rating = None;
    self.start_input.set(today.clone());
    self.end_input.set(today);
    self.cursor = 0;
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Handle a key. Returns `true` when the key was consumed.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Confirmation modal swallows everything until answered.
    if self.controller.pending_remove().is_some() {
      match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
          self.controller.confirm_remove().await;
          self.clamp_cursor();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
          self.controller.decline_remove();
        }
        _ => {}
      }
      return true;
    }

    if self.controller.editing_id().is_some() {
      self.handle_edit_key(key).await;
      return true;
    }

    // Reload works from either zone, as long as nothing is being typed.
    if !self.editing_field && key.code == KeyCode::Char('r') {
      self.controller.load().await;
      self.clamp_cursor();
      return true;
    }

    match self.zone {
      FilterZone::Filters(field) => self.handle_filter_key(field, key),
      FilterZone::Results => self.handle_results_key(key),
    }
  }

  fn handle_filter_key(&mut self, field: FilterField, key: KeyEvent) -> bool {
    if self.editing_field {
      let input = match field {
        FilterField::Name => &mut self.name_input,
        FilterField::Start => &mut self.start_input,
        FilterField::End => &mut self.end_input,
        _ => {
          self.editing_field = false;
          return true;
        }
      };
      match key.code {
        KeyCode::Esc | KeyCode::Enter => self.editing_field = false,
        KeyCode::Backspace => input.backspace(),
        KeyCode::Char(c) => input.push(c),
        _ => {}
      }
      self.cursor = 0;
      return true;
    }

    match key.code {
      KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
        self.zone = match field.next() {
          Some(next) => FilterZone::Filters(next),
          None => FilterZone::Results,
        };
      }
      KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
        self.zone = match field {
          FilterField::Name => FilterZone::Results,
          FilterField::House => FilterZone::Filters(FilterField::Name),
          FilterField::Rating => FilterZone::Filters(FilterField::House),
          FilterField::Start => FilterZone::Filters(FilterField::Rating),
          FilterField::End => FilterZone::Filters(FilterField::Start),
        };
      }

      KeyCode::Enter | KeyCode::Char('i')
        if matches!(
          field,
          FilterField::Name | FilterField::Start | FilterField::End
        ) =>
      {
        self.editing_field = true;
      }

      KeyCode::Left | KeyCode::Char('h') => match field {
        FilterField::House => self.house = cycle_opt_house(self.house, false),
        FilterField::Rating => {
          self.rating = cycle_opt_rating(self.rating, false)
        }
        _ => return false,
      },
      KeyCode::Right | KeyCode::Char('l') => match field {
        FilterField::House => self.house = cycle_opt_house(self.house, true),
        FilterField::Rating => self.rating = cycle_opt_rating(self.rating, true),
        _ => return false,
      },

      KeyCode::Char('c') => self.clear_filters(),
      _ => return false,
    }
    self.cursor = 0;
    true
  }

  fn handle_results_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.visible().len();
        if len > 0 && self.cursor + 1 < len {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }
      KeyCode::Tab => self.zone = FilterZone::Filters(FilterField::Name),

      // Click-to-reveal: toggle the action affordances on the cursor row.
      KeyCode::Enter | KeyCode::Char(' ') => {
        if let Some(id) = self.visible_id(self.cursor) {
          self.controller.select(&id);
        }
      }

      // Actions operate on the revealed (selected) row only.
      KeyCode::Char('e') => {
        if let Some(id) =
          self.controller.selected_id().map(str::to_string)
          && self.controller.begin_edit(&id)
        {
          self.edit_focus = EditField::Name;
          self.edit_typing = false;
        }
      }
      KeyCode::Char('d') => {
        if let Some(id) = self.controller.selected_id().map(str::to_string) {
          self.controller.request_remove(&id);
        }
      }

      KeyCode::Char('c') => self.clear_filters(),
      _ => return false,
    }
    true
  }

  async fn handle_edit_key(&mut self, key: KeyEvent) {
    if self.edit_typing {
      let Some(draft) = self.controller.draft_mut() else {
        self.edit_typing = false;
        return;
      };
      let field = match self.edit_focus {
        EditField::Name => &mut draft.student_name,
        EditField::Comment => &mut draft.comment,
        _ => {
          self.edit_typing = false;
          return;
        }
      };
      match key.code {
        KeyCode::Esc | KeyCode::Enter => self.edit_typing = false,
        KeyCode::Backspace => {
          field.pop();
        }
        KeyCode::Char(c) => field.push(c),
        _ => {}
      }
      return;
    }

    match key.code {
      KeyCode::Esc => self.controller.cancel_edit(),
      KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
        self.edit_focus = self.edit_focus.next();
      }
      KeyCode::Up | KeyCode::Char('k') => {
        // Three steps forward is one step back in a four-field cycle.
        self.edit_focus = self.edit_focus.next().next().next();
      }

      KeyCode::Enter | KeyCode::Char('i')
        if matches!(self.edit_focus, EditField::Name | EditField::Comment) =>
      {
        self.edit_typing = true;
      }

      KeyCode::Left | KeyCode::Char('h') => {
        if let Some(draft) = self.controller.draft_mut() {
          match self.edit_focus {
            EditField::House => draft.house = cycle_house(draft.house, false),
            EditField::Rating => {
              draft.rating = cycle_rating(draft.rating, false)
            }
            _ => {}
          }
        }
      }
      KeyCode::Right | KeyCode::Char('l') => {
        if let Some(draft) = self.controller.draft_mut() {
          match self.edit_focus {
            EditField::House => draft.house = cycle_house(draft.house, true),
            EditField::Rating => draft.rating = cycle_rating(draft.rating, true),
            _ => {}
          }
        }
      }

      // Save: commit the draft; on failure the session stays open to retry.
      KeyCode::Char('s') => {
        if let Some(id) = self.controller.editing_id().map(str::to_string) {
          self.controller.commit_edit(&id).await;
        }
      }
      _ => {}
    }
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn parse_day(raw: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// `None` ("All Houses") is part of the cycle here, unlike the edit form.
fn cycle_opt_house(current: Option<House>, forward: bool) -> Option<House> {
  match (current, forward) {
    (None, true) => Some(House::Bhairav),
    (Some(House::Megh), true) => None,
    (Some(h), true) => Some(cycle_house(h, true)),
    (None, false) => Some(House::Megh),
    (Some(House::Bhairav), false) => None,
    (Some(h), false) => Some(cycle_house(h, false)),
  }
}

/// `None` ("All Ratings") is part of the cycle here.
fn cycle_opt_rating(current: Option<u8>, forward: bool) -> Option<u8> {
  match (current, forward) {
    (None, true) => Some(1),
    (Some(5), true) => None,
    (Some(r), true) => Some(r + 1),
    (None, false) => Some(5),
    (Some(1), false) => None,
    (Some(r), false) => Some(r - 1),
  }
}
