//! Home screen — the quick-submit reflection form.
//!
//! Deliberately not list-backed: a successful submission posts a banner and
//! resets the form, nothing is fetched or reloaded.

use crossterm::event::{KeyCode, KeyEvent};
use gurukul_client::FeedbackApi;
use gurukul_core::{
  controller::Banner,
  draft::FeedbackDraft,
  record::House,
  store::RecordStore as _,
};

/// Focusable elements of the submit form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeField {
  Name,
  House,
  Rating,
  Comment,
  Submit,
}

impl HomeField {
  fn next(self) -> Self {
    match self {
      Self::Name => Self::House,
      Self::House => Self::Rating,
      Self::Rating => Self::Comment,
      Self::Comment => Self::Submit,
      Self::Submit => Self::Name,
    }
  }

  fn prev(self) -> Self {
    match self {
      Self::Name => Self::Submit,
      Self::House => Self::Name,
      Self::Rating => Self::House,
      Self::Comment => Self::Rating,
      Self::Submit => Self::Comment,
    }
  }
}

pub struct HomeForm {
  api: FeedbackApi,

  pub draft:      FeedbackDraft,
  pub focus:      HomeField,
  /// Keystrokes go into the focused text field while set.
  pub editing:    bool,
  pub banner:     Option<Banner>,
  pub submitting: bool,
}

impl HomeForm {
  pub fn new(api: FeedbackApi) -> Self {
    Self {
      api,
      draft: FeedbackDraft::default(),
      focus: HomeField::Name,
      editing: false,
      banner: None,
      submitting: false,
    }
  }

  /// Handle a key. Returns `true` when the key was consumed.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    if self.editing {
      self.handle_edit_key(key);
      return true;
    }

    match key.code {
      KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => {
        self.focus = self.focus.next();
      }
      KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => {
        self.focus = self.focus.prev();
      }

      KeyCode::Left | KeyCode::Char('h') => match self.focus {
        HomeField::House => self.draft.house = cycle_house(self.draft.house, false),
        HomeField::Rating => {
          self.draft.rating = cycle_rating(self.draft.rating, false)
        }
        _ => return false,
      },
      KeyCode::Right | KeyCode::Char('l') => match self.focus {
        HomeField::House => self.draft.house = cycle_house(self.draft.house, true),
        HomeField::Rating => {
          self.draft.rating = cycle_rating(self.draft.rating, true)
        }
        _ => return false,
      },

      KeyCode::Enter => match self.focus {
        HomeField::Name | HomeField::Comment => self.editing = true,
        HomeField::Submit => self.submit().await,
        _ => {}
      },
      KeyCode::Char('i') if matches!(self.focus, HomeField::Name | HomeField::Comment) => {
        self.editing = true;
      }

      _ => return false,
    }
    true
  }

  fn handle_edit_key(&mut self, key: KeyEvent) {
    let field = match self.focus {
      HomeField::Name => &mut self.draft.student_name,
      HomeField::Comment => &mut self.draft.comment,
      _ => {
        self.editing = false;
        return;
      }
    };
    match key.code {
      KeyCode::Esc | KeyCode::Enter => self.editing = false,
      KeyCode::Backspace => {
        field.pop();
      }
      KeyCode::Char(c) => field.push(c),
      _ => {}
    }
  }

  /// Validate, then submit. A validation gap never reaches the network.
  async fn submit(&mut self) {
    if self.submitting {
      return;
    }
    if let Err(gap) = self.draft.validate_submission() {
      self.banner = Some(Banner::error(gap.to_string()));
      return;
    }

    self.submitting = true;
    let result = self.api.create(&self.draft).await;
    self.submitting = false;

    match result {
      Ok(_) => {
        self.banner = Some(Banner::success("Success! Reflection saved."));
        self.draft = FeedbackDraft::default();
        self.focus = HomeField::Name;
      }
      Err(e) => self.banner = Some(Banner::error(e.to_string())),
    }
  }

  /// The banner, if it has not yet expired.
  pub fn banner(&self) -> Option<&Banner> {
    self.banner.as_ref().filter(|b| !b.is_expired())
  }
}

// ─── Cycle helpers ───────────────────────────────────────────────────────────

pub fn cycle_house(current: House, forward: bool) -> House {
  let all = House::ALL;
  let idx = all.iter().position(|h| *h == current).unwrap_or(0);
  let next = if forward {
    (idx + 1) % all.len()
  } else {
    (idx + all.len() - 1) % all.len()
  };
  all[next]
}

pub fn cycle_rating(current: u8, forward: bool) -> u8 {
  if forward {
    if current >= 5 { 1 } else { current + 1 }
  } else if current <= 1 {
    5
  } else {
    current - 1
  }
}
