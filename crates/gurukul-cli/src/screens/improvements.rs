//! Improvements screen — problem/solution reports with a shared add/edit
//! form, confirmation-gated deletion, and reload-after-create.

use crossterm::event::{KeyCode, KeyEvent};
use gurukul_client::ImprovementsApi;
use gurukul_core::{
  controller::ListController,
  draft::ImprovementDraft,
  store::Record as _,
};

/// Focusable elements of the add/edit form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImprovementField {
  SubmittedBy,
  Problem,
  Solution,
  Submit,
}

impl ImprovementField {
  fn next(self) -> Self {
    match self {
      Self::SubmittedBy => Self::Problem,
      Self::Problem => Self::Solution,
      Self::Solution => Self::Submit,
      Self::Submit => Self::SubmittedBy,
    }
  }

  fn prev(self) -> Self {
    match self {
      Self::SubmittedBy => Self::Submit,
      Self::Problem => Self::SubmittedBy,
      Self::Solution => Self::Problem,
      Self::Submit => Self::Solution,
    }
  }
}

pub struct ImprovementsScreen {
  pub controller: ListController<ImprovementsApi>,

  pub cursor: usize,
  /// The add form is open. Editing an existing record reuses the same form
  /// but binds it to the controller's draft buffer instead.
  pub form_open: bool,
  pub form:      ImprovementDraft,
  pub focus:     ImprovementField,
  pub typing:    bool,
}

impl ImprovementsScreen {
  pub fn new(api: ImprovementsApi) -> Self {
    Self {
      controller: ListController::new(api),
      cursor:     0,
      form_open:  false,
      form:       ImprovementDraft::default(),
      focus:      ImprovementField::SubmittedBy,
      typing:     false,
    }
  }

  pub fn form_active(&self) -> bool {
    self.form_open || self.controller.editing_id().is_some()
  }

  fn clamp_cursor(&mut self) {
    let len = self.controller.records().len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }

  /// Handle a key. Returns `true` when the key was consumed.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
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

    if self.form_active() {
      self.handle_form_key(key).await;
      return true;
    }

    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.controller.records().len();
        if len > 0 && self.cursor + 1 < len {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }

      // Open the add form (toggle, like the original button).
      KeyCode::Char('a') => {
        self.form_open = true;
        self.form = ImprovementDraft::default();
        self.focus = ImprovementField::SubmittedBy;
        self.typing = false;
      }

      KeyCode::Char('e') => {
        if let Some(id) = self
          .controller
          .records()
          .get(self.cursor)
          .map(|r| r.id().to_string())
          && self.controller.begin_edit(&id)
        {
          self.form_open = false;
          self.focus = ImprovementField::SubmittedBy;
          self.typing = false;
        }
      }
      KeyCode::Char('d') => {
        if let Some(id) = self
          .controller
          .records()
          .get(self.cursor)
          .map(|r| r.id().to_string())
        {
          self.controller.request_remove(&id);
        }
      }

      KeyCode::Char('r') => {
        self.controller.load().await;
        self.clamp_cursor();
      }
      _ => return false,
    }
    true
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    if self.typing {
      let Some(field) = self.focused_field_mut() else {
        self.typing = false;
        return;
      };
      match key.code {
        KeyCode::Esc | KeyCode::Enter => self.typing = false,
        KeyCode::Backspace => {
          field.pop();
        }
        KeyCode::Char(c) => field.push(c),
        _ => {}
      }
      return;
    }

    match key.code {
      KeyCode::Esc => {
        if self.controller.editing_id().is_some() {
          self.controller.cancel_edit();
        }
        self.form_open = false;
        self.form = ImprovementDraft::default();
      }

      KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
        self.focus = self.focus.next();
      }
      KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
        self.focus = self.focus.prev();
      }

      KeyCode::Enter | KeyCode::Char('i') => match self.focus {
        ImprovementField::Submit => self.submit().await,
        _ => self.typing = true,
      },

      _ => {}
    }
  }

  /// Bind the focused label to the active draft: the controller's buffer
  /// while editing, the add-form draft otherwise.
  fn focused_field_mut(&mut self) -> Option<&mut String> {
    let focus = self.focus;
    let draft = if self.controller.editing_id().is_some() {
      self.controller.draft_mut()?
    } else {
      &mut self.form
    };
    match focus {
      ImprovementField::SubmittedBy => Some(&mut draft.submitted_by),
      ImprovementField::Problem => Some(&mut draft.problem),
      ImprovementField::Solution => Some(&mut draft.solution),
      ImprovementField::Submit => None,
    }
  }

  /// The draft currently shown in the form.
  pub fn active_draft(&self) -> Option<&ImprovementDraft> {
    if self.controller.editing_id().is_some() {
      self.controller.draft()
    } else if self.form_open {
      Some(&self.form)
    } else {
      None
    }
  }

  async fn submit(&mut self) {
    if let Some(id) = self.controller.editing_id().map(str::to_string) {
      if self.controller.commit_edit(&id).await {
        self.focus = ImprovementField::SubmittedBy;
      }
      return;
    }
    // A validation gap posts a banner and never reaches the network; the
    // form stays filled so the user can complete it.
    if self.controller.create(&self.form).await {
      self.form = ImprovementDraft::default();
      self.form_open = false;
      self.focus = ImprovementField::SubmittedBy;
      self.clamp_cursor();
    }
  }
}
