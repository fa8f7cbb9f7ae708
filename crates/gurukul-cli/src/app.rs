//! Application state machine and event dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gurukul_client::{ApiClient, AuthApi, FeedbackApi, ImprovementsApi};
use gurukul_core::{
  controller::{ListController, Phase},
  session::Session,
};

use crate::screens::{FilterScreen, HomeForm, ImprovementsScreen};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Shown whenever no user is present; all other screens are guarded.
  Login,
  Home,
  Feedback,
  Filter,
  Improvements,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state. Each data page owns its own controller and
/// therefore its own copy of the fetched records; nothing is shared.
pub struct App {
  pub screen:  Screen,
  pub session: Session<AuthApi>,
  /// Why the login screen is showing, when there is more to say than
  /// "not signed in".
  pub login_notice: Option<String>,

  pub feedback:        ListController<FeedbackApi>,
  pub feedback_cursor: usize,

  pub home:         HomeForm,
  pub filter:       FilterScreen,
  pub improvements: ImprovementsScreen,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::Login,
      session: Session::new(AuthApi::new(client.clone())),
      login_notice: None,
      feedback: ListController::new(FeedbackApi::new(client.clone())),
      feedback_cursor: 0,
      home: HomeForm::new(FeedbackApi::new(client.clone())),
      filter: FilterScreen::new(FeedbackApi::new(client.clone())),
      improvements: ImprovementsScreen::new(ImprovementsApi::new(client)),
    }
  }

  /// Check the session; on success pass the route guard onto the home
  /// screen, otherwise stay on the login screen.
  pub async fn check_session(&mut self) {
    match self.session.initialize().await {
      Ok(()) if self.session.is_authenticated() => {
        self.login_notice = None;
        self.screen = Screen::Home;
      }
      Ok(()) => {
        self.login_notice = Some(
          "Not signed in yet. Open the URL above in a browser, then press \
           Enter."
            .to_string(),
        );
      }
      Err(e) => self.login_notice = Some(e.to_string()),
    }
  }

  /// Switch screens, triggering the page's initial load on first visit
  /// (each page fetches on mount, like the original views).
  async fn switch_to(&mut self, screen: Screen) {
    self.screen = screen;
    match screen {
      Screen::Feedback if *self.feedback.phase() == Phase::Idle => {
        self.feedback.load().await;
      }
      Screen::Filter if *self.filter.controller.phase() == Phase::Idle => {
        self.filter.controller.load().await;
      }
      Screen::Improvements
        if *self.improvements.controller.phase() == Phase::Idle =>
      {
        self.improvements.controller.load().await;
      }
      _ => {}
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('c')
    {
      return Ok(false);
    }

    if self.screen == Screen::Login {
      return Ok(self.handle_login_key(key).await);
    }

    // Screen handlers run first; they consume keys for text entry, modals,
    // and their own navigation.
    let consumed = match self.screen {
      Screen::Login => false,
      Screen::Home => self.home.handle_key(key).await,
      Screen::Feedback => self.handle_feedback_key(key).await,
      Screen::Filter => self.filter.handle_key(key).await,
      Screen::Improvements => self.improvements.handle_key(key).await,
    };
    if consumed {
      return Ok(true);
    }

    // Global: logout, quit, and screen switching.
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('l')
    {
      self.logout().await;
      return Ok(true);
    }
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Char('1') => self.switch_to(Screen::Home).await,
      KeyCode::Char('2') => self.switch_to(Screen::Feedback).await,
      KeyCode::Char('3') => self.switch_to(Screen::Filter).await,
      KeyCode::Char('4') => self.switch_to(Screen::Improvements).await,
      _ => {}
    }
    Ok(true)
  }

  async fn handle_login_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Enter | KeyCode::Char('r') => self.check_session().await,
      _ => {}
    }
    true
  }

  async fn handle_feedback_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.feedback.records().len();
        if len > 0 && self.feedback_cursor + 1 < len {
          self.feedback_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.feedback_cursor = self.feedback_cursor.saturating_sub(1);
      }
      KeyCode::Char('r') => {
        self.feedback.load().await;
        self.feedback_cursor = 0;
      }
      _ => return false,
    }
    true
  }

  async fn logout(&mut self) {
    match self.session.teardown().await {
      Ok(()) => {
        self.login_notice = None;
        self.screen = Screen::Login;
      }
      Err(e) => {
        tracing::warn!(error = %e, "logout failed");
        self.login_notice = Some(e.to_string());
        // The local session is gone either way; fall back to the guard.
        self.screen = Screen::Login;
      }
    }
  }
}
