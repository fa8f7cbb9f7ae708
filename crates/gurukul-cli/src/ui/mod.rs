//! TUI rendering — orchestrates all panes.

pub mod feedback;
pub mod filter;
pub mod home;
pub mod improvements;
pub mod login;
pub mod widgets;

use chrono::Local;
use gurukul_core::controller::{Banner, BannerKind};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::{
  app::{App, Screen},
  screens::FilterZone,
};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // The route guard: without a user, only the login view renders.
  if app.screen == Screen::Login {
    login::draw(f, area, app);
    return;
  }

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header / navigation
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Login => {}
    Screen::Home => home::draw(f, rows[1], app),
    Screen::Feedback => feedback::draw(f, rows[1], app),
    Screen::Filter => filter::draw(f, rows[1], app),
    Screen::Improvements => improvements::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let tabs = [
    (Screen::Home, "[1] Home"),
    (Screen::Feedback, "[2] Feedback"),
    (Screen::Filter, "[3] Filter"),
    (Screen::Improvements, "[4] Improvements"),
  ];

  let mut spans = vec![Span::styled(
    " Gurukul ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  for (screen, label) in tabs {
    let style = if app.screen == screen {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(format!(" {label} "), style));
  }
  let left = Line::from(spans);

  let user = app
    .session
    .user()
    .map(|u| u.name.as_str())
    .unwrap_or_default();
  let date = Local::now().format("%Y-%m-%d").to_string();
  let right = format!("{user}  {date} ");

  let left_width: usize = left.width();
  let pad = (area.width as usize)
    .saturating_sub(left_width)
    .saturating_sub(right.len());

  let mut all = left.spans;
  all.push(Span::raw(" ".repeat(pad)));
  all.push(Span::styled(right, Style::default().fg(Color::DarkGray)));

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(all)), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  // An active banner outranks the key hints.
  if let Some(banner) = active_banner(app) {
    let style = match banner.kind {
      BannerKind::Success => Style::default().fg(Color::Black).bg(Color::Green),
      BannerKind::Error => Style::default().fg(Color::White).bg(Color::Red),
    };
    f.render_widget(
      Paragraph::new(format!(" {} ", banner.message)).style(style),
      area,
    );
    return;
  }

  let hints = hints_for(app);
  let line = Line::from(vec![
    Span::styled(
      " NORMAL ",
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {hints}"), Style::default().fg(Color::DarkGray)),
  ]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

fn active_banner(app: &App) -> Option<&Banner> {
  match app.screen {
    Screen::Home => app.home.banner(),
    Screen::Feedback => app.feedback.banner(),
    Screen::Filter => app.filter.controller.banner(),
    Screen::Improvements => app.improvements.controller.banner(),
    Screen::Login => None,
  }
}

fn hints_for(app: &App) -> &'static str {
  match app.screen {
    Screen::Login => "Enter check session  q quit",
    Screen::Home => {
      "↑↓/jk fields  ←→/hl change  Enter edit/submit  1-4 pages  q quit"
    }
    Screen::Feedback => "↑↓/jk scroll  r reload  1-4 pages  q quit",
    Screen::Filter => match app.filter.zone {
      FilterZone::Results => {
        "↑↓/jk move  Enter reveal  e edit  d delete  c clear  r reload  Tab \
         filters  q quit"
      }
      FilterZone::Filters(_) => {
        "Tab/↑↓ fields  Enter type  ←→ change  c clear  r reload  q quit"
      }
    },
    Screen::Improvements => {
      "↑↓/jk move  a add  e edit  d delete  r reload  1-4 pages  q quit"
    }
  }
}
