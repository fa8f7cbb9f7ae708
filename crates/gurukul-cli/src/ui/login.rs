//! Login view — shown whenever the route guard finds no user.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::{app::App, ui::widgets::centered_rect};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rect = centered_rect(area, 64, 16);

  let block = Block::default()
    .title(" Sign in ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(rect);
  f.render_widget(block, rect);

  let muted = Style::default().fg(Color::DarkGray);
  let mut lines = vec![
    Line::from(Span::styled(
      "Student Reflection Tracking",
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(
      "Track student progress and reflections across houses",
      muted,
    )),
    Line::from(""),
    Line::from("Sign in with your Google account to continue:"),
    Line::from(Span::styled(
      format!("  {}", app.session.login_url()),
      Style::default().fg(Color::Yellow),
    )),
    Line::from(""),
    Line::from(Span::styled("  • Track students across 3 houses", muted)),
    Line::from(Span::styled("  • Filter and edit feedback", muted)),
    Line::from(Span::styled("  • Submit improvements", muted)),
    Line::from(""),
    Line::from(Span::styled(
      "Open the URL in a browser, sign in, then press Enter.",
      muted,
    )),
  ];

  if let Some(notice) = &app.login_notice {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      notice.clone(),
      Style::default().fg(Color::Red),
    )));
  }

  f.render_widget(Paragraph::new(lines), inner);
}
