//! Feedback pane — the read-only reflection list.

use gurukul_core::{controller::Phase, record::FeedbackRecord};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
  app::App,
  ui::widgets::{format_timestamp, house_badge, stars},
};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let controller = &app.feedback;
  let title = format!(" Recent Feedback ({}) ", controller.records().len());

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  // Load failures replace the list region with a persistent inline error.
  match controller.phase() {
    Phase::Idle | Phase::Loading => {
      f.render_widget(
        Paragraph::new("Loading…").style(Style::default().fg(Color::DarkGray)),
        inner,
      );
      return;
    }
    Phase::Error { detail } => {
      f.render_widget(
        Paragraph::new(detail.clone()).style(Style::default().fg(Color::Red)),
        inner,
      );
      return;
    }
    Phase::Ready => {}
  }

  if controller.records().is_empty() {
    f.render_widget(
      Paragraph::new("No feedback yet")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = controller
    .records()
    .iter()
    .map(|r| ListItem::new(card_lines(r)))
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.feedback_cursor));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(Style::default().bg(Color::Rgb(30, 30, 46)))
      .highlight_symbol(""),
    inner,
    &mut state,
  );
}

/// One feedback card: name + stars, badge + date, comment, spacer.
pub fn card_lines(record: &FeedbackRecord) -> Vec<Line<'static>> {
  vec![
    Line::from(vec![
      Span::styled(
        record.display_name().to_string(),
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
      Span::raw("  "),
      Span::styled(
        stars(record.rating),
        Style::default().fg(Color::Yellow),
      ),
    ]),
    Line::from(vec![
      house_badge(record.house),
      Span::styled(
        format!("  {}", format_timestamp(&record.timestamp)),
        Style::default().fg(Color::DarkGray),
      ),
    ]),
    Line::from(record.display_comment().to_string()),
    Line::from(""),
  ]
}
