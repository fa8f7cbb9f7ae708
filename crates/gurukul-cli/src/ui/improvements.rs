//! Improvements pane — stats, add/edit form, and the report list.

use gurukul_core::{controller::Phase, record::ImprovementRecord};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
  app::App,
  screens::improvements::ImprovementField,
  ui::widgets::{draw_confirm, field_line, format_timestamp},
};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let screen = &app.improvements;

  let form_height = if screen.form_active() { 7 } else { 0 };
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1),           // stats line
      Constraint::Length(form_height), // add/edit form
      Constraint::Min(0),              // list
    ])
    .split(area);

  draw_stats(f, rows[0], app);
  if screen.form_active() {
    draw_form(f, rows[1], app);
  }
  draw_list(f, rows[2], app);

  if screen.controller.pending_remove().is_some() {
    draw_confirm(f, area, "Are you sure you want to delete this improvement?");
  }
}

fn draw_stats(f: &mut Frame, area: Rect, app: &App) {
  let total = app.improvements.controller.records().len();
  f.render_widget(
    Paragraph::new(Line::from(vec![
      Span::styled(
        format!(" {total} "),
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        "total improvements   [a] add",
        Style::default().fg(Color::DarkGray),
      ),
    ])),
    area,
  );
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
  let screen = &app.improvements;
  let Some(draft) = screen.active_draft() else {
    return;
  };

  let editing = screen.controller.editing_id().is_some();
  let title = if editing {
    " Edit Improvement "
  } else {
    " Add New Improvement "
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let focused = |field: ImprovementField| screen.focus == field;
  let typing = |field: ImprovementField| focused(field) && screen.typing;

  let submit_label = if editing { "[ Update ]" } else { "[ Submit ]" };
  let submit_style = if focused(ImprovementField::Submit) {
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Cyan)
  };

  let lines = vec![
    field_line(
      "Submitted By",
      draft.submitted_by.clone(),
      focused(ImprovementField::SubmittedBy),
      typing(ImprovementField::SubmittedBy),
    ),
    field_line(
      "Problem",
      draft.problem.clone(),
      focused(ImprovementField::Problem),
      typing(ImprovementField::Problem),
    ),
    field_line(
      "Solution",
      draft.solution.clone(),
      focused(ImprovementField::Solution),
      typing(ImprovementField::Solution),
    ),
    Line::from(""),
    Line::from(vec![
      Span::raw("  "),
      Span::styled(submit_label, submit_style),
      Span::styled("   [Esc] cancel", Style::default().fg(Color::DarkGray)),
    ]),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_list(f: &mut Frame, area: Rect, app: &App) {
  let screen = &app.improvements;

  let block = Block::default()
    .title(" Improvements ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  match screen.controller.phase() {
    Phase::Idle | Phase::Loading => {
      f.render_widget(
        Paragraph::new("Loading…").style(Style::default().fg(Color::DarkGray)),
        inner,
      );
      return;
    }
    Phase::Error { detail } => {
      f.render_widget(
        Paragraph::new(format!("Error: {detail}"))
          .style(Style::default().fg(Color::Red)),
        inner,
      );
      return;
    }
    Phase::Ready => {}
  }

  if screen.controller.records().is_empty() {
    f.render_widget(
      Paragraph::new("No improvements submitted yet. Be the first!")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = screen
    .controller
    .records()
    .iter()
    .map(card_lines)
    .map(ListItem::new)
    .collect();

  let mut state = ListState::default();
  state.select(Some(screen.cursor));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(Style::default().bg(Color::Rgb(30, 30, 46)))
      .highlight_symbol(""),
    inner,
    &mut state,
  );
}

fn card_lines(record: &ImprovementRecord) -> Vec<Line<'static>> {
  vec![
    Line::from(vec![
      Span::styled(
        "💡 Improvement ",
        Style::default()
          .fg(Color::Magenta)
          .add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        format!(
          "by {}  {}",
          record.submitted_by,
          format_timestamp(&record.timestamp)
        ),
        Style::default().fg(Color::DarkGray),
      ),
    ]),
    Line::from(vec![
      Span::styled("Problem:  ", Style::default().fg(Color::Red)),
      Span::raw(record.problem.clone()),
    ]),
    Line::from(vec![
      Span::styled("Solution: ", Style::default().fg(Color::Green)),
      Span::raw(record.solution.clone()),
    ]),
    Line::from(""),
  ]
}
