//! Filter pane — filter bar, results list, edit modal, delete confirmation.

use gurukul_core::controller::Phase;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
  app::App,
  screens::filter::{EditField, FilterField, FilterZone},
  ui::{
    feedback::card_lines,
    widgets::{centered_rect, draw_confirm, field_line, stars},
  },
};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let screen = &app.filter;

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(7), // filter bar
      Constraint::Min(0),    // results
    ])
    .split(area);

  draw_filter_bar(f, rows[0], app);
  draw_results(f, rows[1], app);

  if screen.controller.editing_id().is_some() {
    draw_edit_modal(f, area, app);
  }
  if screen.controller.pending_remove().is_some() {
    draw_confirm(f, area, "Are you sure you want to delete this feedback?");
  }
}

// ─── Filter bar ───────────────────────────────────────────────────────────────

fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
  let screen = &app.filter;

  let block = Block::default()
    .title(" Filter Feedback ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let focused = |field: FilterField| {
    matches!(screen.zone, FilterZone::Filters(current) if current == field)
  };
  let typing = |field: FilterField| focused(field) && screen.editing_field;

  let house_value = screen
    .house
    .map(|h| h.to_string())
    .unwrap_or_else(|| "All Houses".to_string());
  let rating_value = screen
    .rating
    .map(|r| stars(r))
    .unwrap_or_else(|| "All Ratings".to_string());

  let lines = vec![
    field_line(
      "Student Name",
      screen.name_input.value().to_string(),
      focused(FilterField::Name),
      typing(FilterField::Name),
    ),
    field_line(
      "House",
      format!("◂ {house_value} ▸"),
      focused(FilterField::House),
      false,
    ),
    field_line(
      "Rating",
      format!("◂ {rating_value} ▸"),
      focused(FilterField::Rating),
      false,
    ),
    field_line(
      "Start Date",
      screen.start_input.value().to_string(),
      focused(FilterField::Start),
      typing(FilterField::Start),
    ),
    field_line(
      "End Date",
      screen.end_input.value().to_string(),
      focused(FilterField::End),
      typing(FilterField::End),
    ),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

// ─── Results ──────────────────────────────────────────────────────────────────

fn draw_results(f: &mut Frame, area: Rect, app: &App) {
  let screen = &app.filter;
  let visible = screen.visible();

  let title = format!(" Results ({}) ", visible.len());
  let border = if screen.zone == FilterZone::Results {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(border);
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

  if visible.is_empty() {
    f.render_widget(
      Paragraph::new("No feedback matches your filters")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let selected_id = screen.controller.selected_id();
  let items: Vec<ListItem> = visible
    .iter()
    .map(|r| {
      let mut lines = card_lines(r);
      // Click-to-reveal: the selected card exposes its action row.
      if selected_id == Some(r.id.as_str()) {
        lines.insert(
          lines.len() - 1,
          Line::from(Span::styled(
            "  [e] edit   [d] delete",
            Style::default()
              .fg(Color::Yellow)
              .add_modifier(Modifier::BOLD),
          )),
        );
      }
      ListItem::new(lines)
    })
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

// ─── Edit modal ───────────────────────────────────────────────────────────────

fn draw_edit_modal(f: &mut Frame, area: Rect, app: &App) {
  let screen = &app.filter;
  let Some(draft) = screen.controller.draft() else {
    return;
  };

  let rect = centered_rect(area, 56, 10);
  f.render_widget(Clear, rect);

  let block = Block::default()
    .title(" Edit Feedback ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(rect);
  f.render_widget(block, rect);

  let focused = |field: EditField| screen.edit_focus == field;
  let typing = |field: EditField| focused(field) && screen.edit_typing;

  let lines = vec![
    field_line(
      "Student Name",
      draft.student_name.clone(),
      focused(EditField::Name),
      typing(EditField::Name),
    ),
    field_line(
      "House",
      format!("◂ {} ▸", draft.house),
      focused(EditField::House),
      false,
    ),
    field_line(
      "Rating",
      format!("◂ {} ▸", stars(draft.rating)),
      focused(EditField::Rating),
      false,
    ),
    field_line(
      "Comment",
      draft.comment.clone(),
      focused(EditField::Comment),
      typing(EditField::Comment),
    ),
    Line::from(""),
    Line::from(Span::styled(
      "  [s] save   [Esc] cancel",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}
