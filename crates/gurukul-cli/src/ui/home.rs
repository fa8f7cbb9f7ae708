//! Home pane — hero strip, house cards, and the quick-submit form.

use gurukul_core::record::House;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::{
  app::App,
  screens::home::HomeField,
  ui::widgets::{field_line, house_color, stars},
};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(4), // hero
      Constraint::Length(3), // house cards
      Constraint::Min(0),    // submit form
    ])
    .split(area);

  draw_hero(f, rows[0]);
  draw_houses(f, rows[1]);
  draw_form(f, rows[2], app);
}

fn draw_hero(f: &mut Frame, area: Rect) {
  let lines = vec![
    Line::from(Span::styled(
      " Students Reflection Tracking",
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(
      " Track, manage, and analyze student feedback and reflections across \
       all houses.",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Paragraph::new(lines), area);
}

fn draw_houses(f: &mut Frame, area: Rect) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 3); 3])
    .split(area);

  for (house, col) in House::ALL.into_iter().zip(cols.iter()) {
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(house_color(house)));
    let inner = block.inner(*col);
    f.render_widget(block, *col);
    f.render_widget(
      Paragraph::new(Line::from(vec![
        Span::styled(
          format!(" {house} "),
          Style::default()
            .fg(house_color(house))
            .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
          format!("— {}", house.motto()),
          Style::default().fg(Color::DarkGray),
        ),
      ])),
      inner,
    );
  }
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
  let form = &app.home;

  let block = Block::default()
    .title(" Quick Submit Feedback ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let focused = |field: HomeField| form.focus == field;
  let typing = |field: HomeField| focused(field) && form.editing;

  let submit_label = if form.submitting {
    "Submitting…"
  } else {
    "[ Submit Reflection ]"
  };
  let submit_style = if focused(HomeField::Submit) {
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Cyan)
  };

  let lines = vec![
    field_line(
      "Student Name",
      form.draft.student_name.clone(),
      focused(HomeField::Name),
      typing(HomeField::Name),
    ),
    field_line(
      "House",
      format!("◂ {} ▸", form.draft.house),
      focused(HomeField::House),
      false,
    ),
    field_line(
      "Rating",
      format!("◂ {} ▸", stars(form.draft.rating)),
      focused(HomeField::Rating),
      false,
    ),
    field_line(
      "Comment",
      form.draft.comment.clone(),
      focused(HomeField::Comment),
      typing(HomeField::Comment),
    ),
    Line::from(""),
    Line::from(vec![
      Span::raw("  "),
      Span::styled(submit_label, submit_style),
    ]),
  ];

  f.render_widget(Paragraph::new(lines), inner);
}
