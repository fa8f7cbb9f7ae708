//! Small rendering helpers shared by the panes.

use chrono::{DateTime, Utc};
use gurukul_core::record::House;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

/// Five-star rating string, e.g. `★★★☆☆`.
pub fn stars(rating: u8) -> String {
  (1..=5)
    .map(|i| if i <= rating { '★' } else { '☆' })
    .collect()
}

/// Timestamp in the short form the cards show.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
  ts.format("%b %-d, %Y %H:%M").to_string()
}

pub fn house_color(house: House) -> Color {
  match house {
    House::Bhairav => Color::Red,
    House::Bhageshree => Color::Magenta,
    House::Megh => Color::Blue,
  }
}

/// `House` badge span, or a muted placeholder for house-less records.
pub fn house_badge(house: Option<House>) -> Span<'static> {
  match house {
    Some(h) => Span::styled(
      format!(" {h} "),
      Style::default()
        .fg(Color::White)
        .bg(house_color(h))
        .add_modifier(Modifier::BOLD),
    ),
    None => Span::styled(" No House ", Style::default().fg(Color::DarkGray)),
  }
}

/// A `label: value` form line with focus/typing markers.
pub fn field_line<'a>(
  label: &'a str,
  value: String,
  focused: bool,
  typing: bool,
) -> Line<'a> {
  let marker = if focused { "▸ " } else { "  " };
  let label_style = if focused {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Gray)
  };
  let shown = if typing { format!("{value}_") } else { value };
  Line::from(vec![
    Span::raw(marker),
    Span::styled(format!("{label:<14}"), label_style),
    Span::raw(shown),
  ])
}

/// A centered `width`×`height` rectangle inside `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
  let w = width.min(area.width);
  let h = height.min(area.height);
  Rect {
    x: area.x + (area.width - w) / 2,
    y: area.y + (area.height - h) / 2,
    width: w,
    height: h,
  }
}

/// Yes/no confirmation dialog, drawn over whatever is beneath it.
pub fn draw_confirm(f: &mut Frame, area: Rect, question: &str) {
  let rect = centered_rect(area, (question.len() as u16 + 6).max(30), 5);
  f.render_widget(Clear, rect);

  let block = Block::default()
    .title(" Confirm ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));
  let inner = block.inner(rect);
  f.render_widget(block, rect);

  let lines = vec![
    Line::from(question.to_string()),
    Line::from(Span::styled(
      "[y] yes   [n] no",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
  use super::stars;

  #[test]
  fn stars_fill_up_to_the_rating() {
    assert_eq!(stars(5), "★★★★★");
    assert_eq!(stars(3), "★★★☆☆");
    assert_eq!(stars(1), "★☆☆☆☆");
  }
}
