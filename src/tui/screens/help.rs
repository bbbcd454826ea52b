//! Help screen — keybinding reference.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// A keybinding row: key, description.
const BINDINGS: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "Next / previous field"),
    ("Alt+p / Shift+Alt+P", "Cycle province forward / backward"),
    ("Alt+c / Shift+Alt+C", "Cycle country forward / backward"),
    ("Enter", "Save the profile"),
    ("F2", "View saved profiles"),
    ("F1", "This help"),
    ("Esc", "Quit (from the form) or go back"),
];

/// Renders the help screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_help(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];
    for (key, desc) in BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {key:<22}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(*desc),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Name, email, phone, and a PNG profile picture are required.",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "  Press Esc or q to close this screen.",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
