//! Status bar widget — persistent one-line store summary.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Data passed to the status bar widget; decoupled from the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Number of profiles currently persisted.
    pub profile_count: usize,
    /// Name of the most recently saved profile this session, if any.
    pub last_saved: Option<String>,
}

/// Renders a one-line status bar with the saved-record count and, when set,
/// the last saved name in green.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let green = Style::default().fg(Color::Green);

    let count_label = if ctx.profile_count == 1 {
        "1 profile saved".to_string()
    } else {
        format!("{} profiles saved", ctx.profile_count)
    };

    let mut spans: Vec<Span> = vec![Span::styled(count_label, cyan)];
    if let Some(name) = &ctx.last_saved {
        spans.push(Span::styled("  ", cyan));
        spans.push(Span::styled(format!("last: {name}"), green));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
