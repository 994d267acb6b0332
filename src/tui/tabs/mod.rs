pub mod help;
pub mod logs;
pub mod rules;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::notify::{Notification, NotificationKind};
use crate::tui::app::{BackendStatus, TAB_TITLES};

pub fn render_tab_bar(f: &mut Frame, area: Rect, selected: usize, status: &BackendStatus) {
    let status_span = match status {
        BackendStatus::Connected => Span::styled("● Connected", Style::default().fg(Color::Green)),
        BackendStatus::Loading => Span::styled("● Loading...", Style::default().fg(Color::Yellow)),
        BackendStatus::Failing(_) => Span::styled("● Unreachable", Style::default().fg(Color::Red)),
    };
    let title = Line::from(vec![Span::raw("rule-console "), status_span]);

    let tabs = Tabs::new(
        TAB_TITLES
            .iter()
            .map(|t| Line::from(vec![Span::raw(*t)]))
            .collect::<Vec<_>>(),
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .select(selected)
    .style(Style::default().fg(Color::White))
    .highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    f.render_widget(tabs, area);
}

/// The single transient banner at the bottom of the screen.
pub fn render_banner(f: &mut Frame, area: Rect, notification: &Notification) {
    let (title, color) = match notification.kind {
        NotificationKind::Success => ("Info", Color::Green),
        NotificationKind::Error => ("Error", Color::Red),
        NotificationKind::NewLog => ("Warning", Color::Yellow),
    };

    let hint = if notification.kind.auto_hides() {
        ""
    } else {
        "  [x] dismiss"
    };

    let banner = Paragraph::new(Line::from(vec![
        Span::styled(notification.message.as_str(), Style::default().fg(color)),
        Span::styled(hint, Style::default().fg(Color::Gray)),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );

    f.render_widget(banner, area);
}
