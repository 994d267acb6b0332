use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn heading(text: &str) -> Line<'_> {
    Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )])
}

fn key<'a>(keys: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", keys), Style::default().fg(Color::Green)),
        Span::raw(action),
    ])
}

pub fn render(f: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(vec![Span::styled(
            "rule-console - Keyboard Shortcuts",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        heading("Navigation"),
        key("Tab / →", "Next tab"),
        key("Shift+Tab / ←", "Previous tab"),
        key("↑ / ↓", "Move cursor or scroll"),
        key("x", "Dismiss the notification"),
        key("q / Esc", "Quit"),
        Line::from(""),
        heading("Rules"),
        key("Space", "Select or deselect the rule under the cursor"),
        key("a", "Select all, or clear when all are selected"),
        key("n", "Add a new rule"),
        key("d / Delete", "Delete the selected rules, then y to confirm"),
        key("r", "Reload the rule list"),
        Line::from(""),
        heading("New Rule dialog"),
        key("Enter", "Submit"),
        key("Esc", "Cancel"),
        key("Space / t / f", "Set log action"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Version: ", Style::default().fg(Color::Gray)),
            Span::raw(format!("rule-console v{}", crate::VERSION)),
        ]),
    ];

    let widget = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title("Help"));

    f.render_widget(widget, area);
}
