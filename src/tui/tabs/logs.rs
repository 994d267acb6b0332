use crate::logs::LogState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, state: &LogState, scroll_offset: usize) {
    let mut items: Vec<ListItem> = Vec::new();

    if let Some(ref error) = state.last_error {
        items.push(ListItem::new(Line::from(vec![
            Span::styled("fetch failed: ", Style::default().fg(Color::Red)),
            Span::raw(error.as_str()),
        ])));
    }

    items.extend(
        state
            .entries
            .iter()
            .skip(scroll_offset)
            .take((area.height as usize).saturating_sub(2))
            .map(|entry| {
                let color = if entry.message_text().is_empty() {
                    Color::Gray
                } else {
                    Color::White
                };
                ListItem::new(Line::from(Span::styled(
                    entry.render_line(),
                    Style::default().fg(color),
                )))
            }),
    );

    let updated = state
        .last_update
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let title = format!(
        "Logs ({} entries, updated {}, scroll: {}) - [↑/↓] to scroll",
        state.entries.len(),
        updated,
        scroll_offset
    );

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(list, area);
}
