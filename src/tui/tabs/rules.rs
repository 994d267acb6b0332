use crate::model::RuleField;
use crate::rules::RuleState;
use crate::tui::form::RuleForm;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, state: &RuleState, cursor: usize) {
    let mut header_cells = vec![Cell::from(""), Cell::from("ID")];
    header_cells.extend(RuleField::FORM_ORDER.iter().map(|field| Cell::from(field.label())));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let visible = area.height.saturating_sub(3) as usize;
    let skip = (cursor + 1).saturating_sub(visible);

    let rows: Vec<Row> = state
        .rules
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible)
        .map(|(i, rule)| {
            let marker = if state.selection.contains(&rule.id) {
                "[x]"
            } else {
                "[ ]"
            };
            let mut cells = vec![Cell::from(marker), Cell::from(rule.id.as_str().to_string())];
            cells.extend(
                RuleField::FORM_ORDER
                    .iter()
                    .map(|field| Cell::from(rule.field_text(*field))),
            );

            let style = if i == cursor {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![Constraint::Length(3), Constraint::Length(8)];
    widths.extend(RuleField::FORM_ORDER.iter().map(|_| Constraint::Min(6)));

    let mut title = format!(
        "Rules ({}, {} selected)",
        state.rules.len(),
        state.selection.len()
    );
    if state.loading {
        title.push_str(" - loading...");
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(table, area);
}

pub fn render_form(f: &mut Frame, area: Rect, form: &RuleForm) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let mut lines: Vec<Line> = RuleField::FORM_ORDER
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let value = match field {
                RuleField::LogAction => match form.draft.log_action {
                    None => "(unset)".to_string(),
                    Some(true) => "true".to_string(),
                    Some(false) => "false".to_string(),
                },
                _ => form.draft.get(*field),
            };
            let label_style = if i == form.selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            Line::from(vec![
                Span::styled(format!("{:<18}", field.label()), label_style),
                Span::raw(value),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(if form.submitting {
        Line::from(Span::styled("Submitting...", Style::default().fg(Color::Yellow)))
    } else {
        Line::from(Span::styled(
            "[Enter] add  [Esc] cancel  [↑/↓] field  [Space] toggle log action",
            Style::default().fg(Color::Gray),
        ))
    });

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("New Rule"));

    f.render_widget(widget, popup);
}

pub fn render_delete_confirm(f: &mut Frame, area: Rect, count: usize) {
    let popup = centered_rect(40, 20, area);
    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from(format!("Delete {} selected rule(s)?", count)),
        Line::from(""),
        Line::from(Span::styled(
            "[y] delete  [n] cancel",
            Style::default().fg(Color::Gray),
        )),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Confirm"),
    );

    f.render_widget(widget, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
