use ratatui::{prelude::*, widgets::*};

use crate::app::form::Form;
use crate::app::notification::NotificationKind;
use crate::models::ProposalStatus;

/// Renders a form as one bordered input per field, returning where the
/// cursor should go when the selected field is being edited
pub fn render_form(
    f: &mut Frame,
    form: &Form,
    area: Rect,
    is_focused: bool,
    is_editing: bool,
) -> Option<Position> {
    let constraints: Vec<Constraint> = form.fields.iter().map(|_| Constraint::Length(3)).collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut cursor = None;
    for (i, (field, row)) in form.fields.iter().zip(rows.iter()).enumerate() {
        let selected = is_focused && i == form.selected;
        let border_style = if selected && is_editing {
            Style::default().fg(Color::Yellow)
        } else if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let text = if field.masked {
            "*".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", field.label));
        f.render_widget(Paragraph::new(text).block(block), *row);

        if selected && is_editing {
            let max_x = row.x + row.width.saturating_sub(2);
            let cursor_x = (row.x + form.cursor_column() as u16 + 1).min(max_x);
            cursor = Some(Position::new(cursor_x, row.y + 1));
        }
    }
    cursor
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// A single labelled figure for the stats row
pub fn stat_card<'a>(label: &'a str, value: String, loading: bool) -> Paragraph<'a> {
    let value_style = if loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).bold()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(format!(" {} ", label));

    Paragraph::new(Line::from(Span::styled(value, value_style)))
        .alignment(Alignment::Center)
        .block(block)
}

/// Toast color
pub fn notification_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
        NotificationKind::Info => Color::Cyan,
        NotificationKind::Warning => Color::Yellow,
    }
}

/// Proposal status color
pub fn proposal_status_color(status: ProposalStatus) -> Color {
    match status {
        ProposalStatus::Voting => Color::Yellow,
        ProposalStatus::Passed => Color::Green,
        ProposalStatus::Rejected => Color::Red,
        ProposalStatus::Failed => Color::DarkGray,
    }
}

/// Block fill bar color
pub fn fill_color(percent: u16) -> Color {
    match percent {
        0..=49 => Color::Green,
        50..=79 => Color::Yellow,
        _ => Color::Red,
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Top-right corner box for the notification toast, clamped to `r`
pub fn toast_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + r.width - width,
        y: r.y,
        width,
        height,
    }
}
