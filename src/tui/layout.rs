use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::TuiApp;

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Module list
            Constraint::Length(9), // Detail pane
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_list_pane(frame, app, chunks[0]);
    render_detail_pane(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_list_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let items: Vec<ListItem> = app
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let owned_marker = if entry.owned { "✓" } else { " " };
            let featured_marker = if entry.featured { "★" } else { " " };
            let date = entry.published_at.format("%m/%d").to_string();
            let content = format!(
                "{} {} {} {}",
                owned_marker,
                featured_marker,
                date,
                entry.display_title()
            );

            let base_style = if entry.owned {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };

            let style = if i == app.index {
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                base_style
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let title = format!(" Modules ({}) ", app.entries.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(List::new(items).block(block), area);
}

fn render_detail_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let content = if let Some(entry) = app.selected_entry() {
        let mut lines = Vec::new();

        lines.push(Line::from(Span::styled(
            entry.display_title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("Date: {}", entry.published_at.format("%Y-%m-%d %H:%M")),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(Span::styled(
            format!("Filename: {}", entry.filename),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(Span::styled(
            format!("Module id: {}", entry.module_id),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(Span::styled(
            format!("Page: {}", entry.page_url),
            Style::default().fg(Color::Blue),
        )));
        lines.push(Line::from(Span::styled(
            format!("Stream: {}", entry.stream_url),
            Style::default().fg(Color::Blue),
        )));
        if entry.owned {
            lines.push(Line::from(Span::styled(
                "Already downloaded",
                Style::default().fg(Color::Green),
            )));
        }

        Text::from(lines)
    } else {
        Text::from("No entry selected")
    };

    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(content).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = if app.is_downloading {
        "Downloading...".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        "j/k:Navigate  Enter:Download  s:Stream  o:Page  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}
