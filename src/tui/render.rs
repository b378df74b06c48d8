use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::cli::output::task_line;
use crate::model::task::Status;

use super::app::{App, Mode};

/// Main render function: header | task list | status row
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),    // task list
            Constraint::Length(1), // status row
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_status_row(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible().len();
    let total = app.repo.len();
    let name = if app.name.is_empty() {
        "punchlist"
    } else {
        app.name.as_str()
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("filter: {}", app.filter.label()),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if !app.query.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("query: \"{}\"", app.query),
            Style::default().fg(Color::Cyan),
        ));
    }
    spans.push(Span::styled(
        format!("  {}/{} tasks", visible, total),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible();
    if visible.is_empty() {
        let hint = if app.repo.is_empty() {
            "no tasks yet (press a to add one)"
        } else {
            "no tasks match the current query and filter"
        };
        let line = Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    // Keep the cursor row on screen
    let height = area.height as usize;
    let scroll = app.cursor.saturating_sub(height.saturating_sub(1));

    let lines: Vec<Line> = visible
        .iter()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(i, task)| {
            let selected = i == app.cursor;
            let mut style = match task.status {
                Status::Done => Style::default().fg(Color::DarkGray),
                Status::Doing => Style::default().fg(Color::Yellow),
                Status::Todo => Style::default(),
            };
            if selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let marker = if selected { "▸ " } else { "  " };
            Line::from(Span::styled(format!("{}{}", marker, task_line(task)), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.mode {
        Mode::Search => prompt_line(format!("/{}", app.search_input), "Enter apply  Esc cancel"),
        Mode::Add => prompt_line(format!("add: {}", app.add_input), "Enter add  Esc cancel"),
        Mode::ConfirmDelete => {
            let title = app
                .pending_delete
                .as_deref()
                .and_then(|id| app.repo.get(id))
                .map(|t| t.title.as_str())
                .unwrap_or("?");
            Line::from(Span::styled(
                format!("delete \"{}\"? [y/n]", title),
                Style::default().fg(Color::Red),
            ))
        }
        Mode::Navigate => match &app.notice {
            Some(text) => Line::from(Span::styled(
                text.clone(),
                Style::default().fg(Color::Green),
            )),
            None => Line::from(Span::styled(
                "a add  / search  f filter  space toggle  d delete  u undo  q quit",
                Style::default().fg(Color::DarkGray),
            )),
        },
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn prompt_line(input: String, hint: &str) -> Line<'_> {
    Line::from(vec![
        Span::raw(input),
        Span::styled("\u{258C}", Style::default().fg(Color::Cyan)), // ▌ cursor
        Span::raw("  "),
        Span::styled(hint.to_string(), Style::default().fg(Color::DarkGray)),
    ])
}
