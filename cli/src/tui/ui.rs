use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Wrap},
    Frame,
};
use taskline_core::{Priority, SortDirection, Status, Task};

use crate::tui::app::{App, InputMode, Route};
use crate::tui::form::{FormField, TaskForm};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let title = if app.store.is_loading() {
        "TASKLINE (loading...)"
    } else {
        "TASKLINE"
    };
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    match app.route {
        Route::List => draw_list_route(f, app, main_chunks[1]),
        Route::Detail(_) => draw_detail_route(f, app, main_chunks[1]),
        Route::Edit => draw_edit_route(f, app, main_chunks[1]),
        Route::NotFound => draw_not_found(f, main_chunks[1]),
    }

    let footer = Paragraph::new(footer_text(app))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);
}

fn footer_text(app: &App) -> &'static str {
    match app.route {
        Route::List => match app.input_mode {
            InputMode::Search => "type to search | Enter/Esc: done",
            _ => "j/k: move | Enter: detail | a: add | e: edit | d: delete | Space: status | /: search | s/p/o/O: filters | c: clear | x: dismiss error | q: quit",
        },
        Route::Detail(_) => "1/2/3: set status | e: edit | Esc: back | q: quit",
        Route::Edit => "Tab: next field | Left/Right: change value | Enter: save | Esc: cancel",
        Route::NotFound => "Esc: back to tasks | q: quit",
    }
}

fn draw_list_route(f: &mut Frame, app: &mut App, area: Rect) {
    let mut constraints = vec![
        Constraint::Length(3), // Filter bar
        Constraint::Min(1),    // Table + detail
    ];
    let has_error = app.store.error().is_some();
    if has_error {
        constraints.insert(0, Constraint::Length(1));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    if has_error {
        draw_error_banner(f, app, chunks[next]);
        next += 1;
    }
    draw_filter_bar(f, app, chunks[next]);
    draw_content(f, app, chunks[next + 1]);
}

fn draw_error_banner(f: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = app.store.error() {
        let banner = Paragraph::new(format!(" {} (press x to dismiss)", message))
            .style(Style::default().fg(Color::White).bg(Color::Red));
        f.render_widget(banner, area);
    }
}

fn draw_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let criteria = &app.criteria;
    let status = criteria.status.map(|s| s.label()).unwrap_or("All");
    let priority = criteria.priority.map(|p| p.label()).unwrap_or("All");
    let arrow = match criteria.sort_direction {
        SortDirection::Ascending => "↑",
        SortDirection::Descending => "↓",
    };

    let mut spans = vec![
        Span::styled("Status: ", Style::default().fg(Color::Blue)),
        Span::raw(status),
        Span::raw("  "),
        Span::styled("Priority: ", Style::default().fg(Color::Blue)),
        Span::raw(priority),
        Span::raw("  "),
        Span::styled("Sort: ", Style::default().fg(Color::Blue)),
        Span::raw(format!("{} {}", criteria.sort_key.label(), arrow)),
        Span::raw("  "),
        Span::styled("Search: ", Style::default().fg(Color::Blue)),
    ];
    if matches!(app.input_mode, InputMode::Search) {
        spans.push(Span::styled(
            format!("{}_", criteria.search_term),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    } else if criteria.search_term.is_empty() {
        spans.push(Span::styled("-", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(criteria.search_term.clone()));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Filters ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(bar, area);
}

fn draw_content(f: &mut Frame, app: &mut App, area: Rect) {
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_task_table(f, app, content_chunks[0]);
    draw_preview(f, app, content_chunks[1]);
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
    }
}

fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Completed => "✔",
        Status::InProgress => "◐",
        Status::NotStarted => "☐",
    }
}

fn draw_task_table(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app
        .visible
        .iter()
        .map(|task| {
            let pri_str = match task.priority {
                Priority::High => "H",
                Priority::Medium => "M",
                Priority::Low => "L",
            };
            let due_str = task.due_date.format("%m-%d").to_string();

            Row::new(vec![
                Span::styled(status_icon(task.status), Style::default()),
                Span::styled(pri_str, priority_style(task.priority)),
                Span::raw(due_str),
                Span::styled(task.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    let count_title = format!(" Tasks ({}) ", app.visible.len());
    let table = Table::new(
        rows,
        [
            Constraint::Length(3), // Status
            Constraint::Length(3), // Priority
            Constraint::Length(6), // Due
            Constraint::Min(10),   // Title
        ],
    )
    .header(Row::new(vec!["St", "Pr", "Due", "Task"]).style(Style::default().fg(Color::Yellow)))
    .block(
        Block::default()
            .title(count_title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.table);
}

fn draw_preview(f: &mut Frame, app: &App, area: Rect) {
    if let Some(task) = app.selected_task() {
        let text = task_lines(task);
        let preview = Paragraph::new(text)
            .block(
                Block::default()
                    .title(" Preview ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(preview, area);
    } else {
        let empty = Paragraph::new("No tasks match the current filters.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title(" Preview ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );
        f.render_widget(empty, area);
    }
}

fn task_lines(task: &Task) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Title: ", Style::default().fg(Color::Blue)),
            Span::styled(&task.title, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(task.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Blue)),
            Span::raw(task.status.label()),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", Style::default().fg(Color::Blue)),
            Span::styled(task.priority.label(), priority_style(task.priority)),
        ]),
        Line::from(vec![
            Span::styled("Due: ", Style::default().fg(Color::Blue)),
            Span::raw(task.due_date.format("%Y-%m-%d").to_string()),
        ]),
        Line::from(vec![
            Span::styled("Created: ", Style::default().fg(Color::Blue)),
            Span::raw(task.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]),
        Line::from(vec![
            Span::styled("Updated: ", Style::default().fg(Color::Blue)),
            Span::raw(task.updated_at.format("%Y-%m-%d %H:%M").to_string()),
        ]),
        Line::from(""),
    ];

    if !task.description.is_empty() {
        lines.push(Line::from(Span::styled(
            "Description:",
            Style::default().fg(Color::Blue),
        )));
        lines.push(Line::from(task.description.as_str()));
    }

    lines
}

fn draw_detail_route(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    draw_error_banner(f, app, chunks[0]);

    if let Some(task) = &app.detail {
        let mut lines = task_lines(task);
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Set status: ", Style::default().fg(Color::Blue)),
            Span::raw("1: Not Started  2: In Progress  3: Completed"),
        ]));
        let detail = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Task Detail ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(detail, chunks[1]);
    } else {
        let loading = Paragraph::new("Loading task details...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(loading, chunks[1]);
    }
}

fn draw_edit_route(f: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let title = if form.is_edit() { " Edit Task " } else { " Create New Task " };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::new();
    push_form_field(&mut lines, form, FormField::Title, &form.title);
    push_form_field(&mut lines, form, FormField::Description, &form.description);
    push_form_field(&mut lines, form, FormField::Status, form.status.label());
    push_form_field(&mut lines, form, FormField::Priority, form.priority.label());
    push_form_field(&mut lines, form, FormField::DueDate, &form.due_input);

    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(body, inner);
}

fn push_form_field<'a>(lines: &mut Vec<Line<'a>>, form: &'a TaskForm, field: FormField, value: &'a str) {
    let focused = form.focus == field;
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue)
    };
    let marker = if focused { "> " } else { "  " };

    let mut value_span = Span::raw(value.to_string());
    if focused {
        value_span = Span::styled(format!("{}_", value), Style::default().add_modifier(Modifier::BOLD));
    }

    lines.push(Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{:<12}", field.label()), label_style),
        value_span,
    ]));

    if let Some(message) = form.error_for(field) {
        lines.push(Line::from(Span::styled(
            format!("    {}", message),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
}

fn draw_not_found(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Task Not Found",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("The task you're looking for doesn't exist."),
    ];
    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(body, area);
}
