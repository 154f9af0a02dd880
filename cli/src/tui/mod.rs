pub mod app;
pub mod form;
pub mod ui;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use taskline_core::{HttpTaskRepository, Status, TaskStore};

use crate::tui::app::{App, InputMode, Route};

pub async fn run(store: TaskStore<HttpTaskRepository>, repo: HttpTaskRepository) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, repo);
    app.init().await;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Last-resort fallback: whatever went wrong, the user gets their
    // terminal back and a hint to relaunch.
    if let Err(err) = res {
        println!("taskline hit an unexpected error: {:?}", err);
        println!("The terminal has been restored; run `taskline` to reload.");
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.route {
                    Route::List => handle_list_key(app, key.code).await,
                    Route::Detail(id) => handle_detail_key(app, key.code, id).await,
                    Route::Edit => handle_form_key(app, key.code).await,
                    Route::NotFound => handle_not_found_key(app, key.code),
                }
            }
        }
    }
}

async fn handle_list_key(app: &mut App, code: KeyCode) {
    if matches!(app.input_mode, InputMode::Search) {
        match code {
            KeyCode::Enter | KeyCode::Esc => app.exit_search(),
            KeyCode::Char(c) => app.search_input(c),
            KeyCode::Backspace => app.search_backspace(),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.next(),
        KeyCode::Up | KeyCode::Char('k') => app.previous(),
        KeyCode::Enter => app.open_selected_detail().await,
        KeyCode::Char('a') => app.open_create_form(),
        KeyCode::Char('e') => app.open_selected_edit().await,
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected().await,
        KeyCode::Char(' ') => app.advance_selected_status().await,
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Char('s') => app.cycle_status_filter(),
        KeyCode::Char('p') => app.cycle_priority_filter(),
        KeyCode::Char('o') => app.cycle_sort_key(),
        KeyCode::Char('O') => app.flip_sort_direction(),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Char('x') => app.dismiss_error(),
        KeyCode::Char('r') => {
            app.store.fetch_all().await;
            app.refresh_visible();
        }
        _ => {}
    }
}

async fn handle_detail_key(app: &mut App, code: KeyCode, id: uuid::Uuid) {
    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Backspace => app.go_to_list(),
        KeyCode::Char('e') => app.open_edit_form(id).await,
        KeyCode::Char('1') => app.set_detail_status(Status::NotStarted).await,
        KeyCode::Char('2') => app.set_detail_status(Status::InProgress).await,
        KeyCode::Char('3') => app.set_detail_status(Status::Completed).await,
        KeyCode::Char('x') => app.dismiss_error(),
        _ => {}
    }
}

async fn handle_form_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.go_to_list(),
        KeyCode::Enter => app.submit_form().await,
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.form.as_mut() {
                form.prev_field();
            }
        }
        KeyCode::Left => {
            if let Some(form) = app.form.as_mut() {
                form.cycle_focused(false);
            }
        }
        KeyCode::Right => {
            if let Some(form) = app.form.as_mut() {
                form.cycle_focused(true);
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.form.as_mut() {
                form.input_char(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.form.as_mut() {
                form.delete_char();
            }
        }
        _ => {}
    }
}

fn handle_not_found_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => app.go_to_list(),
        _ => {}
    }
}
