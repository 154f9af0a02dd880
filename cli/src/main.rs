mod input;
mod tui;

use anyhow::Result;
use clap::Parser;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskline_core::{
    config, filter_sort, parse_human_date, validate_draft, ApiConfig, ApiError, FilterCriteria,
    HttpTaskRepository, SortDirection, Status, Task, TaskDraft, TaskPatch, TaskRepository,
    TaskStore,
};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::input::{expand_key, parse_args, parse_priority, parse_sort_key, parse_status};

#[derive(Parser)]
#[command(name = "taskline")]
#[command(about = "A task manager client for a taskline REST backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a new task (usage: add "Task title" due:tomorrow pri:h desc:"Notes")
    Add {
        /// Task details including title and metadata (key:value)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List tasks, optionally filtered and sorted
    List {
        /// Keep only tasks with this status (todo / in-progress / done)
        #[arg(long)]
        status: Option<String>,
        /// Keep only tasks with this priority (low / medium / high)
        #[arg(long)]
        priority: Option<String>,
        /// Keep only tasks whose title or description contains this text
        #[arg(long)]
        search: Option<String>,
        /// Sort key (due / priority / title)
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },
    /// Show a single task by id
    Show { id: Uuid },
    /// Mark a task completed
    Done { id: Uuid },
    /// Delete a task
    Rm { id: Uuid },
    /// Open the terminal user interface
    Tui,
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "St")]
    status: &'static str,
    #[tabled(rename = "Pri")]
    priority: &'static str,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Title")]
    title: String,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        let id_str = task.id.to_string();
        Self {
            id: id_str[..8].to_string(),
            status: task.status.label(),
            priority: task.priority.label(),
            due: task.due_date.format("%Y-%m-%d").to_string(),
            title: task.title.clone(),
        }
    }
}

fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = config::config_dir()?.join("logs");
    let appender = tracing_appender::rolling::daily(log_dir, "taskline.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Keep the appender guard alive for the whole run or nothing gets flushed.
    let _log_guard = init_logging();

    let cli = Cli::parse();
    let api_config = ApiConfig::load();
    tracing::debug!(base_url = %api_config.base_url, "configuration loaded");
    let repo = HttpTaskRepository::new(&api_config)?;
    let mut store = TaskStore::new(repo.clone());

    match cli.command {
        Some(Commands::Add { args }) => add_task(&mut store, &args).await,
        Some(Commands::List {
            status,
            priority,
            search,
            sort,
            desc,
        }) => list_tasks(&mut store, status, priority, search, sort, desc).await,
        Some(Commands::Show { id }) => show_task(&repo, id).await,
        Some(Commands::Done { id }) => {
            store
                .update(id, &TaskPatch::status_only(Status::Completed))
                .await;
            match store.error() {
                Some(message) => println!("{}", message),
                None => println!("Task {} marked completed.", id),
            }
            Ok(())
        }
        Some(Commands::Rm { id }) => {
            store.remove(id).await;
            match store.error() {
                Some(message) => println!("{}", message),
                None => println!("Task {} deleted.", id),
            }
            Ok(())
        }
        Some(Commands::Tui) | None => tui::run(store, repo).await,
    }
}

async fn add_task(store: &mut TaskStore<HttpTaskRepository>, args: &[String]) -> Result<()> {
    if args.is_empty() {
        println!("Error: Task title is required.");
        return Ok(());
    }

    let parsed = parse_args(args);
    if parsed.title.is_empty() {
        println!("Error: Task title is required.");
        return Ok(());
    }

    let known_keys = vec!["due", "priority", "description", "status"];
    let mut normalized = std::collections::HashMap::new();
    for (key, value) in parsed.metadata {
        match expand_key(&key, &known_keys) {
            Ok(full_key) => {
                normalized.insert(full_key, value);
            }
            Err(e) => println!("Warning: {}", e),
        }
    }

    let due_date = match normalized.get("due") {
        Some(raw) => match parse_human_date(raw) {
            Ok(dt) => dt,
            Err(e) => {
                println!("Error: invalid due date '{}': {}", raw, e);
                return Ok(());
            }
        },
        // Due date is required by the backend; default to end of today.
        None => parse_human_date("today")?,
    };

    let draft = TaskDraft {
        title: parsed.title,
        description: normalized.get("description").cloned().unwrap_or_default(),
        status: normalized
            .get("status")
            .and_then(|s| parse_status(s))
            .unwrap_or_default(),
        priority: normalized
            .get("priority")
            .and_then(|p| parse_priority(p))
            .unwrap_or_default(),
        due_date,
    };

    let errors = validate_draft(&draft, None);
    if !errors.is_empty() {
        for error in errors {
            println!("Error ({}): {}", error.field, error.message);
        }
        return Ok(());
    }

    store.create(&draft).await;
    match store.error() {
        Some(message) => println!("{}", message),
        None => {
            if let Some(task) = store.tasks().last() {
                println!("Task added: {} (ID: {})", task.title, task.id);
                println!("  Status: {}", task.status.label());
                println!("  Priority: {}", task.priority.label());
                println!("  Due: {}", task.due_date.format("%Y-%m-%d"));
            }
        }
    }
    Ok(())
}

async fn list_tasks(
    store: &mut TaskStore<HttpTaskRepository>,
    status: Option<String>,
    priority: Option<String>,
    search: Option<String>,
    sort: Option<String>,
    desc: bool,
) -> Result<()> {
    store.fetch_all().await;
    if let Some(message) = store.error() {
        println!("{}", message);
        return Ok(());
    }

    let mut criteria = FilterCriteria::default();
    if let Some(raw) = status {
        match parse_status(&raw) {
            Some(s) => criteria.status = Some(s),
            None => println!("Warning: unknown status '{}', ignoring", raw),
        }
    }
    if let Some(raw) = priority {
        match parse_priority(&raw) {
            Some(p) => criteria.priority = Some(p),
            None => println!("Warning: unknown priority '{}', ignoring", raw),
        }
    }
    if let Some(term) = search {
        criteria.search_term = term;
    }
    if let Some(raw) = sort {
        match parse_sort_key(&raw) {
            Some(key) => criteria.sort_key = key,
            None => println!("Warning: unknown sort key '{}', ignoring", raw),
        }
    }
    if desc {
        criteria.sort_direction = SortDirection::Descending;
    }

    let visible = filter_sort(store.tasks(), &criteria);
    if visible.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    let rows: Vec<TaskRow> = visible.iter().map(TaskRow::from_task).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    Ok(())
}

async fn show_task(repo: &HttpTaskRepository, id: Uuid) -> Result<()> {
    match repo.get(id).await {
        Ok(task) => {
            println!("{}", task.title);
            println!("  ID: {}", task.id);
            println!("  Status: {}", task.status.label());
            println!("  Priority: {}", task.priority.label());
            println!("  Due: {}", task.due_date.format("%Y-%m-%d"));
            println!("  Created: {}", task.created_at.format("%Y-%m-%d %H:%M"));
            println!("  Updated: {}", task.updated_at.format("%Y-%m-%d %H:%M"));
            if !task.description.is_empty() {
                println!("  Description: {}", task.description);
            }
        }
        Err(ApiError::NotFound) => println!("Task not found."),
        Err(_) => println!("Failed to fetch tasks"),
    }
    Ok(())
}
