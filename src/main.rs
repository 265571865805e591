use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::Result;
use std::path::PathBuf;
use std::process;
use tasklist::{Config, FilterMode, SqliteStorage, Storage, Task, TaskStore};
use tracing::Level;

const SHORT_ID_LEN: usize = 8;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Add, complete, edit, search and filter tasks, saved locally")]
#[command(version)]
struct Cli {
    /// Path to the config file (default: <config dir>/tasklist/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the storage database, overriding the config file
    #[arg(long)]
    db: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Mark a task done, or not done again
    Toggle { id: String },

    /// Rename a task (an empty title deletes it)
    Edit {
        id: String,
        #[arg(num_args = 0..)]
        title: Vec<String>,
    },

    /// Delete a task
    Rm { id: String },

    /// Show tasks
    List {
        /// all, active or done
        #[arg(short, long, value_parser = parse_filter)]
        filter: Option<FilterMode>,

        /// Only show tasks whose title contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Delete all completed tasks
    ClearDone,

    /// Mark every task done
    CheckAll,

    /// Mark every task not done
    UncheckAll,
}

fn parse_filter(s: &str) -> Result<FilterMode, String> {
    s.parse::<FilterMode>().map_err(|e| e.to_string())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::resolve(cli.config.as_deref())?;
    let db_path = cli.db.unwrap_or_else(|| config.storage_path.clone());
    let storage = SqliteStorage::open(&db_path)?;
    let mut store = TaskStore::open(storage, config.storage_key.clone());

    let mut filter = config.default_filter;
    let mut search = String::new();

    match cli.command {
        Some(Commands::Add { title }) => {
            if store.add(&title.join(" ")).is_none() {
                println!("Nothing to add");
            }
        }
        Some(Commands::Toggle { id }) => {
            if let Some(id) = resolve_id(&store, &id) {
                store.toggle_done(&id);
            }
        }
        Some(Commands::Edit { id, title }) => {
            if let Some(id) = resolve_id(&store, &id) {
                store.begin_edit(&id);
                store.commit_edit(&id, &title.join(" "));
            }
        }
        Some(Commands::Rm { id }) => {
            if let Some(id) = resolve_id(&store, &id) {
                store.remove(&id);
            }
        }
        Some(Commands::List {
            filter: list_filter,
            search: list_search,
        }) => {
            if let Some(f) = list_filter {
                filter = f;
            }
            search = list_search;
        }
        Some(Commands::ClearDone) => {
            let removed = store.clear_completed();
            println!("Cleared {} done task{}", removed, plural(removed));
        }
        Some(Commands::CheckAll) => store.set_all_done(true),
        Some(Commands::UncheckAll) => store.set_all_done(false),
        None => {}
    }

    render(&store, filter, &search);
    Ok(())
}

/// Expand the short id shown by `list` (any unique suffix) to the full id
fn resolve_id<S: Storage>(store: &TaskStore<S>, short: &str) -> Option<String> {
    if short.is_empty() {
        return None;
    }
    let matches: Vec<&Task> = store.tasks().iter().filter(|t| t.id.ends_with(short)).collect();

    match matches.as_slice() {
        [task] => Some(task.id.clone()),
        [] => {
            println!("No task with id {}", short.yellow());
            None
        }
        _ => {
            println!("Id {} is ambiguous ({} tasks match)", short.yellow(), matches.len());
            None
        }
    }
}

fn render<S: Storage>(store: &TaskStore<S>, filter: FilterMode, search: &str) {
    let tasks = store.view(filter, search);

    if tasks.is_empty() {
        println!("{}", "No tasks — add something fun!".dimmed());
    } else {
        for task in tasks {
            println!("{}", render_task(task));
        }
    }

    let left = store.count_active();
    println!();
    println!("{} item{} left  [{}]", left, plural(left), filter.to_string().cyan());
}

fn render_task(task: &Task) -> String {
    let checkbox = if task.done { "[x]".green() } else { "[ ]".normal() };
    let short_id = task.id.get(task.id.len().saturating_sub(SHORT_ID_LEN)..).unwrap_or(&task.id);
    let title = if task.done {
        task.title.dimmed().strikethrough()
    } else {
        task.title.normal()
    };
    let created = Local
        .timestamp_millis_opt(task.created_at)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();

    format!("{} {} {} {}", checkbox, short_id.blue(), title, created.dimmed())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
