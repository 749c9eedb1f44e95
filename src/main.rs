use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskflow::config::Config;
use taskflow::domain::{list_summaries, remaining_time, TaskPatch};
use taskflow::logging::init_logging;
use taskflow::persistence::{init_data_dir, init_local_data_dir};
use taskflow::ticker::{countdown_interval, Countdown};
use taskflow::{FileStore, MutationError, TaskFlow};

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(about = "Lists and tasks, saved locally on every change", long_about = None)]
struct Cli {
    /// Data directory. Defaults to the nearest .taskflow, then ~/.taskflow
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a .taskflow directory here, or at --data-dir
    Init,
    #[command(flatten)]
    Data(DataCommand),
}

/// Commands that load and act on stored lists and tasks
#[derive(Subcommand)]
enum DataCommand {
    /// Show all lists with their progress
    Lists,
    /// Create a list and select it
    AddList { name: String },
    /// Rename a list
    RenameList { id: String, name: String },
    /// Delete a list and all of its tasks
    DeleteList { id: String },
    /// Select the active list
    Select { id: String },
    /// Show the tasks of the selected list
    Tasks,
    /// Add a task to the selected list
    Add {
        text: String,
        /// Due date, RFC 3339 (e.g. 2026-10-20T17:00:00Z)
        #[arg(long)]
        due: Option<String>,
        /// Enable the alarm (needs --due)
        #[arg(long)]
        alarm: bool,
    },
    /// Mark a task done, or not done again
    Toggle { id: String },
    /// Change fields of a task
    Edit {
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        #[arg(long)]
        clear_due: bool,
        #[arg(long)]
        alarm: Option<bool>,
    },
    /// Delete a task
    Delete { id: String },
    /// Remove completed tasks from the selected list
    ClearCompleted,
    /// Print due-date countdowns, refreshed every minute
    Watch {
        /// Number of refreshes before exiting
        #[arg(long, default_value_t = 1)]
        rounds: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = match cli.data_dir {
                Some(dir) => init_data_dir(&dir)?,
                None => init_local_data_dir(&std::env::current_dir()?)?,
            };
            println!("Initialized taskflow directory: {}", data_dir.display());
            Ok(())
        }
        Some(Commands::Data(command)) => run(cli.data_dir, cli.log_level, command),
        None => run(cli.data_dir, cli.log_level, DataCommand::Tasks),
    }
}

fn run(data_dir: Option<PathBuf>, log_level: Option<String>, command: DataCommand) -> Result<()> {
    let config = Config::resolve(data_dir, log_level)?;
    let _logger = match init_logging(&config.log_level, &config.log_dir()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    let store = FileStore::open(config.data_dir())?;
    let mut app = TaskFlow::load(store);

    match run_command(&mut app, command) {
        Err(CommandError::Mutation(e)) if e.is_warning() => {
            eprintln!("Warning: {}", e);
            Ok(())
        }
        Err(CommandError::Mutation(e)) => Err(e.into()),
        Err(CommandError::Other(e)) => Err(e),
        Ok(()) => Ok(()),
    }
}

enum CommandError {
    Mutation(MutationError),
    Other(anyhow::Error),
}

impl From<MutationError> for CommandError {
    fn from(e: MutationError) -> Self {
        CommandError::Mutation(e)
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(e: anyhow::Error) -> Self {
        CommandError::Other(e)
    }
}

fn run_command(app: &mut TaskFlow<FileStore>, command: DataCommand) -> Result<(), CommandError> {
    match command {
        DataCommand::Lists => print_lists(app),
        DataCommand::AddList { name } => {
            let id = app.add_list(&name)?;
            println!("Added list {}", id);
        }
        DataCommand::RenameList { id, name } => {
            app.rename_list(&id, &name)?;
            println!("Renamed list {}", id);
        }
        DataCommand::DeleteList { id } => {
            app.delete_list(&id)?;
            println!("Deleted list {}", id);
        }
        DataCommand::Select { id } => {
            app.select_list(&id)?;
            print_tasks(app);
        }
        DataCommand::Tasks => print_tasks(app),
        DataCommand::Add { text, due, alarm } => {
            let due = due.as_deref().map(parse_due).transpose()?;
            let id = app.add_task(&text, due, alarm)?;
            println!("Added task {}", id);
        }
        DataCommand::Toggle { id } => {
            if app.toggle_task(&id)? {
                println!("Done! Nice work.");
            } else {
                println!("Marked {} as not done", id);
            }
        }
        DataCommand::Edit {
            id,
            text,
            due,
            clear_due,
            alarm,
        } => {
            let mut patch = TaskPatch::default();
            if let Some(text) = text {
                patch = patch.text(text);
            }
            if let Some(due) = due {
                patch = patch.due(parse_due(&due)?);
            }
            if clear_due {
                patch = patch.clear_due();
            }
            if let Some(alarm) = alarm {
                patch = patch.alarm(alarm);
            }
            app.update_task(&id, patch)?;
            println!("Updated task {}", id);
        }
        DataCommand::Delete { id } => {
            app.delete_task(&id)?;
            println!("Deleted task {}", id);
        }
        DataCommand::ClearCompleted => {
            let removed = app.clear_completed()?;
            println!("Removed {} completed task(s)", removed);
        }
        DataCommand::Watch { rounds } => watch(app, rounds),
    }
    Ok(())
}

fn parse_due(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("Invalid due date `{}`. Use RFC 3339: {}", value, e))
}

fn print_lists(app: &TaskFlow<FileStore>) {
    let selected = app.selected_list_id();
    for summary in list_summaries(app.lists(), app.tasks()) {
        let marker = if Some(summary.id.as_str()) == selected { "*" } else { " " };
        println!(
            "{} {:<38} {:<24} {:>3} open  {:>3}%",
            marker, summary.id, summary.name, summary.active, summary.percentage
        );
    }
}

fn print_tasks(app: &TaskFlow<FileStore>) {
    let Some(list) = app.active_list() else {
        println!("No list selected");
        return;
    };

    println!(
        "{} ({} open, {}% done)",
        list.name,
        app.active_task_count(),
        app.completion_percentage()
    );

    let now = Utc::now();
    for task in app.visible_tasks() {
        let check = if task.completed { "[x]" } else { "[ ]" };
        let mut line = format!("{} {}  {}", check, task.id, task.text);
        if let Some(left) = remaining_time(task, now) {
            line.push_str(&format!("  ({})", left));
        }
        if task.alarm_on() {
            line.push_str("  [alarm]");
        }
        println!("{}", line);
    }
}

fn watch(app: &TaskFlow<FileStore>, rounds: u32) {
    let mut countdown = Countdown::new();

    for round in 0..rounds {
        if round > 0 {
            std::thread::sleep(countdown_interval());
        }
        countdown.refresh(app.tasks(), Utc::now());

        for task in app.visible_tasks() {
            if let Some(label) = countdown.label(&task.id) {
                println!("{}  {}", task.text, label);
            }
        }
    }
}
