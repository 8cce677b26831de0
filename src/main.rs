//! Task list CLI - terminal host for the list and detail screens.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tasklist::contract::FULL_PROJECTION;
use tasklist::{
    ConfirmationResponse, Database, DetailScreen, DisplayRow, FlowOutcome, ListScreen, PaneLayout, Task,
    TaskProvider, TaskUri,
};

mod cli;

use cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tasklist")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("tasklist.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn database_path(cli: &Cli) -> PathBuf {
    cli.db.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tasklist")
            .join(tasklist::DATABASE_NAME)
    })
}

fn open_provider(path: &std::path::Path) -> Result<TaskProvider> {
    let db = Database::open(path).context("Failed to open task database")?;
    Ok(TaskProvider::new(Arc::new(db)))
}

fn fetch_task(provider: &TaskProvider, id: i64) -> Result<Task> {
    let rows = provider
        .query(&TaskUri::for_task(id), Some(FULL_PROJECTION), None, &[], None)
        .context("Failed to query task")?;
    if rows.is_empty() {
        eyre::bail!("task not found: {id}");
    }
    Task::from_row(&rows, 0)
}

/// Show a confirmation prompt on the terminal and read the response.
fn prompt_confirmation(message: &str, positive: &str, negative: &str) -> Result<ConfirmationResponse> {
    println!("{message}");
    print!("{} [y = {positive}, N = {negative}] ", "?".yellow());
    io::stdout().flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line).context("Failed to read response")?;
    if read == 0 {
        // EOF: dismissed without choosing
        return Ok(ConfirmationResponse::Cancelled);
    }

    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(ConfirmationResponse::Confirmed),
        "" | "n" | "no" => Ok(ConfirmationResponse::Declined),
        _ => Ok(ConfirmationResponse::Cancelled),
    }
}

fn print_task_line(task: &Task) {
    println!(
        "{} {} {}",
        format!("#{}", task.id).cyan(),
        task.name,
        format!("(sort {})", task.sort_order).dimmed()
    );
    if let Some(description) = &task.description
        && !description.is_empty()
    {
        println!("    {}", description.dimmed());
    }
}

fn run(cli: Cli) -> Result<()> {
    let db_path = database_path(&cli);
    match cli.command {
        Command::Add {
            name,
            description,
            sort_order,
        } => {
            if name.is_empty() {
                eyre::bail!("task name must not be empty");
            }
            let provider = open_provider(&db_path)?;

            let mut screen = DetailScreen::add();
            screen.set_name(name.clone());
            if let Some(description) = description {
                screen.set_description(description);
            }
            screen.set_sort_order(sort_order.to_string());
            screen.save(&provider).context("Failed to add task")?;

            println!("{} Added: {}", "✓".green(), name);
        }

        Command::List { json } => {
            let provider = open_provider(&db_path)?;
            let mut screen = ListScreen::new(provider, PaneLayout::SinglePane);
            screen.load();
            screen.wait_for_load().context("Failed to load task list")?;

            if json {
                let mut tasks = Vec::new();
                for position in 0..screen.adapter().item_count() {
                    if let DisplayRow::Task(task) = screen.adapter().bind(position)? {
                        tasks.push(task);
                    }
                }
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                for position in 0..screen.adapter().item_count() {
                    match screen.adapter().bind(position)? {
                        DisplayRow::Instructions(text) => println!("{}", text.dimmed()),
                        DisplayRow::Task(task) => print_task_line(&task),
                    }
                }
            }
        }

        Command::Show { id, json } => {
            let provider = open_provider(&db_path)?;
            let task = fetch_task(&provider, id)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                println!("{}: {}", "Id".bold(), task.id.to_string().cyan());
                println!("{}: {}", "Name".bold(), task.name);
                if let Some(description) = &task.description {
                    println!("{}: {}", "Description".bold(), description);
                }
                println!("{}: {}", "Sort order".bold(), task.sort_order);
            }
        }

        Command::Edit {
            id,
            name,
            description,
            sort_order,
        } => {
            let provider = open_provider(&db_path)?;
            let task = fetch_task(&provider, id)?;

            let mut screen = DetailScreen::edit(task);
            if let Some(name) = name {
                screen.set_name(name);
            }
            if let Some(description) = description {
                screen.set_description(description);
            }
            if let Some(sort_order) = sort_order {
                screen.set_sort_order(sort_order.to_string());
            }

            if screen.is_dirty() {
                screen.save(&provider).context("Failed to update task")?;
                println!("{} Updated task {}", "✓".green(), id.to_string().cyan());
            } else {
                println!("{}", "No changes".dimmed());
            }
        }

        Command::Delete { id, yes } => {
            let provider = open_provider(&db_path)?;
            let task = fetch_task(&provider, id)?;

            let mut screen = ListScreen::new(provider, PaneLayout::SinglePane);
            let (message, positive, negative) = {
                let request = screen.delete_request(&task)?;
                (
                    request.message.clone(),
                    request.positive_label.clone(),
                    request.negative_label.clone(),
                )
            };

            let response = if yes {
                ConfirmationResponse::Confirmed
            } else {
                prompt_confirmation(&message, &positive, &negative)?
            };

            match screen.resolve_confirmation(response)? {
                FlowOutcome::Deleted(count) => {
                    println!("{} Deleted task {} ({count} row)", "✓".green(), id.to_string().cyan());
                }
                _ => println!("{}", "Not deleted".dimmed()),
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
