//! Console front end for the notepad record keeper.
//!
//! # Responsibility
//! - Parse command-line arguments and drive the core service.
//! - Prompt for record fields and render lookup/listing results.
//! - Decide process termination on store faults; core only reports them.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::Input;
use log::error;
use notepad_core::db::open_db;
use notepad_core::{PostInput, PostKind, PostService, RowSet, SqlitePostStore};
use rusqlite::types::Value;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "notepad", about = "Personal record keeper for memos, tasks and links")]
struct Cli {
    /// Path to the SQLite store file.
    #[arg(long, default_value = "db/notepad.sqlite")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new record and save it.
    New {
        #[arg(value_enum)]
        kind: KindArg,
    },
    /// Show one record by its row id.
    Show { id: Option<i64> },
    /// List stored records, newest first.
    List {
        /// Restrict the listing to one kind.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        /// Maximum number of rows to show.
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Memo,
    Task,
    Link,
}

impl From<KindArg> for PostKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Memo => PostKind::Memo,
            KindArg::Task => PostKind::Task,
            KindArg::Link => PostKind::Link,
        }
    }
}

/// Interactive prompts backing the core's console-input seam.
struct ConsoleInput;

impl PostInput for ConsoleInput {
    fn line(&mut self, label: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .map_err(|err| io::Error::other(err.to_string()))
    }

    fn body(&mut self) -> io::Result<Vec<String>> {
        println!("Enter the text, finish with an empty line:");
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if io::stdin().read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                break;
            }
            lines.push(line.to_string());
        }
        Ok(lines)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging_best_effort();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        // Store faults are fatal by design; report and stop rather than
        // continue against a possibly inconsistent store.
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(parent) = cli.db.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create `{}`", parent.display()))?;
        }
    }

    // One-time schema bootstrap; the gateway opens raw per-operation
    // connections afterwards.
    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open store `{}`", cli.db.display()))?;
    drop(conn);

    let service = PostService::new(SqlitePostStore::new(&cli.db));

    match cli.command {
        Command::New { kind } => {
            let mut post = service.create_post(kind.into());
            post.populate(&mut ConsoleInput)?;
            let id = service.save(post.as_ref())?;
            println!("Saved record {id}.");
        }
        Command::Show { id } => match service.find_by_id(id)? {
            Some(post) => {
                for line in post.render() {
                    println!("{line}");
                }
            }
            None => println!("Nothing found."),
        },
        Command::List { kind, limit } => {
            let listing = service.find_all(limit, kind.map(PostKind::from))?;
            if listing.is_empty() {
                println!("Nothing found.");
            } else {
                print_listing(&listing);
            }
        }
    }

    Ok(())
}

fn init_logging_best_effort() {
    let Ok(cwd) = std::env::current_dir() else {
        return;
    };
    let log_dir = cwd.join("logs");
    if let Some(log_dir) = log_dir.to_str() {
        if let Err(err) = notepad_core::init_logging(notepad_core::default_log_level(), log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }
}

/// Renders the raw row set as an aligned text table.
fn print_listing(listing: &RowSet) {
    let mut widths: Vec<usize> = listing.columns.iter().map(String::len).collect();
    let rendered: Vec<Vec<String>> = listing
        .rows
        .iter()
        .map(|row| row.iter().map(display_cell).collect())
        .collect();
    for row in &rendered {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.len());
        }
    }

    let header: Vec<String> = listing
        .columns
        .iter()
        .enumerate()
        .map(|(index, name)| format!("{name:<width$}", width = widths[index]))
        .collect();
    println!("{}", header.join(" | "));

    for row in &rendered {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(index, cell)| format!("{cell:<width$}", width = widths[index]))
            .collect();
        println!("{}", cells.join(" | "));
    }
}

fn display_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(n) => n.to_string(),
        Value::Real(n) => n.to_string(),
        // Multi-line bodies collapse to one line in the listing view.
        Value::Text(text) => text.replace('\n', " / "),
        Value::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}
