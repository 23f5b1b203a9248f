//! CSV and JSON exporters for the todo reports.
//!
//! Rendering and writing are separate so the exact file shapes stay
//! testable without touching the filesystem.

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::{ExportedTask, TaskRecord, Todo, User};

/// Name of the combined export file.
pub const ALL_EMPLOYEES_FILE: &str = "todo_all_employees.json";

/// Render one user's todos as fully quoted, headerless CSV rows in the
/// column order `"USER_ID","USERNAME","TASK_COMPLETED_STATUS","TASK_TITLE"`.
pub fn render_user_csv(user: &User, todos: &[Todo]) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Always)
            .from_writer(&mut buf);

        for todo in todos {
            writer
                .serialize(TaskRecord::from_todo(user, todo))
                .context("Failed to serialize CSV row")?;
        }
        writer.flush().context("Failed to flush CSV rows")?;
    }

    String::from_utf8(buf).context("CSV output was not valid UTF-8")
}

/// Render one user's todos as the single-user JSON document
/// `{"<id>": [{"task": .., "completed": .., "username": ..}, ...]}`.
pub fn render_user_json(user: &User, todos: &[Todo]) -> Result<String> {
    let tasks: Vec<ExportedTask> = todos
        .iter()
        .map(|todo| ExportedTask::from_todo(user, todo))
        .collect();

    let mut doc = BTreeMap::new();
    doc.insert(user.id, tasks);
    serde_json::to_string(&doc).map_err(Into::into)
}

/// Render every user's todos as one pretty-printed JSON document keyed by
/// user id, ids ascending.
pub fn render_all_users_json(entries: &[(User, Vec<Todo>)]) -> Result<String> {
    let mut doc: BTreeMap<u64, Vec<ExportedTask>> = BTreeMap::new();
    for (user, todos) in entries {
        let tasks = todos
            .iter()
            .map(|todo| ExportedTask::from_todo(user, todo))
            .collect();
        doc.insert(user.id, tasks);
    }

    serde_json::to_string_pretty(&doc).map_err(Into::into)
}

/// Write `<id>.csv` into `dir`. Returns the path written.
pub fn write_user_csv(dir: &Path, user: &User, todos: &[Todo]) -> Result<PathBuf> {
    let path = dir.join(format!("{}.csv", user.id));
    write_file(&path, &render_user_csv(user, todos)?)?;
    Ok(path)
}

/// Write `<id>.json` into `dir`. Returns the path written.
pub fn write_user_json(dir: &Path, user: &User, todos: &[Todo]) -> Result<PathBuf> {
    let path = dir.join(format!("{}.json", user.id));
    write_file(&path, &render_user_json(user, todos)?)?;
    Ok(path)
}

/// Write the combined export into `dir`. Returns the path written.
pub fn write_all_users_json(dir: &Path, entries: &[(User, Vec<Todo>)]) -> Result<PathBuf> {
    let path = dir.join(ALL_EMPLOYEES_FILE);
    write_file(&path, &render_all_users_json(entries)?)?;
    Ok(path)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        // An empty parent means the current directory, which already exists.
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}
