//! Data models for the two upstream APIs and the export file shapes.
//!
//! Decoding is deliberately narrow: only the fields this tool consumes are
//! declared, everything else in the upstream payloads is ignored.

use serde::{Deserialize, Serialize};

/// A JSONPlaceholder user (an "employee" in the reports).
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Numeric user id, also the stem of the export file names.
    pub id: u64,
    /// Full display name, used in the progress summary.
    pub name: String,
    /// Short login name, used in the export rows.
    pub username: String,
}

/// A single JSONPlaceholder todo item.
#[derive(Debug, Clone, Deserialize)]
pub struct Todo {
    /// Owning user id.
    #[serde(rename = "userId")]
    pub user_id: u64,
    /// Task title.
    pub title: String,
    /// Whether the task is done.
    pub completed: bool,
}

/// One Reddit post. Everything except the title is dropped at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    pub title: String,
}

/// One decoded page of a subreddit listing: the posts in API order plus
/// the cursor for the next page. `after == None` is the only signal that
/// the listing is exhausted.
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub posts: Vec<Post>,
    pub after: Option<String>,
}

/// CSV row for the per-user task export. Column order is part of the file
/// format: `"USER_ID","USERNAME","TASK_COMPLETED_STATUS","TASK_TITLE"`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    pub user_id: u64,
    pub username: String,
    pub completed: bool,
    pub title: String,
}

impl TaskRecord {
    /// Build one CSV row from a user and one of their todos.
    pub fn from_todo(user: &User, todo: &Todo) -> Self {
        Self {
            user_id: todo.user_id,
            username: user.username.clone(),
            completed: todo.completed,
            title: todo.title.clone(),
        }
    }
}

/// JSON element for the task exports. Key order is part of the file
/// format: `{"task": .., "completed": .., "username": ..}`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedTask {
    pub task: String,
    pub completed: bool,
    pub username: String,
}

impl ExportedTask {
    /// Build one JSON element from a user and one of their todos.
    pub fn from_todo(user: &User, todo: &Todo) -> Self {
        Self {
            task: todo.title.clone(),
            completed: todo.completed,
            username: user.username.clone(),
        }
    }
}
