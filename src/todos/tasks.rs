//! Employee task progress summaries.

use crate::models::{Todo, User};

/// Completed-task report for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    pub employee_name: String,
    pub done: usize,
    pub total: usize,
    pub completed_titles: Vec<String>,
}

impl TaskSummary {
    /// Build a summary from a user and their todos, keeping the completed
    /// titles in API order.
    pub fn build(user: &User, todos: &[Todo]) -> Self {
        let completed_titles: Vec<String> = todos
            .iter()
            .filter(|todo| todo.completed)
            .map(|todo| todo.title.clone())
            .collect();

        Self {
            employee_name: user.name.clone(),
            done: completed_titles.len(),
            total: todos.len(),
            completed_titles,
        }
    }

    /// Render the report in its fixed format: a header line followed by one
    /// tab-indented line per completed task.
    pub fn render(&self) -> String {
        let mut out = format!(
            "Employee {} is done with tasks({}/{}):",
            self.employee_name, self.done, self.total
        );

        for title in &self.completed_titles {
            out.push_str("\n\t ");
            out.push_str(title);
        }

        out
    }
}
