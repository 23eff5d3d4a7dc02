//! Text rendering of lists and tasks for tool responses

use crate::model::{ListStore, Task, TaskList};
use crate::storage::SaveReport;

/// One line per list with its counters
pub fn format_overview(store: &ListStore) -> String {
    if store.is_empty() {
        return "No lists found".to_string();
    }

    let mut result = format!("Found {} list(s):\n\n", store.len());
    for list in store.lists().values() {
        result.push_str(&format!(
            "- {} ({} task(s), {} completed, {}% done)\n",
            list.name(),
            list.total_count(),
            list.completed_count(),
            list.percent_completed()
        ));
    }
    result
}

/// The tasks of `list` in the given order
pub fn format_tasks(list: &TaskList, tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return format!("List '{}' has no tasks", list.name());
    }

    let mut result = format!(
        "List '{}': {} task(s), {} completed\n\n",
        list.name(),
        list.total_count(),
        list.completed_count()
    );
    for task in tasks {
        result.push_str(&format_task(task));
    }
    result
}

pub fn format_task(task: &Task) -> String {
    let mark = if task.is_completed() { "x" } else { " " };
    let mut result = format!(
        "- [{}] {} (created_at: {}, priority: {})\n",
        mark,
        task.name,
        task.created_at(),
        task.priority
    );
    if let Some(ref description) = task.description {
        result.push_str(&format!("  Description: {}\n", description));
    }
    if task.deadline().is_set() {
        result.push_str(&format!("  Deadline: {}\n", task.deadline_display()));
    }
    result
}

pub fn format_save_report(report: &SaveReport) -> String {
    if report.is_complete() {
        format!("Saved {} list(s)", report.written.len())
    } else {
        format!(
            "Saved {} list(s); skipped empty list(s): {}",
            report.written.len(),
            report.skipped_empty.join(", ")
        )
    }
}
