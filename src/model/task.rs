use crate::deadline::Deadline;
use std::fmt;

/// Priority assigned when the caller does not give one
pub const DEFAULT_PRIORITY: &str = "MEDIUM";

/// Opaque task identifier, unique within its owning list
///
/// Generated by [`crate::TaskList`] in insertion order. It is never
/// persisted: the creation timestamp is the on-disk key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single to-do item
///
/// `created_at` is fixed at construction and addresses the task within its
/// list. Content fields are mutable; priority is kept verbatim and only
/// interpreted when sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    created_at: f64,
    /// Name of the task
    pub name: String,
    /// Optional description; `Some("")` and `None` are different states
    pub description: Option<String>,
    deadline: Deadline,
    deadline_display: String,
    /// Priority text (HIGH, MEDIUM, LOW, or anything else)
    pub priority: String,
    completed: bool,
}

impl Task {
    pub(crate) fn new(
        id: TaskId,
        created_at: f64,
        name: String,
        description: Option<String>,
        deadline: Deadline,
        priority: String,
    ) -> Self {
        Self {
            id,
            created_at,
            name,
            description,
            deadline_display: deadline.to_text(),
            deadline,
            priority,
            completed: false,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: TaskId) {
        self.id = id;
    }

    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Deadline as displayed to the user: the placeholder or `MM/DD/YYYY HH:MM`
    pub fn deadline_display(&self) -> &str {
        &self.deadline_display
    }

    /// Replace the deadline together with its display text
    pub fn set_deadline(&mut self, deadline: Deadline) {
        self.deadline = deadline;
        self.deadline_display = deadline.to_text();
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the task as completed. Returns `true` if the state changed.
    pub fn mark_complete(&mut self) -> bool {
        let changed = !self.completed;
        self.completed = true;
        changed
    }

    /// Mark the task as not completed. Returns `true` if the state changed.
    pub fn mark_incomplete(&mut self) -> bool {
        let changed = self.completed;
        self.completed = false;
        changed
    }
}
