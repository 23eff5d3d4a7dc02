use super::sort::SortOrder;
use super::task::{Task, TaskId};
use crate::deadline::Deadline;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// A named, insertion-ordered collection of tasks
#[derive(Debug, Clone)]
pub struct TaskList {
    name: String,

    /// Tasks in the order they were added
    tasks: Vec<Task>,

    /// Index from creation timestamp (as f64 bits) to task id
    ///
    /// Used to address tasks by `created_at` and to reject a second task with
    /// the same timestamp. Kept in sync with `tasks` by every mutating method.
    created_index: HashMap<u64, TaskId>,

    next_id: u64,
}

/// Map a timestamp to its index key; `-0.0` and `0.0` address the same task
fn index_key(created_at: f64) -> u64 {
    if created_at == 0.0 {
        0.0f64.to_bits()
    } else {
        created_at.to_bits()
    }
}

impl TaskList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
            created_index: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    /// Percentage of completed tasks
    ///
    /// The ratio is truncated before scaling, so this is 100 when every task
    /// is completed and 0 otherwise (2 of 3 gives 0, not 66). An empty list
    /// gives 0.
    pub fn percent_completed(&self) -> usize {
        let total = self.total_count();
        if total == 0 {
            return 0;
        }
        (self.completed_count() / total) * 100
    }

    /// Add a new task at the end of the list
    ///
    /// # Errors
    /// `DuplicateTask` if a task with the same `created_at` is already present;
    /// the list is left untouched.
    pub fn add_task(
        &mut self,
        created_at: f64,
        name: impl Into<String>,
        description: Option<String>,
        deadline: Deadline,
        priority: impl Into<String>,
    ) -> Result<TaskId> {
        let key = index_key(created_at);
        if self.created_index.contains_key(&key) {
            return Err(Error::DuplicateTask {
                list: self.name.clone(),
                created_at,
            });
        }

        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.tasks.push(Task::new(
            id,
            created_at,
            name.into(),
            description,
            deadline,
            priority.into(),
        ));
        self.created_index.insert(key, id);
        Ok(id)
    }

    /// Remove the task created at `created_at` and return it
    pub fn remove_task(&mut self, created_at: f64) -> Result<Task> {
        let pos = self.position(created_at)?;
        self.created_index.remove(&index_key(created_at));
        Ok(self.tasks.remove(pos))
    }

    pub fn contains_task(&self, created_at: f64) -> bool {
        self.created_index.contains_key(&index_key(created_at))
    }

    pub fn get_task(&self, created_at: f64) -> Result<&Task> {
        let pos = self.position(created_at)?;
        Ok(&self.tasks[pos])
    }

    pub(crate) fn get_task_mut(&mut self, created_at: f64) -> Result<&mut Task> {
        let pos = self.position(created_at)?;
        Ok(&mut self.tasks[pos])
    }

    /// Mark a task completed. Returns `true` if its state changed.
    pub fn set_task_completed(&mut self, created_at: f64) -> Result<bool> {
        Ok(self.get_task_mut(created_at)?.mark_complete())
    }

    /// Mark a task not completed. Returns `true` if its state changed.
    pub fn set_task_incomplete(&mut self, created_at: f64) -> Result<bool> {
        Ok(self.get_task_mut(created_at)?.mark_incomplete())
    }

    /// Replace the content fields of a task in one step
    pub fn update_task(
        &mut self,
        created_at: f64,
        name: impl Into<String>,
        description: Option<String>,
        deadline: Deadline,
        priority: impl Into<String>,
    ) -> Result<()> {
        let task = self.get_task_mut(created_at)?;
        task.name = name.into();
        task.description = description;
        task.priority = priority.into();
        task.set_deadline(deadline);
        Ok(())
    }

    /// Fold the tasks of `other` into this list
    ///
    /// A task whose `created_at` is already present overwrites the stored
    /// task in place and keeps its id. Other tasks are appended in `other`'s
    /// order. Returns the number of overwritten tasks.
    pub fn merge(&mut self, other: TaskList) -> usize {
        let mut replaced = 0;
        for mut task in other.tasks {
            let key = index_key(task.created_at());
            match self.created_index.get(&key).copied() {
                Some(id) => {
                    if let Some(slot) = self.tasks.iter_mut().find(|t| t.id() == id) {
                        task.set_id(id);
                        *slot = task;
                        replaced += 1;
                    }
                }
                None => {
                    self.next_id += 1;
                    let id = TaskId(self.next_id);
                    task.set_id(id);
                    self.tasks.push(task);
                    self.created_index.insert(key, id);
                }
            }
        }
        replaced
    }

    /// Tasks sorted by `order`; the stored order is not changed
    ///
    /// The sort is stable, so tasks that compare equal keep insertion order.
    pub fn sorted(&self, order: SortOrder) -> Vec<&Task> {
        let mut view: Vec<&Task> = self.tasks.iter().collect();
        view.sort_by(|a, b| order.compare(a, b));
        view
    }

    fn position(&self, created_at: f64) -> Result<usize> {
        self.created_index
            .get(&index_key(created_at))
            .and_then(|id| self.tasks.iter().position(|t| t.id() == *id))
            .ok_or_else(|| Error::TaskNotFound {
                list: self.name.clone(),
                created_at,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(n: usize) -> TaskList {
        let mut list = TaskList::new("Chores");
        for i in 0..n {
            list.add_task(
                i as f64 + 0.25,
                format!("Task {}", i),
                None,
                Deadline::Unset,
                "MEDIUM",
            )
            .unwrap();
        }
        list
    }

    #[test]
    fn test_add_and_get_task() {
        let mut list = TaskList::new("Chores");
        let deadline = Deadline::parse("02/10/2025 08:00").unwrap();
        let id = list
            .add_task(
                10.5,
                "Laundry",
                Some("whites only".to_string()),
                deadline,
                "HIGH",
            )
            .unwrap();

        let task = list.get_task(10.5).unwrap();
        assert_eq!(task.id(), id);
        assert_eq!(task.name, "Laundry");
        assert_eq!(task.description.as_deref(), Some("whites only"));
        assert_eq!(task.deadline(), deadline);
        assert_eq!(task.deadline_display(), "02/10/2025 08:00");
        assert_eq!(task.priority, "HIGH");
        assert!(!task.is_completed());
        assert_eq!(list.total_count(), 1);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut list = TaskList::new("Chores");
        for ts in [30.0, 10.0, 20.0] {
            list.add_task(ts, format!("t{}", ts), None, Deadline::Unset, "LOW")
                .unwrap();
        }
        let order: Vec<f64> = list.tasks().iter().map(|t| t.created_at()).collect();
        assert_eq!(order, vec![30.0, 10.0, 20.0]);
    }

    #[test]
    fn test_duplicate_created_at_is_rejected() {
        let mut list = list_with(1);
        let err = list
            .add_task(0.25, "Again", None, Deadline::Unset, "LOW")
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateTask { created_at, .. } if created_at == 0.25));
        assert_eq!(list.total_count(), 1);
        assert_eq!(list.get_task(0.25).unwrap().name, "Task 0");
    }

    #[test]
    fn test_remove_task() {
        let mut list = list_with(3);
        let removed = list.remove_task(1.25).unwrap();
        assert_eq!(removed.name, "Task 1");
        assert_eq!(list.total_count(), 2);
        assert!(!list.contains_task(1.25));
        assert!(matches!(
            list.remove_task(1.25),
            Err(Error::TaskNotFound { .. })
        ));
        assert_eq!(list.total_count(), 2);
    }

    #[test]
    fn test_get_missing_task() {
        let list = list_with(1);
        let err = list.get_task(99.0).unwrap_err();
        assert!(
            matches!(err, Error::TaskNotFound { ref list, created_at } if list == "Chores" && created_at == 99.0)
        );
    }

    #[test]
    fn test_completed_count_tracks_state() {
        let mut list = list_with(3);
        assert!(list.set_task_completed(0.25).unwrap());
        assert!(!list.set_task_completed(0.25).unwrap());
        assert_eq!(list.completed_count(), 1);

        assert!(list.set_task_incomplete(0.25).unwrap());
        assert!(!list.set_task_incomplete(0.25).unwrap());
        assert_eq!(list.completed_count(), 0);

        assert!(list.set_task_completed(42.0).is_err());
        assert_eq!(list.completed_count(), 0);
    }

    #[test]
    fn test_percent_completed_truncates_before_scaling() {
        let mut list = list_with(0);
        assert_eq!(list.percent_completed(), 0);

        list = list_with(3);
        list.set_task_completed(0.25).unwrap();
        list.set_task_completed(1.25).unwrap();
        assert_eq!(list.completed_count(), 2);
        assert_eq!(list.percent_completed(), 0);

        list.set_task_completed(2.25).unwrap();
        assert_eq!(list.percent_completed(), 100);
    }

    #[test]
    fn test_remove_completed_task_updates_counts() {
        let mut list = list_with(2);
        list.set_task_completed(0.25).unwrap();
        list.remove_task(0.25).unwrap();
        assert_eq!(list.total_count(), 1);
        assert_eq!(list.completed_count(), 0);
    }

    #[test]
    fn test_update_task() {
        let mut list = list_with(1);
        let deadline = Deadline::parse("07/04/2025 12:00").unwrap();
        list.update_task(0.25, "Renamed", Some(String::new()), deadline, "low")
            .unwrap();

        let task = list.get_task(0.25).unwrap();
        assert_eq!(task.name, "Renamed");
        assert_eq!(task.description.as_deref(), Some(""));
        assert_eq!(task.deadline_display(), "07/04/2025 12:00");
        assert_eq!(task.priority, "low");
    }

    #[test]
    fn test_merge_overwrites_matching_and_appends_new() {
        let mut list = list_with(2);
        let kept_id = list.get_task(1.25).unwrap().id();

        let mut incoming = TaskList::new("Chores");
        incoming
            .add_task(1.25, "From file", None, Deadline::Unset, "HIGH")
            .unwrap();
        incoming
            .add_task(9.0, "Only in file", None, Deadline::Unset, "LOW")
            .unwrap();
        incoming.set_task_completed(1.25).unwrap();

        assert_eq!(list.merge(incoming), 1);
        let order: Vec<f64> = list.tasks().iter().map(|t| t.created_at()).collect();
        assert_eq!(order, vec![0.25, 1.25, 9.0]);

        let overwritten = list.get_task(1.25).unwrap();
        assert_eq!(overwritten.name, "From file");
        assert_eq!(overwritten.id(), kept_id);
        assert!(overwritten.is_completed());
        assert_eq!(list.get_task(0.25).unwrap().name, "Task 0");

        let ids: std::collections::HashSet<TaskId> = list.tasks().iter().map(|t| t.id()).collect();
        assert_eq!(ids.len(), 3);
        assert!(list.remove_task(9.0).is_ok());
    }

    #[test]
    fn test_negative_zero_addresses_zero() {
        let mut list = TaskList::new("Edge");
        list.add_task(0.0, "zero", None, Deadline::Unset, "MEDIUM")
            .unwrap();
        assert!(list.contains_task(-0.0));
        assert!(list.get_task(-0.0).is_ok());
    }
}
