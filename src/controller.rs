//! Single entry point for callers that read and mutate the lists
//!
//! [`Controller`] turns deadline text into [`Deadline`]s, forwards to the
//! [`ListStore`], publishes a [`ChangeEvent`] after each mutation that
//! changed something, and runs save/load through [`Storage`].

use crate::deadline::Deadline;
use crate::error::{Error, Result};
use crate::model::{ListStore, SortOrder, Task, TaskId, TaskList};
use crate::notifier::{ChangeEvent, Notifier};
use crate::storage::{SaveReport, Storage};
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::broadcast;
use tracing::debug;

/// Outcome of a load
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names of the lists that were installed
    pub loaded: Vec<String>,
    /// Non-blank lines seen in the file
    pub lines_read: usize,
    /// Lines that were skipped, as `CorruptPersistedRecord` errors
    pub errors: Vec<Error>,
}

impl LoadReport {
    /// `true` when the file had at least one line
    pub fn read_any(&self) -> bool {
        self.lines_read > 0
    }
}

pub struct Controller {
    store: ListStore,
    storage: Storage,
    notifier: Notifier,
    /// Largest creation timestamp handed out or seen
    last_created_at: f64,
}

impl Controller {
    pub fn new(storage: Storage) -> Self {
        Self {
            store: ListStore::new(),
            storage,
            notifier: Notifier::new(),
            last_created_at: 0.0,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    /// Register an observer for change events
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.notifier.subscribe()
    }

    /// A creation timestamp (seconds since the epoch) unique for this controller
    ///
    /// Strictly greater than every timestamp previously generated, added, or
    /// loaded, even if the clock goes backwards.
    pub fn next_created_at(&mut self) -> f64 {
        let now = Utc::now().timestamp_millis() as f64 / 1000.0;
        let next = if now > self.last_created_at {
            now
        } else {
            (self.last_created_at + 0.001).max(next_representable(self.last_created_at))
        };
        self.last_created_at = next;
        next
    }

    fn observe_created_at(&mut self, created_at: f64) {
        if !created_at.is_finite() {
            return;
        }
        if created_at > self.last_created_at {
            self.last_created_at = created_at;
        }
    }

    /// Create an empty list. Returns `false` if the name is taken.
    pub fn create_list(&mut self, name: &str) -> bool {
        if !self.store.create_list(name) {
            debug!(list = name, "list already exists");
            return false;
        }
        self.notifier.notify(ChangeEvent::ListCreated {
            list: name.to_string(),
        });
        true
    }

    /// Delete a list. Returns `false` if there was no such list.
    pub fn delete_list(&mut self, name: &str) -> bool {
        if self.store.remove_list(name).is_none() {
            return false;
        }
        self.notifier.notify(ChangeEvent::ListDeleted {
            list: name.to_string(),
        });
        true
    }

    /// Rename a list; an existing list at `new_name` is replaced
    pub fn rename_list(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if let Some(replaced) = self.store.rename_list(old_name, new_name)? {
            debug!(list = new_name, tasks = replaced.total_count(), "rename replaced a list");
        }
        self.notifier.notify(ChangeEvent::ListRenamed {
            from: old_name.to_string(),
            to: new_name.to_string(),
        });
        Ok(())
    }

    pub fn get_list(&self, name: &str) -> Result<&TaskList> {
        self.store.get_list(name)
    }

    pub fn all_lists(&self) -> &BTreeMap<String, TaskList> {
        self.store.lists()
    }

    /// Tasks of a list in insertion order
    pub fn all_tasks(&self, list_name: &str) -> Result<&[Task]> {
        Ok(self.store.get_list(list_name)?.tasks())
    }

    /// Tasks of a list in the given order; the list itself is not reordered
    pub fn sorted_tasks(&self, list_name: &str, order: SortOrder) -> Result<Vec<&Task>> {
        Ok(self.store.get_list(list_name)?.sorted(order))
    }

    pub fn get_task(&self, list_name: &str, created_at: f64) -> Result<&Task> {
        self.store.get_list(list_name)?.get_task(created_at)
    }

    /// Add a task to a list
    ///
    /// # Errors
    /// `ListNotFound`, `MalformedDateText` or `DuplicateTask`; nothing is
    /// changed on error.
    pub fn add_task(
        &mut self,
        list_name: &str,
        name: &str,
        description: Option<String>,
        deadline_text: &str,
        created_at: f64,
        priority: &str,
    ) -> Result<TaskId> {
        let deadline = Deadline::parse(deadline_text)?;
        let id = self.store.get_list_mut(list_name)?.add_task(
            created_at,
            name,
            description,
            deadline,
            priority,
        )?;
        self.observe_created_at(created_at);
        self.notifier.notify(ChangeEvent::TaskAdded {
            list: list_name.to_string(),
            created_at,
        });
        Ok(id)
    }

    pub fn delete_task(&mut self, list_name: &str, created_at: f64) -> Result<()> {
        self.store.get_list_mut(list_name)?.remove_task(created_at)?;
        self.notifier.notify(ChangeEvent::TaskDeleted {
            list: list_name.to_string(),
            created_at,
        });
        Ok(())
    }

    /// Mark a task completed. Returns `false` (and notifies nobody) if it already was.
    pub fn check_off_task(&mut self, list_name: &str, created_at: f64) -> Result<bool> {
        let changed = self
            .store
            .get_list_mut(list_name)?
            .set_task_completed(created_at)?;
        if changed {
            self.notifier.notify(ChangeEvent::TaskCompleted {
                list: list_name.to_string(),
                created_at,
            });
        }
        Ok(changed)
    }

    /// Mark a task not completed. Returns `false` if it already was.
    pub fn uncheck_task(&mut self, list_name: &str, created_at: f64) -> Result<bool> {
        let changed = self
            .store
            .get_list_mut(list_name)?
            .set_task_incomplete(created_at)?;
        if changed {
            self.notifier.notify(ChangeEvent::TaskReopened {
                list: list_name.to_string(),
                created_at,
            });
        }
        Ok(changed)
    }

    /// Replace name, description, deadline and priority of a task
    ///
    /// The deadline text is validated before anything is touched.
    pub fn edit_task(
        &mut self,
        list_name: &str,
        created_at: f64,
        name: &str,
        description: Option<String>,
        deadline_text: &str,
        priority: &str,
    ) -> Result<()> {
        let deadline = Deadline::parse(deadline_text)?;
        self.store.get_list_mut(list_name)?.update_task(
            created_at,
            name,
            description,
            deadline,
            priority,
        )?;
        self.notifier.notify(ChangeEvent::TaskEdited {
            list: list_name.to_string(),
            created_at,
        });
        Ok(())
    }

    /// Save every list. `Ok(false)` means at least one empty list was skipped.
    pub fn save(&self) -> Result<bool> {
        Ok(self.save_with_report()?.is_complete())
    }

    pub fn save_with_report(&self) -> Result<SaveReport> {
        self.storage.save(&self.store)
    }

    /// Load the data file. `Ok(false)` means the file was missing or empty.
    pub fn load(&mut self) -> Result<bool> {
        Ok(self.load_with_report()?.read_any())
    }

    /// Load the data file into the store
    ///
    /// Decoded lists are merged into in-memory lists of the same name: a
    /// loaded task replaces the task with the same `created_at` and the other
    /// in-memory tasks are kept. Corrupt lines are skipped and returned in
    /// the report.
    pub fn load_with_report(&mut self) -> Result<LoadReport> {
        let decoded = self.storage.load()?;
        let mut report = LoadReport {
            loaded: Vec::with_capacity(decoded.lists.len()),
            lines_read: decoded.lines_read,
            errors: decoded.errors,
        };

        for list in decoded.lists {
            let newest = list
                .tasks()
                .iter()
                .map(Task::created_at)
                .fold(f64::MIN, f64::max);
            self.observe_created_at(newest);
            report.loaded.push(list.name().to_string());
            self.store.merge_list(list);
        }

        if !report.loaded.is_empty() {
            self.notifier.notify(ChangeEvent::DataLoaded {
                lists: report.loaded.len(),
            });
        }
        Ok(report)
    }
}

/// Smallest `f64` above `x`, for finite non-negative `x`
fn next_representable(x: f64) -> f64 {
    if x == 0.0 {
        f64::from_bits(1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::sync::broadcast::error::TryRecvError;

    fn controller() -> (Controller, TempDir) {
        let dir = TempDir::new().unwrap();
        let controller = Controller::new(Storage::new(dir.path().join("listdata.txt")));
        (controller, dir)
    }

    #[test]
    fn test_next_created_at_is_strictly_increasing() {
        let (mut controller, _dir) = controller();
        let mut previous = controller.next_created_at();
        for _ in 0..100 {
            let next = controller.next_created_at();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_next_created_at_passes_added_timestamps() {
        let (mut controller, _dir) = controller();
        controller.create_list("L");
        let far_future = 4_000_000_000.0;
        controller
            .add_task("L", "t", None, "MM/DD/YYYY HR:MN", far_future, "LOW")
            .unwrap();
        assert!(controller.next_created_at() > far_future);
    }

    #[test]
    fn test_next_created_at_moves_past_coarse_timestamps() {
        let (mut controller, _dir) = controller();
        controller.create_list("L");
        controller
            .add_task("L", "far", None, "MM/DD/YYYY HR:MN", 1e17, "LOW")
            .unwrap();

        let first = controller.next_created_at();
        let second = controller.next_created_at();
        assert!(first > 1e17);
        assert!(second > first);
        controller
            .add_task("L", "next", None, "MM/DD/YYYY HR:MN", first, "LOW")
            .unwrap();
        assert_eq!(controller.get_list("L").unwrap().total_count(), 2);
    }

    #[test]
    fn test_failed_create_does_not_notify() {
        let (mut controller, _dir) = controller();
        let mut rx = controller.subscribe();
        assert!(controller.create_list("L"));
        assert!(!controller.create_list("L"));
        assert!(matches!(rx.try_recv(), Ok(ChangeEvent::ListCreated { .. })));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_add_task_with_bad_deadline_changes_nothing() {
        let (mut controller, _dir) = controller();
        controller.create_list("L");
        let mut rx = controller.subscribe();
        let err = controller
            .add_task("L", "t", None, "tomorrow", 1.0, "LOW")
            .unwrap_err();
        assert!(matches!(err, Error::MalformedDateText(_)));
        assert!(controller.get_list("L").unwrap().is_empty());
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }
}
