use super::task_list::TaskList;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// All task lists, keyed by name
///
/// A `BTreeMap` keeps iteration (and therefore the saved file) in name order.
#[derive(Debug, Clone, Default)]
pub struct ListStore {
    lists: BTreeMap<String, TaskList>,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lists(&self) -> &BTreeMap<String, TaskList> {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn contains_list(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }

    /// Create an empty list. Returns `false` without changes if the name is taken.
    pub fn create_list(&mut self, name: &str) -> bool {
        self.try_create_list(name).is_ok()
    }

    /// Create an empty list and return it
    pub fn try_create_list(&mut self, name: &str) -> Result<&mut TaskList> {
        if self.lists.contains_key(name) {
            return Err(Error::DuplicateListName(name.to_string()));
        }
        Ok(self
            .lists
            .entry(name.to_string())
            .or_insert_with(|| TaskList::new(name)))
    }

    /// Remove a list; removing an absent name is a no-op returning `None`
    pub fn remove_list(&mut self, name: &str) -> Option<TaskList> {
        self.lists.remove(name)
    }

    /// Move the list at `old_name` to `new_name`
    ///
    /// Tasks move with the list. A list already stored under `new_name` is
    /// replaced and returned.
    pub fn rename_list(&mut self, old_name: &str, new_name: &str) -> Result<Option<TaskList>> {
        let mut list = self
            .lists
            .remove(old_name)
            .ok_or_else(|| Error::ListNotFound(old_name.to_string()))?;
        list.set_name(new_name);
        Ok(self.lists.insert(new_name.to_string(), list))
    }

    pub fn get_list(&self, name: &str) -> Result<&TaskList> {
        self.lists
            .get(name)
            .ok_or_else(|| Error::ListNotFound(name.to_string()))
    }

    pub fn get_list_mut(&mut self, name: &str) -> Result<&mut TaskList> {
        self.lists
            .get_mut(name)
            .ok_or_else(|| Error::ListNotFound(name.to_string()))
    }

    /// Add a fully built list under its own name
    ///
    /// If a list with that name exists, the tasks are merged into it
    /// (see [`TaskList::merge`]).
    pub fn merge_list(&mut self, list: TaskList) {
        match self.lists.get_mut(list.name()) {
            Some(existing) => {
                existing.merge(list);
            }
            None => {
                self.lists.insert(list.name().to_string(), list);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::Deadline;

    #[test]
    fn test_create_list_rejects_duplicates() {
        let mut store = ListStore::new();
        assert!(store.create_list("Groceries"));
        assert!(!store.create_list("Groceries"));
        assert_eq!(store.len(), 1);
        assert!(matches!(
            store.try_create_list("Groceries"),
            Err(Error::DuplicateListName(ref n)) if n == "Groceries"
        ));
    }

    #[test]
    fn test_remove_list() {
        let mut store = ListStore::new();
        store.create_list("Work");
        assert!(store.remove_list("Work").is_some());
        assert!(store.remove_list("Work").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_rename_moves_tasks() {
        let mut store = ListStore::new();
        store
            .try_create_list("Old")
            .unwrap()
            .add_task(1.0, "Keep me", None, Deadline::Unset, "HIGH")
            .unwrap();

        assert!(store.rename_list("Old", "New").unwrap().is_none());
        assert!(!store.contains_list("Old"));
        let list = store.get_list("New").unwrap();
        assert_eq!(list.name(), "New");
        assert_eq!(list.get_task(1.0).unwrap().name, "Keep me");
    }

    #[test]
    fn test_rename_overwrites_existing_target() {
        let mut store = ListStore::new();
        store
            .try_create_list("A")
            .unwrap()
            .add_task(1.0, "from A", None, Deadline::Unset, "LOW")
            .unwrap();
        store
            .try_create_list("B")
            .unwrap()
            .add_task(2.0, "from B", None, Deadline::Unset, "LOW")
            .unwrap();

        let replaced = store.rename_list("A", "B").unwrap().unwrap();
        assert_eq!(replaced.get_task(2.0).unwrap().name, "from B");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_list("B").unwrap().get_task(1.0).unwrap().name, "from A");
    }

    #[test]
    fn test_rename_missing_list() {
        let mut store = ListStore::new();
        assert!(matches!(
            store.rename_list("Nope", "Other"),
            Err(Error::ListNotFound(ref n)) if n == "Nope"
        ));
    }

    #[test]
    fn test_get_missing_list() {
        let store = ListStore::new();
        assert!(matches!(store.get_list("x"), Err(Error::ListNotFound(_))));
    }

    #[test]
    fn test_merge_list_creates_or_merges() {
        let mut store = ListStore::new();
        let mut from_file = TaskList::new("Home");
        from_file
            .add_task(1.0, "Sweep", None, Deadline::Unset, "LOW")
            .unwrap();
        store.merge_list(from_file.clone());
        assert_eq!(store.get_list("Home").unwrap().total_count(), 1);

        store
            .get_list_mut("Home")
            .unwrap()
            .add_task(2.0, "Mop", None, Deadline::Unset, "LOW")
            .unwrap();
        store.merge_list(from_file);
        let home = store.get_list("Home").unwrap();
        assert_eq!(home.total_count(), 2);
        assert_eq!(home.get_task(2.0).unwrap().name, "Mop");
    }
}
