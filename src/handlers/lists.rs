//! List handlers: create, delete, rename, and the list/overview query

use crate::TdlServerHandler;
use crate::formatting;
use crate::handlers::{list_name, to_mcp_error};
use crate::model::SortOrder;
use mcp_attr::{Result as McpResult, bail_public};

impl TdlServerHandler {
    pub async fn handle_create_list(&self, name: String) -> McpResult<String> {
        let name = list_name(&name);
        if name.is_empty() {
            bail_public!(_, "List name must not be empty");
        }

        let mut controller = self.lock_controller()?;
        if !controller.create_list(name) {
            drop(controller);
            bail_public!(
                _,
                "List '{}' already exists. Use list() to see existing lists.",
                name
            );
        }
        let saved = self.autosave(&controller)?;
        Ok(format!("List '{}' created{}", name, saved))
    }

    pub async fn handle_delete_list(&self, name: String) -> McpResult<String> {
        let name = list_name(&name);
        let mut controller = self.lock_controller()?;
        if !controller.delete_list(name) {
            drop(controller);
            bail_public!(
                _,
                "List '{}' not found. Use list() to see existing lists.",
                name
            );
        }
        let saved = self.autosave(&controller)?;
        Ok(format!("List '{}' deleted{}", name, saved))
    }

    pub async fn handle_rename_list(&self, old_name: String, new_name: String) -> McpResult<String> {
        let old_name = list_name(&old_name);
        let new_name = list_name(&new_name);
        if new_name.is_empty() {
            bail_public!(_, "New list name must not be empty");
        }

        let mut controller = self.lock_controller()?;
        controller
            .rename_list(old_name, new_name)
            .map_err(to_mcp_error)?;
        let saved = self.autosave(&controller)?;
        Ok(format!("List '{}' renamed to '{}'{}", old_name, new_name, saved))
    }

    /// Overview of every list, or the tasks of one list, optionally sorted.
    pub async fn handle_list(&self, list: Option<String>, sort: Option<String>) -> McpResult<String> {
        let order = match sort.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => match s.parse::<SortOrder>() {
                Ok(order) => Some(order),
                Err(msg) => {
                    bail_public!(_, "{}", msg);
                }
            },
        };

        let controller = self.lock_controller()?;
        let Some(name) = list else {
            return Ok(formatting::format_overview(controller.store()));
        };

        let task_list = controller
            .get_list(list_name(&name))
            .map_err(to_mcp_error)?;
        let tasks = match order {
            Some(order) => task_list.sorted(order),
            None => task_list.tasks().iter().collect(),
        };
        Ok(formatting::format_tasks(task_list, &tasks))
    }
}
