//! Task handlers: add, edit, delete, check off, uncheck

use crate::TdlServerHandler;
use crate::deadline::PLACEHOLDER;
use crate::formatting;
use crate::handlers::{list_name, to_mcp_error};
use crate::model::DEFAULT_PRIORITY;
use mcp_attr::{Result as McpResult, bail_public};

/// Treat an empty (or whitespace-only) optional argument as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TdlServerHandler {
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_add_task(
        &self,
        list: String,
        name: String,
        description: Option<String>,
        deadline: Option<String>,
        priority: Option<String>,
        created_at: Option<f64>,
    ) -> McpResult<String> {
        let list = list_name(&list);
        if name.trim().is_empty() {
            bail_public!(_, "Task name must not be empty");
        }
        if let Some(ts) = created_at
            && !ts.is_finite()
        {
            bail_public!(_, "created_at must be a finite number");
        }

        let deadline = non_empty(deadline).unwrap_or_else(|| PLACEHOLDER.to_string());
        let priority = non_empty(priority).unwrap_or_else(|| DEFAULT_PRIORITY.to_string());

        let mut controller = self.lock_controller()?;
        let created_at = match created_at {
            Some(ts) => ts,
            None => controller.next_created_at(),
        };
        controller
            .add_task(list, &name, description, &deadline, created_at, &priority)
            .map_err(to_mcp_error)?;
        let saved = self.autosave(&controller)?;

        Ok(format!(
            "Task created with created_at: {} in list '{}'{}",
            created_at, list, saved
        ))
    }

    /// Partial update: omitted fields keep their value.
    ///
    /// `description` is stored as given, so `""` sets an empty description,
    /// the same as in add. `clear_description` removes it and wins over
    /// `description`.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_edit_task(
        &self,
        list: String,
        created_at: f64,
        name: Option<String>,
        description: Option<String>,
        deadline: Option<String>,
        priority: Option<String>,
        clear_description: bool,
    ) -> McpResult<String> {
        let list = list_name(&list);
        let mut controller = self.lock_controller()?;
        let current = controller
            .get_task(list, created_at)
            .map_err(to_mcp_error)?;

        let name = non_empty(name).unwrap_or_else(|| current.name.clone());
        let description = if clear_description {
            None
        } else {
            description.or_else(|| current.description.clone())
        };
        let deadline = non_empty(deadline).unwrap_or_else(|| current.deadline_display().to_string());
        let priority = non_empty(priority).unwrap_or_else(|| current.priority.clone());

        controller
            .edit_task(list, created_at, &name, description, &deadline, &priority)
            .map_err(to_mcp_error)?;
        let task = controller
            .get_task(list, created_at)
            .map_err(to_mcp_error)?;
        let rendered = formatting::format_task(task);
        let saved = self.autosave(&controller)?;

        Ok(format!("Task updated{}:\n{}", saved, rendered))
    }

    pub async fn handle_delete_task(&self, list: String, created_at: f64) -> McpResult<String> {
        let list = list_name(&list);
        let mut controller = self.lock_controller()?;
        controller
            .delete_task(list, created_at)
            .map_err(to_mcp_error)?;
        let saved = self.autosave(&controller)?;
        Ok(format!(
            "Task {} deleted from list '{}'{}",
            created_at, list, saved
        ))
    }

    pub async fn handle_check_off_task(&self, list: String, created_at: f64) -> McpResult<String> {
        let list = list_name(&list);
        let mut controller = self.lock_controller()?;
        let changed = controller
            .check_off_task(list, created_at)
            .map_err(to_mcp_error)?;
        if !changed {
            return Ok(format!("Task {} was already completed", created_at));
        }
        let saved = self.autosave(&controller)?;
        Ok(format!("Task {} marked as completed{}", created_at, saved))
    }

    pub async fn handle_uncheck_task(&self, list: String, created_at: f64) -> McpResult<String> {
        let list = list_name(&list);
        let mut controller = self.lock_controller()?;
        let changed = controller
            .uncheck_task(list, created_at)
            .map_err(to_mcp_error)?;
        if !changed {
            return Ok(format!("Task {} was not completed", created_at));
        }
        let saved = self.autosave(&controller)?;
        Ok(format!("Task {} marked as not completed{}", created_at, saved))
    }
}
