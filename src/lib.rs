//! To-do List MCP Server Library
//!
//! This library manages named to-do lists whose tasks carry a name, an
//! optional description, a deadline, a priority and a completion flag. The
//! lists persist to a single flat file between sessions and are exposed to
//! clients as a Model Context Protocol (MCP) server.
//!
//! # Architecture
//!
//! - **MCP Layer**: `TdlServerHandler` - Handles MCP protocol communication
//! - **Facade**: `controller` module - Single entry point, change notifications
//! - **Domain Layer**: `model` module - Tasks, lists, the list store, sort orders
//! - **Persistence Layer**: `codec` and `storage` modules - Flat-file format and I/O
//!
//! # Example
//!
//! ```no_run
//! use tdl_mcp::TdlServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = TdlServerHandler::new("listdata.txt", false)?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod controller;
pub mod deadline;
mod error;
pub mod formatting;
mod handlers;
pub mod model;
pub mod notifier;
pub mod storage;

use anyhow::Result;
use mcp_attr::server::{McpServer, mcp_server};
use mcp_attr::{Result as McpResult, bail_public};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

// Re-export commonly used types
pub use config::Config;
pub use controller::{Controller, LoadReport};
pub use deadline::Deadline;
pub use error::Error;
pub use model::{ListStore, SortOrder, Task, TaskId, TaskList};
pub use notifier::ChangeEvent;
pub use storage::{SaveReport, Storage};

/// MCP Server handler for to-do list management
///
/// Wraps a [`Controller`] behind a mutex. The data file is loaded when the
/// handler is created; saving is explicit unless autosave is enabled.
pub struct TdlServerHandler {
    pub(crate) controller: Mutex<Controller>,
    autosave: bool,
}

impl TdlServerHandler {
    /// Create a new handler and load the data file
    ///
    /// # Arguments
    /// * `storage_path` - Path to the flat data file
    /// * `autosave` - Save after every mutating tool call
    ///
    /// # Example
    /// ```no_run
    /// # use tdl_mcp::TdlServerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = TdlServerHandler::new("listdata.txt", false)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: impl AsRef<Path>, autosave: bool) -> Result<Self> {
        let mut controller = Controller::new(Storage::new(storage_path));
        let report = controller.load_with_report()?;
        for e in &report.errors {
            warn!(error = %e, "ignored corrupt line in data file");
        }
        Ok(Self {
            controller: Mutex::new(controller),
            autosave,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.data_file, config.autosave)
    }

    pub(crate) fn lock_controller(&self) -> McpResult<MutexGuard<'_, Controller>> {
        match self.controller.lock() {
            Ok(guard) => Ok(guard),
            Err(_) => {
                bail_public!(_, "Internal error: list store lock is poisoned");
            }
        }
    }

    /// Save if autosave is on; returns a suffix for the tool response
    pub(crate) fn autosave(&self, controller: &Controller) -> McpResult<String> {
        if !self.autosave {
            return Ok(String::new());
        }
        match controller.save_with_report() {
            Ok(report) if report.is_complete() => Ok(" (saved)".to_string()),
            Ok(report) => Ok(format!(
                " (saved; skipped empty list(s): {})",
                report.skipped_empty.join(", ")
            )),
            Err(e) => {
                bail_public!(_, "Failed to save: {}", e);
            }
        }
    }

    /// Extract the creation timestamp from an add_task response
    ///
    /// Response format: "Task created with created_at: <ts> in list '<list>'"
    #[cfg(test)]
    fn extract_created_at_from_response(response: &str) -> f64 {
        response
            .split("created_at: ")
            .nth(1)
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|ts| ts.parse().ok())
            .unwrap_or(f64::NAN)
    }
}

/// To-do list server: named lists of tasks with deadlines and priorities.
///
/// Key concepts:
/// - **list**: a named collection of tasks; names are unique
/// - **task**: name, optional description, deadline, priority, completion flag
/// - **created_at**: the creation timestamp that identifies a task within its list
/// - **deadline**: `MM/DD/YYYY HH:MM`, or `MM/DD/YYYY HR:MN` for none
/// - **priority**: HIGH, MEDIUM (default) or LOW; other text is kept and ranks as MEDIUM
///
/// Changes live in memory until `save` is called (unless the server runs with autosave).
/// Empty lists are not written to the data file.
#[mcp_server]
impl McpServer for TdlServerHandler {
    /// **Create list**: Start a new, empty to-do list. Fails if the name is taken.
    #[tool]
    async fn create_list(
        &self,
        /// List name (unique)
        name: String,
    ) -> McpResult<String> {
        self.handle_create_list(name).await
    }

    /// **Delete list**: Remove a list and all of its tasks.
    #[tool]
    async fn delete_list(
        &self,
        /// List name
        name: String,
    ) -> McpResult<String> {
        self.handle_delete_list(name).await
    }

    /// **Rename list**: Move a list and its tasks to a new name. An existing list with the new name is replaced.
    #[tool]
    async fn rename_list(
        &self,
        /// Current list name
        old_name: String,
        /// New list name
        new_name: String,
    ) -> McpResult<String> {
        self.handle_rename_list(old_name, new_name).await
    }

    /// **Review**: No list = overview of all lists with completion counts. With list = its tasks.
    /// **Sort**: "deadline" (earliest first, no deadline first) or "priority" (HIGH, MEDIUM, LOW). Empty = creation order.
    #[tool]
    async fn list(
        &self,
        /// List name (optional)
        list: Option<String>,
        /// Sort order: deadline/priority (optional)
        sort: Option<String>,
    ) -> McpResult<String> {
        self.handle_list(list, sort).await
    }

    /// **Add task**: Add a task to a list. The response contains its created_at, used to address it later.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn add_task(
        &self,
        /// List name
        list: String,
        /// Task name
        name: String,
        /// Description (optional; "" is kept as an empty description)
        description: Option<String>,
        /// Deadline MM/DD/YYYY HH:MM (optional, default: none)
        deadline: Option<String>,
        /// Priority HIGH/MEDIUM/LOW (optional, default: MEDIUM)
        priority: Option<String>,
        /// Creation timestamp in seconds (optional, default: now)
        created_at: Option<f64>,
    ) -> McpResult<String> {
        self.handle_add_task(list, name, description, deadline, priority, created_at)
            .await
    }

    /// **Edit task**: Change name, description, deadline or priority. Omitted fields are kept.
    /// **Tip**: description ""=empty description, clear_description=true removes it, deadline "MM/DD/YYYY HR:MN"=no deadline.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn edit_task(
        &self,
        /// List name
        list: String,
        /// Task created_at
        created_at: f64,
        /// New name (optional)
        name: Option<String>,
        /// New description, ""=empty description (optional)
        description: Option<String>,
        /// New deadline MM/DD/YYYY HH:MM (optional)
        deadline: Option<String>,
        /// New priority (optional)
        priority: Option<String>,
        /// Remove the description (optional, default: false)
        clear_description: Option<bool>,
    ) -> McpResult<String> {
        self.handle_edit_task(
            list,
            created_at,
            name,
            description,
            deadline,
            priority,
            clear_description.unwrap_or(false),
        )
        .await
    }

    /// **Delete task**: Remove a task from its list.
    #[tool]
    async fn delete_task(
        &self,
        /// List name
        list: String,
        /// Task created_at
        created_at: f64,
    ) -> McpResult<String> {
        self.handle_delete_task(list, created_at).await
    }

    /// **Check off**: Mark a task as completed.
    #[tool]
    async fn check_off_task(
        &self,
        /// List name
        list: String,
        /// Task created_at
        created_at: f64,
    ) -> McpResult<String> {
        self.handle_check_off_task(list, created_at).await
    }

    /// **Uncheck**: Mark a completed task as not completed.
    #[tool]
    async fn uncheck_task(
        &self,
        /// List name
        list: String,
        /// Task created_at
        created_at: f64,
    ) -> McpResult<String> {
        self.handle_uncheck_task(list, created_at).await
    }

    /// **Save**: Write all non-empty lists to the data file. Empty lists are reported and left out.
    #[tool]
    async fn save(&self) -> McpResult<String> {
        self.handle_save().await
    }

    /// **Load**: Read the data file. Loaded lists merge into in-memory lists of the same name (a loaded task overwrites the task with the same created_at; other tasks are kept); corrupt lines are reported and skipped.
    #[tool]
    async fn load(&self) -> McpResult<String> {
        self.handle_load().await
    }
}
