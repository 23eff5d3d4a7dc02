//! Save/load handlers

use crate::TdlServerHandler;
use crate::formatting;
use mcp_attr::{Result as McpResult, bail_public};

impl TdlServerHandler {
    pub async fn handle_save(&self) -> McpResult<String> {
        let controller = self.lock_controller()?;
        match controller.save_with_report() {
            Ok(report) => Ok(formatting::format_save_report(&report)),
            Err(e) => {
                drop(controller);
                bail_public!(_, "Failed to save: {}", e);
            }
        }
    }

    pub async fn handle_load(&self) -> McpResult<String> {
        let mut controller = self.lock_controller()?;
        let report = match controller.load_with_report() {
            Ok(report) => report,
            Err(e) => {
                drop(controller);
                bail_public!(_, "Failed to load: {}", e);
            }
        };
        drop(controller);

        if !report.read_any() {
            return Ok("Nothing to load: data file is missing or empty".to_string());
        }

        let mut result = format!("Loaded {} list(s)", report.loaded.len());
        if !report.loaded.is_empty() {
            result.push_str(&format!(": {}", report.loaded.join(", ")));
        }
        if !report.errors.is_empty() {
            result.push_str(&format!("\nSkipped {} corrupt line(s):\n", report.errors.len()));
            for e in &report.errors {
                result.push_str(&format!("  - {}\n", e));
            }
        }
        Ok(result)
    }
}
