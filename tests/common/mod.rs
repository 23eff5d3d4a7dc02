//! Common test utilities for integration tests
#![allow(dead_code)]

use tdl_mcp::{Controller, Storage};
use tempfile::TempDir;

/// Create a controller backed by a data file in a fresh temporary directory
pub fn get_test_controller() -> (Controller, TempDir) {
    let dir = TempDir::new().unwrap();
    let controller = Controller::new(Storage::new(dir.path().join("listdata.txt")));
    (controller, dir)
}

/// Create a second controller over the same data file
pub fn reopen(dir: &TempDir) -> Controller {
    Controller::new(Storage::new(dir.path().join("listdata.txt")))
}

/// Add a task with no description, no deadline and MEDIUM priority
pub fn add_simple_task(controller: &mut Controller, list: &str, name: &str, created_at: f64) {
    controller
        .add_task(list, name, None, "MM/DD/YYYY HR:MN", created_at, "MEDIUM")
        .unwrap();
}
