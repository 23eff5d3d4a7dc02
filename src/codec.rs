//! Flat-file codec for the list store
//!
//! One line per non-empty list:
//!
//! ```text
//! <list>==<task>``<task>``
//! <created_at>~~<name>~~<description|empty>~~<deadline>~~<priority>~~<true|false>
//! ```
//!
//! The grammar has no escaping. A value containing `==`, `~~` or `` `` ``,
//! or ending in a character that runs into the delimiter after it (`L=`
//! before `==`, `x~` before `~~`), is written as-is and will split at the
//! wrong place when read back, so [`encode`] logs a warning for every such
//! value.

use crate::deadline::Deadline;
use crate::error::{Error, Result};
use crate::model::{ListStore, Task, TaskList};
use tracing::{debug, warn};

/// Separates the list name from its tasks
pub const LIST_DELIMITER: &str = "==";
/// Terminates every task block
pub const TASK_DELIMITER: &str = "``";
/// Separates the fields of a task block
pub const FIELD_DELIMITER: &str = "~~";
/// Written in place of an absent description
pub const EMPTY_DESCRIPTION: &str = "empty";

const FIELD_COUNT: usize = 6;

/// Result of encoding a store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encoded {
    /// File contents, one newline-terminated line per written list
    pub text: String,
    /// Names of the lists that were written
    pub written: Vec<String>,
    /// Names of empty lists, which have no line in the file
    pub skipped_empty: Vec<String>,
}

impl Encoded {
    /// `true` when every list made it into the text
    pub fn is_complete(&self) -> bool {
        self.skipped_empty.is_empty()
    }
}

/// Result of decoding file contents
#[derive(Debug, Default)]
pub struct Decoded {
    /// Lists decoded from valid lines, in file order
    pub lists: Vec<TaskList>,
    /// One `CorruptPersistedRecord` per rejected line
    pub errors: Vec<Error>,
    /// Non-blank lines seen, valid or not
    pub lines_read: usize,
}

/// Does `value` contain any of the three delimiters?
pub fn contains_delimiter(value: &str) -> bool {
    [LIST_DELIMITER, TASK_DELIMITER, FIELD_DELIMITER]
        .iter()
        .any(|d| value.contains(d))
}

/// Would `value` written just before `delimiter` split anywhere but there?
pub fn breaks_field(value: &str, delimiter: &str) -> bool {
    contains_delimiter(value)
        || format!("{}{}", value, delimiter).find(delimiter) != Some(value.len())
}

/// Encode every non-empty list of `store`
pub fn encode(store: &ListStore) -> Encoded {
    let mut encoded = Encoded::default();
    for (name, list) in store.lists() {
        match encode_list(list) {
            Some(line) => {
                encoded.text.push_str(&line);
                encoded.text.push('\n');
                encoded.written.push(name.clone());
            }
            None => {
                warn!(list = %name, "skipping empty list");
                encoded.skipped_empty.push(name.clone());
            }
        }
    }
    encoded
}

/// Encode one list as a line without terminator; `None` for an empty list
pub fn encode_list(list: &TaskList) -> Option<String> {
    if list.is_empty() {
        return None;
    }
    if breaks_field(list.name(), LIST_DELIMITER) {
        warn!(list = %list.name(), "list name contains a delimiter and will not load back intact");
    }

    let mut line = format!("{}{}", list.name(), LIST_DELIMITER);
    for task in list.tasks() {
        line.push_str(&encode_task(list.name(), task));
    }
    debug!(list = %list.name(), tasks = list.total_count(), "encoded list");
    Some(line)
}

fn encode_task(list_name: &str, task: &Task) -> String {
    let description = task.description.as_deref().unwrap_or(EMPTY_DESCRIPTION);
    for value in [task.name.as_str(), description, task.priority.as_str()] {
        if breaks_field(value, FIELD_DELIMITER) {
            warn!(
                list = %list_name,
                created_at = task.created_at(),
                "task field contains a delimiter and will not load back intact"
            );
        }
    }

    [
        task.created_at().to_string(),
        task.name.clone(),
        description.to_string(),
        task.deadline().to_text(),
        task.priority.clone(),
        task.is_completed().to_string(),
    ]
    .join(FIELD_DELIMITER)
        + TASK_DELIMITER
}

/// Decode file contents line by line
///
/// Blank lines are ignored. A line that fails to decode is dropped as a
/// whole and reported in [`Decoded::errors`]; the other lines still load.
pub fn decode(text: &str) -> Decoded {
    let mut decoded = Decoded::default();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        decoded.lines_read += 1;
        match decode_line(line, index + 1) {
            Ok(list) => {
                debug!(line = index + 1, list = %list.name(), tasks = list.total_count(), "decoded list");
                decoded.lists.push(list);
            }
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping corrupt line");
                decoded.errors.push(e);
            }
        }
    }
    decoded
}

/// Decode a single line into a list. `line_no` is 1-based and only used in errors.
pub fn decode_line(line: &str, line_no: usize) -> Result<TaskList> {
    let corrupt = |reason: String| Error::CorruptPersistedRecord {
        line: line_no,
        reason,
    };

    let (name, blob) = line
        .split_once(LIST_DELIMITER)
        .ok_or_else(|| corrupt(format!("missing '{}' after list name", LIST_DELIMITER)))?;

    let blob = blob.strip_suffix(TASK_DELIMITER).unwrap_or(blob);
    if blob.is_empty() {
        return Err(corrupt(format!("list '{}' has no tasks", name)));
    }

    let mut list = TaskList::new(name);
    for chunk in blob.split(TASK_DELIMITER) {
        let fields: Vec<&str> = chunk.split(FIELD_DELIMITER).collect();
        if fields.len() != FIELD_COUNT {
            return Err(corrupt(format!(
                "expected {} fields in task, found {}",
                FIELD_COUNT,
                fields.len()
            )));
        }

        let created_at: f64 = fields[0]
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| corrupt(format!("invalid creation timestamp '{}'", fields[0])))?;
        let description = match fields[2] {
            EMPTY_DESCRIPTION => None,
            other => Some(other.to_string()),
        };
        let deadline = Deadline::parse(fields[3]).map_err(|e| corrupt(e.to_string()))?;
        let completed = parse_completed(fields[5])
            .ok_or_else(|| corrupt(format!("invalid completion flag '{}'", fields[5])))?;

        list.add_task(created_at, fields[1], description, deadline, fields[4])
            .map_err(|e| corrupt(e.to_string()))?;
        if completed {
            list.set_task_completed(created_at)
                .map_err(|e| corrupt(e.to_string()))?;
        }
    }
    Ok(list)
}

fn parse_completed(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
