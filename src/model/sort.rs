//! Task orderings used to build sorted views
//!
//! Neither ordering reorders stored tasks; see [`crate::TaskList::sorted`].

use super::task::Task;
use std::cmp::Ordering;
use std::str::FromStr;

/// Rank of a priority string: HIGH is 1, LOW is 3, anything else is 2
///
/// Comparison is case-insensitive. Unrecognized priorities rank with MEDIUM.
pub fn priority_rank(priority: &str) -> u8 {
    if priority.eq_ignore_ascii_case("HIGH") {
        1
    } else if priority.eq_ignore_ascii_case("LOW") {
        3
    } else {
        2
    }
}

/// Order by deadline, earliest first; unset deadlines come first
pub fn by_deadline(a: &Task, b: &Task) -> Ordering {
    a.deadline().datetime().cmp(&b.deadline().datetime())
}

/// Order by priority rank, HIGH first
pub fn by_priority(a: &Task, b: &Task) -> Ordering {
    priority_rank(&a.priority).cmp(&priority_rank(&b.priority))
}

/// Named ordering for sorted views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Deadline,
    Priority,
}

impl SortOrder {
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortOrder::Deadline => by_deadline(a, b),
            SortOrder::Priority => by_priority(a, b),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deadline" => Ok(SortOrder::Deadline),
            "priority" => Ok(SortOrder::Priority),
            _ => Err(format!(
                "Invalid sort order '{}'. Valid options are: deadline, priority",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::Deadline;
    use crate::model::TaskList;

    #[test]
    fn test_priority_rank() {
        assert_eq!(priority_rank("HIGH"), 1);
        assert_eq!(priority_rank("high"), 1);
        assert_eq!(priority_rank("Medium"), 2);
        assert_eq!(priority_rank("urgent"), 2);
        assert_eq!(priority_rank(""), 2);
        assert_eq!(priority_rank("low"), 3);
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let mut list = TaskList::new("Mixed");
        for (i, p) in ["LOW", "HIGH", "foo", "MEDIUM"].iter().enumerate() {
            list.add_task(i as f64, *p, None, Deadline::Unset, *p).unwrap();
        }

        let sorted: Vec<&str> = list
            .sorted(SortOrder::Priority)
            .iter()
            .map(|t| t.priority.as_str())
            .collect();
        assert_eq!(sorted, vec!["HIGH", "foo", "MEDIUM", "LOW"]);

        // storage order untouched
        let stored: Vec<&str> = list.tasks().iter().map(|t| t.priority.as_str()).collect();
        assert_eq!(stored, vec!["LOW", "HIGH", "foo", "MEDIUM"]);
    }

    #[test]
    fn test_sort_by_deadline_puts_unset_first() {
        let mut list = TaskList::new("Dated");
        let entries = [
            ("later", "06/01/2025 10:00"),
            ("none", "MM/DD/YYYY HR:MN"),
            ("sooner", "01/15/2025 09:30"),
            ("old", "03/03/1950 00:00"),
        ];
        for (i, (name, text)) in entries.iter().enumerate() {
            list.add_task(i as f64, *name, None, Deadline::parse(text).unwrap(), "MEDIUM")
                .unwrap();
        }

        let sorted: Vec<&str> = list
            .sorted(SortOrder::Deadline)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(sorted, vec!["none", "old", "sooner", "later"]);
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("deadline".parse::<SortOrder>(), Ok(SortOrder::Deadline));
        assert_eq!("Priority".parse::<SortOrder>(), Ok(SortOrder::Priority));
        assert!("name".parse::<SortOrder>().is_err());
    }
}
