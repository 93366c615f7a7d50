use serde::{Deserialize, Serialize};

/// A subtask lives under exactly one task and cannot nest further
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(text: impl Into<String>) -> Self {
        Subtask {
            text: text.into(),
            completed: false,
        }
    }
}

/// A top-level todo item. Identity is its position in the backing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task text as typed (already trimmed)
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Subtasks in insertion order
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Whether the subtask rows are hidden
    #[serde(default)]
    pub collapsed: bool,
}

impl Task {
    /// New incomplete task, expanded, with no subtasks
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            completed: false,
            subtasks: Vec::new(),
            collapsed: false,
        }
    }

    /// True when subtask rows are shown under this task
    pub fn shows_subtasks(&self) -> bool {
        !self.collapsed && !self.subtasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_defaults() {
        let task = Task::new("write report");
        assert_eq!(task.text, "write report");
        assert!(!task.completed);
        assert!(task.subtasks.is_empty());
        assert!(!task.collapsed);
    }

    #[test]
    fn shows_subtasks_needs_expanded_and_non_empty() {
        let mut task = Task::new("a");
        assert!(!task.shows_subtasks());
        task.subtasks.push(Subtask::new("b"));
        assert!(task.shows_subtasks());
        task.collapsed = true;
        assert!(!task.shows_subtasks());
    }

    #[test]
    fn serializes_with_expected_field_names() {
        let mut task = Task::new("A");
        task.subtasks.push(Subtask::new("sub1"));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "A",
                "completed": false,
                "subtasks": [{ "text": "sub1", "completed": false }],
                "collapsed": false,
            })
        );
    }

    #[test]
    fn missing_optional_fields_default() {
        let task: Task = serde_json::from_str(r#"{"text":"A","completed":true}"#).unwrap();
        assert!(task.completed);
        assert!(task.subtasks.is_empty());
        assert!(!task.collapsed);
    }
}
