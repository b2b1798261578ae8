//! Wire types for the todos API.

use serde::{Deserialize, Serialize};

/// A todo as the server returns it. The id travels as `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: u64,
    pub task: String,
    pub description: String,
}

/// Body for create and update. Update replaces both fields, so send both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoFields {
    pub task: String,
    pub description: String,
}

impl TodoFields {
    pub fn new(task: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            description: description.into(),
        }
    }
}

/// `{"todos": [...]}` envelope returned by index and search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}
