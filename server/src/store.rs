//! In-memory todo collection.
//!
//! # Design
//! `TodoStore` owns an ordered `Vec<Todo>` plus a `next_id` counter that only
//! ever moves forward, so ids are never reused after a delete. Lookups are a
//! linear scan; insertion order is the list order.
//!
//! Id arguments arrive from the router as path text. The `&str` operations
//! parse them with [`TodoId::parse`] and treat anything non-numeric as
//! not-found, so a malformed id never panics or surfaces as its own error.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::RwLock;

/// The store shared between request handlers. Every mutation goes through the
/// write guard, which serializes create/update/destroy.
pub type SharedStore = Arc<RwLock<TodoStore>>;

/// Integer identifier of a todo, serialized as a bare JSON number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl TodoId {
    /// Parse an id supplied as text. Surrounding whitespace is allowed; the
    /// rest must be ASCII digits that fit in a `u64`.
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(TodoId)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub task: String,
    pub description: String,
}

/// The writable fields of a todo, as decoded from a request body.
///
/// Missing and `null` keys become empty strings. Any `_id` in the body is
/// ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TodoFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub task: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TodoFields {
    pub fn new(task: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No record has this id, or the id text was not a number.
    #[error("todo {id} not found")]
    NotFound { id: String },
}

impl StoreError {
    fn not_found(id: impl fmt::Display) -> Self {
        StoreError::NotFound { id: id.to_string() }
    }
}

#[derive(Debug)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: u64,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
        }
    }

    /// A store pre-loaded with the three classroom records, ids 1 through 3.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.create(TodoFields::new("Laundry", "Wash clothes"));
        store.create(TodoFields::new("Grocery Shopping", "Buy dinner for this week"));
        store.create(TodoFields::new("Homework", "Make this app super awesome!"));
        store
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn list(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Append a new record with a fresh id and return a copy of it.
    pub fn create(&mut self, fields: TodoFields) -> Todo {
        let id = TodoId(self.next_id);
        self.next_id += 1;
        let todo = Todo {
            id,
            task: fields.task,
            description: fields.description,
        };
        self.todos.push(todo.clone());
        tracing::debug!(%id, "created todo");
        todo
    }

    pub fn find(&self, id: &str) -> Result<&Todo, StoreError> {
        let parsed = TodoId::parse(id).ok_or_else(|| StoreError::not_found(id))?;
        self.find_by_id(parsed)
    }

    pub fn find_by_id(&self, id: TodoId) -> Result<&Todo, StoreError> {
        self.todos
            .iter()
            .find(|todo| todo.id == id)
            .ok_or_else(|| StoreError::not_found(id))
    }

    pub fn update(&mut self, id: &str, fields: TodoFields) -> Result<Todo, StoreError> {
        let parsed = TodoId::parse(id).ok_or_else(|| StoreError::not_found(id))?;
        self.update_by_id(parsed, fields)
    }

    /// Replace both writable fields of the record. The id never changes.
    pub fn update_by_id(&mut self, id: TodoId, fields: TodoFields) -> Result<Todo, StoreError> {
        let todo = self
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        todo.task = fields.task;
        todo.description = fields.description;
        tracing::debug!(%id, "updated todo");
        Ok(todo.clone())
    }

    pub fn destroy(&mut self, id: &str) -> Result<Todo, StoreError> {
        let parsed = TodoId::parse(id).ok_or_else(|| StoreError::not_found(id))?;
        self.destroy_by_id(parsed)
    }

    pub fn destroy_by_id(&mut self, id: TodoId) -> Result<Todo, StoreError> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        // `remove`, not `swap_remove`: survivors keep their order.
        let removed = self.todos.remove(index);
        tracing::debug!(%id, "deleted todo");
        Ok(removed)
    }

    /// Records whose id, task, or description exactly equals `term`, in list
    /// order. An empty term matches nothing; any other term, whitespace
    /// included, is compared as-is.
    pub fn search(&self, term: &str) -> Vec<Todo> {
        if term.is_empty() {
            return Vec::new();
        }
        let id = TodoId::parse(term);
        self.todos
            .iter()
            .filter(|todo| Some(todo.id) == id || todo.task == term || todo.description == term)
            .cloned()
            .collect()
    }
}
