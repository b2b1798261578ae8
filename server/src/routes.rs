//! The six `/api/todos` routes.
//!
//! Handlers take the shared store from router state, do one store call under
//! the lock and serialize the result. Bodies for POST and PUT may be
//! form-encoded or JSON; see [`TodoBody`].

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, FromRequest, FromRequestParts, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, request::Parts},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::store::{SharedStore, StoreError, Todo, TodoFields};

/// Response envelope for the index and search routes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/api/todos", get(index).post(create))
        .route("/api/todos/search", get(search))
        .route("/api/todos/{id}", get(show).put(update).delete(destroy))
        .with_state(store)
}

/// The `{id}` path segment as text.
///
/// A segment axum cannot decode (invalid UTF-8 after percent-decoding) is a
/// malformed id and answers 404 like any other unknown id.
#[derive(Debug)]
pub struct TodoPath(pub String);

impl<S> FromRequestParts<S> for TodoPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(TodoPath(id)),
            Err(_) => {
                let raw = parts.uri.path().rsplit('/').next().unwrap_or_default();
                Err(StoreError::NotFound { id: raw.to_string() }.into())
            }
        }
    }
}

/// POST/PUT body decoded into [`TodoFields`].
///
/// `application/json` bodies go through `Json`, form bodies through `Form`.
/// With any other content type an empty body is accepted as all-empty fields
/// and a non-empty one is rejected.
#[derive(Debug)]
pub struct TodoBody(pub TodoFields);

impl<S> FromRequest<S> for TodoBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(fields) = Json::<TodoFields>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            return Ok(TodoBody(fields));
        }
        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<TodoFields>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            return Ok(TodoBody(fields));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        if body.is_empty() {
            Ok(TodoBody(TodoFields::default()))
        } else {
            Err(ApiError::BadRequest(format!(
                "unsupported content type {content_type:?}; send JSON or a form body"
            )))
        }
    }
}

async fn index(State(store): State<SharedStore>) -> Json<TodoList> {
    let store = store.read().await;
    Json(TodoList {
        todos: store.list().to_vec(),
    })
}

async fn search(
    State(store): State<SharedStore>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<TodoList> {
    // First `q` wins; an undecodable query string searches for nothing.
    let term = query
        .ok()
        .and_then(|Query(pairs)| pairs.into_iter().find(|(key, _)| key == "q"))
        .map(|(_, value)| value)
        .unwrap_or_default();
    let todos = store.read().await.search(&term);
    tracing::debug!(term = %term, hits = todos.len(), "searched todos");
    Json(TodoList { todos })
}

async fn create(State(store): State<SharedStore>, TodoBody(fields): TodoBody) -> Json<Todo> {
    Json(store.write().await.create(fields))
}

async fn show(
    State(store): State<SharedStore>,
    TodoPath(id): TodoPath,
) -> Result<Json<Todo>, ApiError> {
    let store = store.read().await;
    Ok(Json(store.find(&id)?.clone()))
}

async fn update(
    State(store): State<SharedStore>,
    TodoPath(id): TodoPath,
    TodoBody(fields): TodoBody,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(store.write().await.update(&id, fields)?))
}

async fn destroy(
    State(store): State<SharedStore>,
    TodoPath(id): TodoPath,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(store.write().await.destroy(&id)?))
}
