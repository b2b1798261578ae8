//! Request builder and response parser for the todos API.
//!
//! Every route returns 200 on success; delete also tolerates 204 for servers
//! that answer without a body.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Todo, TodoFields, TodoList};

/// Stateless client for the todos API.
///
/// The caller executes the HTTP round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    fn member_url(&self, id: u64) -> String {
        format!("{}/api/todos/{id}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        get(self.collection_url())
    }

    pub fn build_search_todos(&self, term: &str) -> HttpRequest {
        get(format!(
            "{}/search?q={}",
            self.collection_url(),
            urlencoding::encode(term)
        ))
    }

    pub fn build_get_todo(&self, id: u64) -> HttpRequest {
        get(self.member_url(id))
    }

    pub fn build_create_todo(&self, input: &TodoFields) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_todo(&self, id: u64, input: &TodoFields) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Put, self.member_url(id), input)
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.member_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, &[200])?;
        decode::<TodoList>(&response).map(|list| list.todos)
    }

    pub fn parse_search_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        self.parse_list_todos(response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    /// Returns the deleted todo when the server echoes it, `None` on an
    /// empty body.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        check_status(&response, &[200, 204])?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        decode(&response).map(Some)
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json(method: HttpMethod, path: String, input: &TodoFields) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_search_todos_encodes_term() {
        let req = client().build_search_todos("surf & turf");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:3000/api/todos/search?q=surf%20%26%20turf"
        );
    }

    #[test]
    fn build_get_todo_produces_correct_request() {
        let req = client().build_get_todo(3);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/todos/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_todo_sends_json() {
        let req = client()
            .build_create_todo(&TodoFields::new("Laundry", "Wash clothes"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/todos");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"task": "Laundry", "description": "Wash clothes"})
        );
    }

    #[test]
    fn build_update_todo_sends_both_fields() {
        let req = client()
            .build_update_todo(2, &TodoFields::new("Updated", ""))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/todos/2");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["task"], "Updated");
        assert_eq!(body["description"], "");
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo(1);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/todos/1");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_todos_unwraps_envelope() {
        let response = HttpResponse::new(
            200,
            r#"{"todos":[{"_id":1,"task":"Test","description":"Desc"}]}"#,
        );
        let todos = client().parse_list_todos(response).unwrap();
        assert_eq!(
            todos,
            vec![Todo {
                id: 1,
                task: "Test".to_string(),
                description: "Desc".to_string(),
            }]
        );
    }

    #[test]
    fn parse_list_todos_rejects_bare_array() {
        let response = HttpResponse::new(200, "[]");
        let err = client().parse_list_todos(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_search_todos_empty() {
        let response = HttpResponse::new(200, r#"{"todos":[]}"#);
        assert!(client().parse_search_todos(response).unwrap().is_empty());
    }

    #[test]
    fn parse_get_todo_not_found() {
        let response = HttpResponse::new(404, r#"{"error":"todo 9 not found"}"#);
        let err = client().parse_get_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_todo_success() {
        let response = HttpResponse::new(200, r#"{"_id":4,"task":"New","description":""}"#);
        let todo = client().parse_create_todo(response).unwrap();
        assert_eq!(todo.id, 4);
        assert_eq!(todo.task, "New");
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let response = HttpResponse::new(500, "internal error");
        let err = client().parse_create_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
        assert_eq!(err.to_string(), "HTTP 500: internal error");
    }

    #[test]
    fn parse_update_todo_success() {
        let response =
            HttpResponse::new(200, r#"{"_id":1,"task":"Updated","description":"Again"}"#);
        let todo = client().parse_update_todo(response).unwrap();
        assert_eq!(todo.task, "Updated");
        assert_eq!(todo.description, "Again");
    }

    #[test]
    fn parse_delete_todo_echoes_removed_record() {
        let response = HttpResponse::new(200, r#"{"_id":1,"task":"Gone","description":""}"#);
        let removed = client().parse_delete_todo(response).unwrap();
        assert_eq!(removed.map(|todo| todo.id), Some(1));
    }

    #[test]
    fn parse_delete_todo_accepts_no_content() {
        let response = HttpResponse::new(204, "");
        assert_eq!(client().parse_delete_todo(response).unwrap(), None);
    }

    #[test]
    fn parse_delete_todo_not_found() {
        let response = HttpResponse::new(404, "");
        let err = client().parse_delete_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        assert_eq!(client.build_list_todos().path, "http://localhost:3000/api/todos");
    }
}
