//! Generic CRUD over the admin API collections.

use std::path::Path;

use serde_json::Value;

use crate::app::AppContext;
use crate::domain::{AppError, Resource};
use crate::ports::ResourceApi;

/// A CRUD operation on one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceAction {
    List { query: Vec<(String, String)> },
    Get { id: String },
    Create { body: Value },
    Update { id: String, body: Value },
    Delete { id: String },
}

pub fn execute<A: ResourceApi>(
    ctx: &AppContext<A>,
    resource: Resource,
    action: &ResourceAction,
) -> Result<Value, AppError> {
    let api = ctx.api();
    match action {
        ResourceAction::List { query } => api.list(resource, query),
        ResourceAction::Get { id } => api.get(resource, id),
        ResourceAction::Create { body } => api.create(resource, body),
        ResourceAction::Update { id, body } => api.update(resource, id, body),
        ResourceAction::Delete { id } => api.delete(resource, id),
    }
}

/// Read a JSON request body. The body must be an object.
pub fn read_body(path: &Path) -> Result<Value, AppError> {
    let content = std::fs::read_to_string(path)?;
    let body: Value = serde_json::from_str(&content)?;
    if !body.is_object() {
        return Err(AppError::Validation(format!(
            "Request body in {} must be a JSON object",
            path.display()
        )));
    }
    Ok(body)
}

/// Parse `key=value` query pairs.
pub fn parse_query(pairs: &[String]) -> Result<Vec<(String, String)>, AppError> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(AppError::Validation(format!("Invalid query '{}': expected key=value", pair))),
        })
        .collect()
}
