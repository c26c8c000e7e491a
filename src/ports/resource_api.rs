//! Generic CRUD port over the admin API collections.

use serde_json::Value;

use crate::domain::{AppError, Resource};

/// Pass-through access to entity collections. Records are opaque JSON.
pub trait ResourceApi {
    fn list(&self, resource: Resource, query: &[(String, String)]) -> Result<Value, AppError>;

    fn get(&self, resource: Resource, id: &str) -> Result<Value, AppError>;

    fn create(&self, resource: Resource, body: &Value) -> Result<Value, AppError>;

    fn update(&self, resource: Resource, id: &str, body: &Value) -> Result<Value, AppError>;

    fn delete(&self, resource: Resource, id: &str) -> Result<Value, AppError>;
}
