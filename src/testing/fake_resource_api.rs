use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};

use crate::domain::{AppError, Resource};
use crate::ports::ResourceApi;

/// Records each call as `METHOD path[?query]` and echoes bodies back.
#[derive(Clone, Default)]
pub struct FakeResourceApi {
    calls: Rc<RefCell<Vec<String>>>,
}

impl FakeResourceApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl ResourceApi for FakeResourceApi {
    fn list(&self, resource: Resource, query: &[(String, String)]) -> Result<Value, AppError> {
        let query: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        if query.is_empty() {
            self.record(format!("GET {}", resource.path()));
        } else {
            self.record(format!("GET {}?{}", resource.path(), query.join("&")));
        }
        Ok(json!({ "items": [], "total": 0 }))
    }

    fn get(&self, resource: Resource, id: &str) -> Result<Value, AppError> {
        self.record(format!("GET {}/{}", resource.path(), id));
        Ok(json!({ "id": id }))
    }

    fn create(&self, resource: Resource, body: &Value) -> Result<Value, AppError> {
        self.record(format!("POST {}", resource.path()));
        Ok(body.clone())
    }

    fn update(&self, resource: Resource, id: &str, body: &Value) -> Result<Value, AppError> {
        self.record(format!("PUT {}/{}", resource.path(), id));
        Ok(body.clone())
    }

    fn delete(&self, resource: Resource, id: &str) -> Result<Value, AppError> {
        self.record(format!("DELETE {}/{}", resource.path(), id));
        Ok(json!({ "success": true }))
    }
}
