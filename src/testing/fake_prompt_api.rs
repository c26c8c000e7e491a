use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::prompt::{ChatRequest, ChatResponse};
use crate::domain::{AppError, PromptTemplate, SystemDefaults};
use crate::ports::PromptApi;

#[derive(Default)]
struct State {
    templates: HashMap<String, PromptTemplate>,
    defaults: SystemDefaults,
    defaults_requests: usize,
    chats: Vec<(String, ChatRequest)>,
}

/// In-memory prompt API. Clones share state.
#[derive(Clone, Default)]
pub struct FakePromptApi {
    state: Rc<RefCell<State>>,
}

impl FakePromptApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(self, template: PromptTemplate) -> Self {
        let id = template.id.clone().unwrap_or_default();
        self.state.borrow_mut().templates.insert(id, template);
        self
    }

    pub fn with_default(self, code: &str, content: &str) -> Self {
        self.state.borrow_mut().defaults.insert(code, content);
        self
    }

    pub fn defaults_requests(&self) -> usize {
        self.state.borrow().defaults_requests
    }

    pub fn last_chat(&self) -> Option<(String, ChatRequest)> {
        self.state.borrow().chats.last().cloned()
    }
}

impl PromptApi for FakePromptApi {
    fn template(&self, id: &str) -> Result<PromptTemplate, AppError> {
        self.state.borrow().templates.get(id).cloned().ok_or_else(|| AppError::Api {
            status: 404,
            detail: format!("Prompt template {} not found", id),
        })
    }

    fn system_defaults(&self, codes: &[&str]) -> Result<SystemDefaults, AppError> {
        let mut state = self.state.borrow_mut();
        state.defaults_requests += 1;
        Ok(codes
            .iter()
            .filter_map(|code| {
                state.defaults.get_code(code).map(|content| (code.to_string(), content.to_string()))
            })
            .collect())
    }

    fn chat(&self, model_id: &str, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.state.borrow_mut().chats.push((model_id.to_string(), request.clone()));
        Ok(ChatResponse { content: format!("generated by {}", model_id), raw_response: None })
    }
}
