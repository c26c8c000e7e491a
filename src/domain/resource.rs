//! Entity collections exposed by the admin API.

use std::fmt;

use crate::domain::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Permissions,
    Roles,
    Users,
    AiModels,
    PromptTemplates,
    PromptUseCases,
    SystemConfigs,
    Examples,
    TestTasks,
    Evaluations,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Permissions,
        Resource::Roles,
        Resource::Users,
        Resource::AiModels,
        Resource::PromptTemplates,
        Resource::PromptUseCases,
        Resource::SystemConfigs,
        Resource::Examples,
        Resource::TestTasks,
        Resource::Evaluations,
    ];

    /// Collection path segment.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Permissions => "permissions",
            Resource::Roles => "roles",
            Resource::Users => "users",
            Resource::AiModels => "ai-models",
            Resource::PromptTemplates => "prompt-templates",
            Resource::PromptUseCases => "prompt-use-cases",
            Resource::SystemConfigs => "system-configs",
            Resource::Examples => "examples",
            Resource::TestTasks => "test-tasks",
            Resource::Evaluations => "evaluations",
        }
    }

    pub fn parse(name: &str) -> Result<Self, AppError> {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        Resource::ALL.into_iter().find(|resource| resource.path() == normalized).ok_or_else(|| {
            let available: Vec<&str> = Resource::ALL.iter().map(Resource::path).collect();
            AppError::UnknownResource(name.to_string(), available.join(", "))
        })
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
