//! Shared testing utilities for evalctl CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    api_url: Option<String>,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir, api_url: None }
    }

    /// Point every command at `server`'s `/api/v1`.
    pub fn with_server(mut self, server: &mockito::Server) -> Self {
        self.api_url = Some(format!("{}/api/v1", server.url()));
        self
    }

    /// Path to the workspace directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `evalctl` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("evalctl").expect("Failed to locate evalctl binary");
        cmd.current_dir(&self.work_dir).env_remove("EVALCTL_API_URL").env("RUST_LOG", "off");
        if let Some(url) = &self.api_url {
            cmd.env("EVALCTL_API_URL", url);
        }
        cmd
    }

    /// Write a file relative to the work directory and return its path.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write a prompt template record as JSON.
    pub fn write_template(&self, name: &str, system_prompt: &str, user_prompt: &str) -> PathBuf {
        let record = serde_json::json!({
            "template_name": name,
            "system_prompt": system_prompt,
            "user_prompt": user_prompt,
        });
        self.write_file(&format!("{}.json", name), &record.to_string())
    }
}
