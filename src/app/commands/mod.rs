pub mod job;
pub mod prompt;
pub mod resource;
