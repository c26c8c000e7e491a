pub mod cli;
pub mod commands;
mod context;
pub mod poller;

pub use context::AppContext;
