use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::app::commands::resource::{self, ResourceAction, parse_query, read_body};
use crate::domain::{AppError, Resource};

#[derive(Subcommand)]
pub enum ResourceCommands {
    /// List records of a collection
    List {
        resource: String,
        /// Query parameter as key=value (repeatable)
        #[arg(long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,
    },
    /// Show one record
    Get { resource: String, id: String },
    /// Create a record from a JSON file
    Create {
        resource: String,
        #[arg(long, value_name = "PATH")]
        data: PathBuf,
    },
    /// Replace fields of a record from a JSON file
    Update {
        resource: String,
        id: String,
        #[arg(long, value_name = "PATH")]
        data: PathBuf,
    },
    /// Delete a record
    Delete { resource: String, id: String },
}

pub fn run_resource(config: Option<&Path>, command: ResourceCommands) -> Result<(), AppError> {
    let (name, action) = match command {
        ResourceCommands::List { resource, query } => {
            (resource, ResourceAction::List { query: parse_query(&query)? })
        }
        ResourceCommands::Get { resource, id } => (resource, ResourceAction::Get { id }),
        ResourceCommands::Create { resource, data } => {
            (resource, ResourceAction::Create { body: read_body(&data)? })
        }
        ResourceCommands::Update { resource, id, data } => {
            (resource, ResourceAction::Update { id, body: read_body(&data)? })
        }
        ResourceCommands::Delete { resource, id } => (resource, ResourceAction::Delete { id }),
    };

    let resource = Resource::parse(&name)?;
    let ctx = super::connect(config)?;
    super::print_json(&resource::execute(&ctx, resource, &action)?)
}
