//! Fixture commands for the exercise catalog and user directory
//!
//! Usage: routinex seed exercise <ID> <NAME> | routinex seed user <ID>

use clap::{Args, Subcommand};
use routinex_engine::commands::seed;

use super::{print_json, Context};

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Add or rename a catalog exercise
    Exercise { exercise_id: String, name: String },
    /// Register a known user
    User { user_id: String },
}

pub fn execute(args: SeedArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        SeedCommand::Exercise { exercise_id, name } => {
            seed::exercise_register(&ctx.conn, &exercise_id, &name)?;
            print_json(&serde_json::json!({ "exercise_id": exercise_id, "name": name }))
        }
        SeedCommand::User { user_id } => {
            seed::user_register(&ctx.conn, &user_id)?;
            print_json(&serde_json::json!({ "user_id": user_id }))
        }
    }
}
