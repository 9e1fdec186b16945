//! Workout commands
//!
//! Usage: routinex workout <log|list|show|delete>

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use routinex_engine::commands::workout;

use super::{print_deleted, print_json, Context};

#[derive(Debug, Args)]
pub struct WorkoutArgs {
    #[command(subcommand)]
    pub command: WorkoutCommand,
}

#[derive(Debug, Subcommand)]
pub enum WorkoutCommand {
    /// Log a completed session of a routine
    Log {
        routine_id: String,
        /// Completion time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// List a user's workouts, oldest first (defaults to the acting user)
    List { user_id: Option<String> },
    Show { workout_id: String },
    Delete { workout_id: String },
}

pub fn execute(args: WorkoutArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let conn = &ctx.conn;
    match args.command {
        WorkoutCommand::Log { routine_id, at } => {
            print_json(&workout::workout_post(conn, &routine_id, at, ctx.actor()?)?)
        }
        WorkoutCommand::List { user_id } => {
            let actor = ctx.actor()?;
            let user_id = user_id.unwrap_or_else(|| actor.id.clone());
            print_json(&workout::workout_list(conn, &user_id, actor)?)
        }
        WorkoutCommand::Show { workout_id } => {
            print_json(&workout::workout_get(conn, &workout_id, ctx.actor()?)?)
        }
        WorkoutCommand::Delete { workout_id } => {
            workout::workout_delete(conn, &workout_id, ctx.actor()?)?;
            print_deleted(&workout_id)
        }
    }
}
