//! Analytics commands
//!
//! Usage: routinex stats workouts <USER> | routinex stats exercises

use clap::{Args, Subcommand};
use routinex_engine::commands::stats;

use super::{print_json, Context};

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: StatsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Statistics over one user's workout history
    Workouts { user_id: String },
    /// Global exercise usage ranking (admin only)
    Exercises,
}

pub fn execute(args: StatsArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        StatsCommand::Workouts { user_id } => {
            print_json(&stats::workout_stats(&ctx.conn, &user_id, ctx.actor()?)?)
        }
        StatsCommand::Exercises => print_json(&stats::exercise_ranking(&ctx.conn, ctx.actor()?)?),
    }
}
