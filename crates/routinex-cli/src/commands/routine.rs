//! Routine commands
//!
//! Usage: routinex routine <create|list|show|add-exercise|update-exercise|remove-exercise|rename|delete>

use clap::{Args, Subcommand};
use routinex_core::model::{EntryPatch, NewExerciseEntry};
use routinex_engine::commands::routine;

use super::{print_deleted, print_json, Context};

#[derive(Debug, Args)]
pub struct RoutineArgs {
    #[command(subcommand)]
    pub command: RoutineCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoutineCommand {
    /// Create a routine owned by the acting user
    Create { name: String },
    /// List every routine
    List,
    /// Show one routine
    Show { routine_id: String },
    /// Append an exercise entry
    AddExercise {
        routine_id: String,
        exercise_id: String,
        #[arg(long)]
        reps: u32,
        #[arg(long)]
        series: u32,
        #[arg(long, default_value_t = 0.0)]
        weight: f64,
    },
    /// Change the supplied fields of an exercise entry
    UpdateExercise {
        routine_id: String,
        exercise_id: String,
        #[arg(long)]
        reps: Option<u32>,
        #[arg(long)]
        series: Option<u32>,
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Remove an exercise entry
    RemoveExercise {
        routine_id: String,
        exercise_id: String,
    },
    Rename {
        routine_id: String,
        new_name: String,
    },
    Delete { routine_id: String },
}

pub fn execute(args: RoutineArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let conn = &ctx.conn;
    match args.command {
        RoutineCommand::Create { name } => {
            print_json(&routine::routine_create(conn, &name, ctx.actor()?)?)
        }
        RoutineCommand::List => print_json(&routine::routine_list(conn, ctx.actor()?)?),
        RoutineCommand::Show { routine_id } => {
            print_json(&routine::routine_get(conn, &routine_id, ctx.actor()?)?)
        }
        RoutineCommand::AddExercise {
            routine_id,
            exercise_id,
            reps,
            series,
            weight,
        } => {
            let entry = NewExerciseEntry::new(exercise_id, reps, series, weight);
            print_json(&routine::exercise_entry_add(
                conn,
                &routine_id,
                entry,
                ctx.actor()?,
            )?)
        }
        RoutineCommand::UpdateExercise {
            routine_id,
            exercise_id,
            reps,
            series,
            weight,
        } => {
            let patch = EntryPatch {
                repetitions: reps,
                series,
                weight,
            };
            print_json(&routine::exercise_entry_update(
                conn,
                &routine_id,
                &exercise_id,
                &patch,
                ctx.actor()?,
            )?)
        }
        RoutineCommand::RemoveExercise {
            routine_id,
            exercise_id,
        } => print_json(&routine::exercise_entry_remove(
            conn,
            &routine_id,
            &exercise_id,
            ctx.actor()?,
        )?),
        RoutineCommand::Rename {
            routine_id,
            new_name,
        } => print_json(&routine::routine_rename(
            conn,
            &routine_id,
            &new_name,
            ctx.actor()?,
        )?),
        RoutineCommand::Delete { routine_id } => {
            routine::routine_delete(conn, &routine_id, ctx.actor()?)?;
            print_deleted(&routine_id)
        }
    }
}
