//! RoutineX CLI
//!
//! Command-line interface for routine composition and workout analytics

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use routinex_core::errors::ExError;
use routinex_core::logging_facility::{self, Profile};
use routinex_core::model::Role;
use routinex_core_types::{RequestId, TraceId};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "routinex")]
#[command(about = "RoutineX - Training routines and workout analytics", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "ROUTINEX_DB", default_value = ".routinex/store.db")]
    db: PathBuf,

    /// Logging profile (development or production)
    #[arg(long, global = true, env = "ROUTINEX_LOG", default_value = "development")]
    log: Profile,

    /// Acting user id
    #[arg(long, global = true, env = "ROUTINEX_ACTOR")]
    actor: Option<String>,

    /// Role of the acting user (client or admin)
    #[arg(long, global = true, env = "ROUTINEX_ROLE", default_value = "client")]
    role: Role,

    /// Upstream trace id attached to reported errors
    #[arg(long, global = true, env = "ROUTINEX_TRACE_ID")]
    trace_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Routine composition
    Routine(commands::routine::RoutineArgs),
    /// Workout logging
    Workout(commands::workout::WorkoutArgs),
    /// Workout statistics and exercise ranking
    Stats(commands::stats::StatsArgs),
    /// Register catalog exercises and known users
    Seed(commands::seed::SeedArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    logging_facility::init(cli.log);

    let conn = routinex_store::db::open(&cli.db)?;
    let ctx = commands::Context::new(conn, cli.actor, cli.role);

    match cli.command {
        Commands::Routine(args) => commands::routine::execute(args, &ctx),
        Commands::Workout(args) => commands::workout::execute(args, &ctx),
        Commands::Stats(args) => commands::stats::execute(args, &ctx),
        Commands::Seed(args) => commands::seed::execute(args, &ctx),
    }
}

fn main() {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let request_id = RequestId::new();

    let trace_id = cli.trace_id.clone().map(TraceId::from_string);

    if let Err(e) = run(cli) {
        match e.downcast::<ExError>() {
            Ok(ex) => {
                let mut ex = (*ex).with_request_id(request_id);
                if let Some(trace_id) = trace_id {
                    ex = ex.with_trace_id(trace_id);
                }
                eprintln!("Error: {}", ex)
            }
            Err(other) => eprintln!("Error: {}", other),
        }
        std::process::exit(1);
    }
}
