//! Command dispatch over a SQLite connection

use std::time::Instant;

use routinex_core::commands::{Command, CommandOutcome};
use routinex_core::model::Actor;
use routinex_core::ports::Collaborators;
use routinex_core::{log_op_end, log_op_start};
use routinex_store::errors::Result;
use routinex_store::SqliteStore;
use rusqlite::Connection;

use super::{elapsed_ms, fail};

/// Apply a core [`Command`] on behalf of `actor`
///
/// Logs under the command's own op name, so dispatching through here and
/// calling the matching handler directly produce the same events.
///
/// # Errors
///
/// Whatever the routed operation returns.
pub fn apply_engine_command(
    conn: &Connection,
    cmd: Command,
    actor: &Actor,
) -> Result<CommandOutcome> {
    let op = cmd.op_name();
    log_op_start!(op, actor_id = actor.id.as_str());
    let start = Instant::now();

    let store = SqliteStore::new(conn);
    let outcome = routinex_core::apply(Collaborators::from_store(&store), cmd, actor)
        .map_err(|e| fail(op, start, e))?;

    log_op_end!(op, duration_ms = elapsed_ms(start));
    Ok(outcome)
}
