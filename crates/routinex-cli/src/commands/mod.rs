//! Subcommand handlers

pub mod routine;
pub mod seed;
pub mod stats;
pub mod workout;

use std::error::Error;

use routinex_core::errors::{ExError, ExErrorKind};
use routinex_core::model::{Actor, Role};
use rusqlite::Connection;
use serde::Serialize;

/// What every handler needs: the open database and the acting identity
pub struct Context {
    pub conn: Connection,
    actor: Option<Actor>,
}

impl Context {
    pub fn new(conn: Connection, actor_id: Option<String>, role: Role) -> Self {
        Self {
            conn,
            actor: actor_id.map(|id| Actor::new(id, role)),
        }
    }

    /// The acting identity, required by mutations and the admin ranking
    pub fn actor(&self) -> Result<&Actor, ExError> {
        self.actor.as_ref().ok_or_else(|| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("cli")
                .with_message("no acting user; pass --actor or set ROUTINEX_ACTOR")
        })
    }
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_deleted(id: &str) -> Result<(), Box<dyn Error>> {
    print_json(&serde_json::json!({ "deleted": id }))
}
