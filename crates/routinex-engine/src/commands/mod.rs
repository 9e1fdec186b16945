//! Command handlers with boundary logging
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

pub mod engine_command;
pub mod routine;
pub mod seed;
pub mod stats;
pub mod workout;

use std::time::Instant;

use routinex_core::errors::ExError;
use routinex_core::log_op_error;

pub(crate) fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Canonicalize a failure of `op`, log it, and hand it back
///
/// Store errors keep the more specific op they were raised with.
pub(crate) fn fail(op: &'static str, start: Instant, err: impl Into<ExError>) -> ExError {
    let ex: ExError = err.into();
    let ex = if ex.op().is_some() { ex } else { ex.with_op(op) };
    log_op_error!(op, ex.clone(), duration_ms = elapsed_ms(start));
    ex
}

