//! Migration framework
//!
//! - Embedded SQL migrations, applied in order
//! - One transaction per migration
//! - SHA-256 checksums recorded and re-verified on every run

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
