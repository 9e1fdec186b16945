pub mod routine_ops;
pub mod store;
pub mod workout_ops;

pub use store::MemoryStore;
