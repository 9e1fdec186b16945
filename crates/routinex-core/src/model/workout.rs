use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record that a user performed a routine at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,

    pub user_id: String,

    pub routine_id: String,

    /// Routine name captured when the workout was logged.
    /// Not updated when the routine is later renamed or deleted.
    pub routine_name: String,

    /// Completion timestamp
    pub done_at: DateTime<Utc>,
}

impl Workout {
    pub fn new(
        id: String,
        user_id: String,
        routine_id: String,
        routine_name: String,
        done_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            routine_id,
            routine_name,
            done_at,
        }
    }

    pub fn is_owned_by(&self, actor_id: &str) -> bool {
        self.user_id == actor_id
    }
}
