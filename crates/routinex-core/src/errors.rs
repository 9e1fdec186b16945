use routinex_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using RoutineXError
pub type Result<T> = std::result::Result<T, RoutineXError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the core falls into exactly one of these kinds.
/// Each kind maps to a stable error code that callers can match on when
/// translating failures into their own transport (status codes, exit codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    /// Caller-supplied data violates a shape or value constraint
    InvalidInput,
    /// Referenced routine, exercise, entry, workout or user does not exist
    NotFound,
    /// Actor lacks the ownership or role a mutation requires
    Forbidden,
    /// Uniqueness violation, or a mutation that reported zero effect
    Conflict,
    /// Underlying store failed unexpectedly
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification used for programmatic handling plus the
/// context (operation, entity, correlation ids) used when reporting.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        if let Some(trace_id) = &self.trace_id {
            write!(f, " (trace_id: {})", trace_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for routine and workout operations
#[derive(Error, Debug, Clone)]
pub enum RoutineXError {
    // ===== Validation =====
    /// Routine name is empty after trimming
    #[error("Routine name cannot be empty")]
    EmptyRoutineName,

    /// Creator identity is empty
    #[error("Creator id cannot be empty")]
    EmptyCreator,

    /// An exercise entry field violates its range
    #[error("Invalid {field}: {reason}")]
    InvalidEntryField { field: &'static str, reason: String },

    /// A partial update supplied no field at all
    #[error("No fields supplied to update for exercise {exercise_id}")]
    EmptyEntryPatch { exercise_id: String },

    /// Rename target equals the current (normalized) name
    #[error("New name for routine {routine_id} equals the current name")]
    RenameToSameName { routine_id: String },

    /// Role string is not one of the known roles
    #[error("Unknown role: {role}")]
    UnknownRole { role: String },

    // ===== Lookup =====
    #[error("Routine not found: {routine_id}")]
    RoutineNotFound { routine_id: String },

    #[error("Exercise not found: {exercise_id}")]
    ExerciseNotFound { exercise_id: String },

    /// The routine exists but has no entry for this exercise
    #[error("Exercise {exercise_id} is not part of routine {routine_id}")]
    EntryNotInRoutine {
        routine_id: String,
        exercise_id: String,
    },

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("Workout not found: {workout_id}")]
    WorkoutNotFound { workout_id: String },

    // ===== Authorization =====
    #[error("Actor {actor_id} is not the owner of routine {routine_id}")]
    NotRoutineOwner {
        routine_id: String,
        actor_id: String,
    },

    #[error("Actor {actor_id} is not the owner of workout {workout_id}")]
    NotWorkoutOwner {
        workout_id: String,
        actor_id: String,
    },

    #[error("Operation {op} requires the admin role")]
    AdminRequired { op: &'static str },

    // ===== Conflicts =====
    #[error("A routine named '{name}' already exists")]
    DuplicateRoutineName { name: String },

    /// Store reported zero effect after the entity was confirmed to exist
    #[error("{op} had no effect on {entity_id}")]
    NoEffect { op: &'static str, entity_id: String },

    // ===== Store =====
    #[error("Store failure: {0}")]
    Store(#[from] ExError),
}

impl RoutineXError {
    /// Classify this error into the canonical kind taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            RoutineXError::EmptyRoutineName
            | RoutineXError::EmptyCreator
            | RoutineXError::InvalidEntryField { .. }
            | RoutineXError::EmptyEntryPatch { .. }
            | RoutineXError::RenameToSameName { .. }
            | RoutineXError::UnknownRole { .. } => ExErrorKind::InvalidInput,

            RoutineXError::RoutineNotFound { .. }
            | RoutineXError::ExerciseNotFound { .. }
            | RoutineXError::EntryNotInRoutine { .. }
            | RoutineXError::UserNotFound { .. }
            | RoutineXError::WorkoutNotFound { .. } => ExErrorKind::NotFound,

            RoutineXError::NotRoutineOwner { .. }
            | RoutineXError::NotWorkoutOwner { .. }
            | RoutineXError::AdminRequired { .. } => ExErrorKind::Forbidden,

            RoutineXError::DuplicateRoutineName { .. } | RoutineXError::NoEffect { .. } => {
                ExErrorKind::Conflict
            }

            RoutineXError::Store(err) => err.kind(),
        }
    }

    fn entity_id(&self) -> Option<&str> {
        match self {
            RoutineXError::RenameToSameName { routine_id }
            | RoutineXError::RoutineNotFound { routine_id }
            | RoutineXError::EntryNotInRoutine { routine_id, .. }
            | RoutineXError::NotRoutineOwner { routine_id, .. } => Some(routine_id),
            RoutineXError::EmptyEntryPatch { exercise_id }
            | RoutineXError::ExerciseNotFound { exercise_id } => Some(exercise_id),
            RoutineXError::UserNotFound { user_id } => Some(user_id),
            RoutineXError::WorkoutNotFound { workout_id }
            | RoutineXError::NotWorkoutOwner { workout_id, .. } => Some(workout_id),
            RoutineXError::DuplicateRoutineName { name } => Some(name),
            RoutineXError::NoEffect { entity_id, .. } => Some(entity_id),
            _ => None,
        }
    }
}

impl From<RoutineXError> for ExError {
    fn from(err: RoutineXError) -> Self {
        if let RoutineXError::Store(inner) = err {
            return inner;
        }

        let mut ex = ExError::new(err.kind()).with_message(err.to_string());
        if let Some(id) = err.entity_id() {
            ex = ex.with_entity_id(id);
        }
        ex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_stable() {
        assert_eq!(ExErrorKind::InvalidInput.code(), "ERR_INVALID_INPUT");
        assert_eq!(ExErrorKind::NotFound.code(), "ERR_NOT_FOUND");
        assert_eq!(ExErrorKind::Forbidden.code(), "ERR_FORBIDDEN");
        assert_eq!(ExErrorKind::Conflict.code(), "ERR_CONFLICT");
        assert_eq!(ExErrorKind::Internal.code(), "ERR_INTERNAL");
    }

    #[test]
    fn test_domain_errors_classify() {
        assert_eq!(
            RoutineXError::EmptyRoutineName.kind(),
            ExErrorKind::InvalidInput
        );
        assert_eq!(
            RoutineXError::EntryNotInRoutine {
                routine_id: "r1".to_string(),
                exercise_id: "e1".to_string(),
            }
            .kind(),
            ExErrorKind::NotFound
        );
        assert_eq!(
            RoutineXError::AdminRequired { op: "x" }.kind(),
            ExErrorKind::Forbidden
        );
        assert_eq!(
            RoutineXError::NoEffect {
                op: "delete_routine",
                entity_id: "r1".to_string(),
            }
            .kind(),
            ExErrorKind::Conflict
        );
    }

    #[test]
    fn test_conversion_carries_entity_id() {
        let ex: ExError = RoutineXError::NotRoutineOwner {
            routine_id: "r1".to_string(),
            actor_id: "u2".to_string(),
        }
        .into();

        assert_eq!(ex.kind(), ExErrorKind::Forbidden);
        assert_eq!(ex.entity_id(), Some("r1"));
        assert!(ex.message().contains("u2"));
    }

    #[test]
    fn test_store_error_passes_through_unchanged() {
        let inner = ExError::new(ExErrorKind::Internal)
            .with_op("sqlite")
            .with_message("disk I/O error");
        let ex: ExError = RoutineXError::Store(inner).into();

        assert_eq!(ex.kind(), ExErrorKind::Internal);
        assert_eq!(ex.op(), Some("sqlite"));
        assert_eq!(ex.message(), "disk I/O error");
    }

    #[test]
    fn test_display_includes_code_and_op() {
        let ex = ExError::new(ExErrorKind::NotFound)
            .with_op("get_routine")
            .with_message("Routine not found: r9");
        let rendered = ex.to_string();
        assert!(rendered.starts_with("[ERR_NOT_FOUND]"));
        assert!(rendered.contains("get_routine"));
    }

    #[test]
    fn test_request_id_attached() {
        let rid = RequestId::from_string("req-1".to_string());
        let ex = ExError::new(ExErrorKind::Internal).with_request_id(rid.clone());
        assert_eq!(ex.request_id(), Some(&rid));
        assert!(ex.to_string().contains("req-1"));
    }
}
