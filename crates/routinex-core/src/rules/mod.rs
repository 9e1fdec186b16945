pub mod validation;

pub use validation::{
    normalize_routine_name, validate_new_entry, validate_patch, validated_routine_name,
};
