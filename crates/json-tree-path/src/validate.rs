//! Validation of user-typed pointer strings.

use thiserror::Error;

/// Longest pointer string accepted from user input.
pub const MAX_POINTER_LENGTH: usize = 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a pointer must be empty or start with '/'")]
    PointerInvalid,
    #[error("pointer is longer than {MAX_POINTER_LENGTH} bytes")]
    PointerTooLong,
}

/// Validate a pointer string before parsing it.
///
/// # Errors
///
/// Returns an error if:
/// - The pointer is non-empty but doesn't start with `/`
/// - The pointer exceeds [`MAX_POINTER_LENGTH`]
///
/// ```
/// use json_tree_path::validate_pointer;
///
/// assert!(validate_pointer("").is_ok());
/// assert!(validate_pointer("/users/0").is_ok());
/// assert!(validate_pointer("users").is_err());
/// ```
pub fn validate_pointer(pointer: &str) -> Result<(), ValidationError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(ValidationError::PointerInvalid);
    }
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(ValidationError::PointerTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_absolute_pointers_are_valid() {
        assert!(validate_pointer("").is_ok());
        assert!(validate_pointer("/").is_ok());
        assert!(validate_pointer("/a/b").is_ok());
    }

    #[test]
    fn relative_pointer_is_invalid() {
        assert_eq!(validate_pointer("a/b"), Err(ValidationError::PointerInvalid));
    }

    #[test]
    fn long_pointer_is_rejected() {
        let at_limit = "/".to_string() + &"x".repeat(MAX_POINTER_LENGTH - 1);
        assert!(validate_pointer(&at_limit).is_ok());
        let too_long = at_limit + "x";
        assert_eq!(validate_pointer(&too_long), Err(ValidationError::PointerTooLong));
    }
}
