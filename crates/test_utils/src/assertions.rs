//! Custom Test Assertions
//!
//! Specialized assertion helpers for validation results that give more
//! meaningful failure messages than standard assertions.

use domain_card::ValidationError;

/// Asserts that an error list contains an error for the given field path
///
/// # Panics
///
/// Panics with the full error list when no error targets the field
pub fn assert_field_error(errors: &[ValidationError], field: &str) {
    assert!(
        errors.iter().any(|e| e.field == field),
        "expected an error on field `{field}`, got: {errors:?}"
    );
}

/// Asserts that an error list has no error for the given field path
pub fn assert_no_field_error(errors: &[ValidationError], field: &str) {
    assert!(
        errors.iter().all(|e| e.field != field),
        "expected no error on field `{field}`, got: {errors:?}"
    );
}

/// Asserts that the error for a field carries the exact message
pub fn assert_field_message(errors: &[ValidationError], field: &str, message: &str) {
    let found: Vec<_> = errors.iter().filter(|e| e.field == field).collect();
    assert!(
        !found.is_empty(),
        "expected an error on field `{field}`, got: {errors:?}"
    );
    assert!(
        found.iter().any(|e| e.message == message),
        "field `{field}` errors {found:?} do not include `{message}`"
    );
}
