//! Helpers for classifying database errors.

/// Returns true when `e` is a unique-constraint violation.
///
/// The `url` table has a single unique column, so any violation on insert is
/// an alias collision.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
