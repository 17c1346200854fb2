//! Translation of pool and Diesel failures into [`RepositoryError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> RepositoryError {
    RepositoryError::connection(error.message())
}

/// Constraint violations become conflicts; a closed connection is a
/// connection failure; anything else is a query failure.
pub(super) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::conflict(info.constraint_name().map_or_else(
                || "unique constraint violated".to_owned(),
                |name| format!("unique constraint {name} violated"),
            ))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            RepositoryError::conflict(info.constraint_name().map_or_else(
                || "referenced record does not exist".to_owned(),
                |name| format!("foreign key {name} violated"),
            ))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        _ => RepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    struct Info(Option<&'static str>);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "violation"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info(constraint)))
    }

    #[rstest]
    fn unique_violation_names_the_constraint() {
        let mapped = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("app_users_username_key"),
        ));
        assert_eq!(
            mapped,
            RepositoryError::conflict("unique constraint app_users_username_key violated")
        );
    }

    #[rstest]
    fn foreign_key_violation_is_a_conflict() {
        let mapped = map_diesel_error(database_error(DatabaseErrorKind::ForeignKeyViolation, None));
        assert!(matches!(mapped, RepositoryError::Conflict { .. }));
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let mapped = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, None));
        assert!(matches!(mapped, RepositoryError::Connection { .. }));
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    #[case(database_error(DatabaseErrorKind::CheckViolation, None))]
    fn other_failures_are_query_errors(#[case] error: DieselError) {
        assert!(matches!(map_diesel_error(error), RepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            RepositoryError::connection("timed out")
        );
    }
}
