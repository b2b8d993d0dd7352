//! Shared error mapping for the sqlx persistence layer

use application::error::ApplicationError;

/// Map a sqlx error to an application-layer error
///
/// Connectivity problems become `StorageUnavailable`; anything the database
/// itself rejected is `Internal`.
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    match e {
        sqlx::Error::RowNotFound => {
            ApplicationError::NotFound("Database record not found".to_string())
        },
        sqlx::Error::PoolTimedOut => {
            ApplicationError::StorageUnavailable("Timed out waiting for a connection".to_string())
        },
        sqlx::Error::PoolClosed => {
            ApplicationError::StorageUnavailable("Connection pool is closed".to_string())
        },
        sqlx::Error::Io(io) => ApplicationError::StorageUnavailable(format!("I/O error: {io}")),
        sqlx::Error::WorkerCrashed => {
            ApplicationError::StorageUnavailable("Database worker crashed".to_string())
        },
        sqlx::Error::Database(db_err) => {
            ApplicationError::Internal(format!("Database error: {db_err}"))
        },
        other => ApplicationError::Internal(format!("Database error: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use application::ErrorKind;

    use super::*;

    #[test]
    fn row_not_found_is_not_found() {
        assert_eq!(map_sqlx_error(sqlx::Error::RowNotFound).kind(), ErrorKind::NotFound);
    }

    #[test]
    fn pool_problems_are_unavailable() {
        assert_eq!(
            map_sqlx_error(sqlx::Error::PoolTimedOut).kind(),
            ErrorKind::StorageUnavailable
        );
        assert_eq!(
            map_sqlx_error(sqlx::Error::PoolClosed).kind(),
            ErrorKind::StorageUnavailable
        );
    }

    #[test]
    fn io_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err = map_sqlx_error(sqlx::Error::Io(io));
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn decode_problems_are_internal() {
        let err = map_sqlx_error(sqlx::Error::ColumnNotFound("lat".to_string()));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
