use crate::application::repos::RepoError;

/// Translate sqlx failures into the repository error taxonomy. Postgres
/// reports constraint classes only through message text, so the matching
/// here is substring-based.
pub fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    let db = match err {
        sqlx::Error::RowNotFound => return RepoError::NotFound,
        sqlx::Error::Database(db) => db,
        other => return RepoError::from_persistence(other),
    };

    let message = db.message();
    if message.contains("duplicate key") {
        return RepoError::Duplicate {
            constraint: db.constraint().unwrap_or("unknown").to_string(),
        };
    }
    if message.contains("violates foreign key constraint")
        || message.contains("invalid input syntax")
    {
        return RepoError::InvalidInput {
            message: message.to_string(),
        };
    }
    if message.contains("violates") {
        return RepoError::Integrity {
            message: message.to_string(),
        };
    }
    if message.contains("canceling statement due to user request") {
        return RepoError::Timeout;
    }
    RepoError::Persistence(message.to_string())
}
