use std::fmt;

#[derive(Debug)]
pub enum RepositoryError {
    DatabaseError(rusqlite::Error),
    // A row that was read successfully but holds unusable values
    InvalidRecord { table: &'static str, entry: u32 },
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::DatabaseError(e) => write!(f, "database error: {}", e),
            RepositoryError::InvalidRecord { table, entry } => {
                write!(f, "invalid record {} in table {}", entry, table)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

impl From<rusqlite::Error> for RepositoryError {
    fn from(error: rusqlite::Error) -> RepositoryError {
        RepositoryError::DatabaseError(error)
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
