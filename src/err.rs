/// Errors surfaced by the data layer.
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    /// storage failure, including nullability and foreign-key violations
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    /// applying the checked-in schema failed
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    /// filesystem failure while locating or creating the database file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// rejected admin-form input
    #[error("invalid form input: {0}")]
    InvalidForm(String),
}

impl DataError {
    /// whether the error is a foreign-key constraint refusal, i.e. a
    /// protected row still has dependents
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            DataError::Sqlx(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some("787")
                    || db_err.code().as_deref() == Some("1811")
                    || db_err.code().as_deref() == Some("19")
            }
            _ => false,
        }
    }
}
