use super::Error;

/// Error when a statement cannot be executed against the model.
///
/// This occurs when:
/// - A filter or lookup key references a column the model does not have
/// - A pagination cursor is shorter than the partition key
/// - A predicate needs `ALLOW FILTERING` but the query did not opt in
/// - An update assigns to a primary key column
///
/// These are query-layer errors; the manager never catches them.
#[derive(Debug)]
pub(super) struct InvalidStatement {
    pub(super) message: Box<str>,
}

impl std::error::Error for InvalidStatement {}

impl core::fmt::Display for InvalidStatement {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid statement: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid statement error.
    pub fn invalid_statement(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidStatement(InvalidStatement {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid statement error.
    pub fn is_invalid_statement(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::InvalidStatement(_)))
    }
}
