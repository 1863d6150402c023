use super::Error;

/// Error when a model schema definition is invalid.
///
/// This occurs when:
/// - A model has no partition key
/// - Two columns share a name
/// - A key column has a collection type
/// - An auto strategy is attached to a column that cannot hold it
///
/// These errors are caught while building the model, before any query runs.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::InvalidSchema(_)))
    }
}
