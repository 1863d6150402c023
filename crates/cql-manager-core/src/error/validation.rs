use super::Error;

/// Error when caller-supplied input fails validation.
#[derive(Debug)]
pub(super) struct ValidationError {
    pub(super) kind: ValidationErrorKind,
}

#[derive(Debug)]
pub(super) enum ValidationErrorKind {
    /// The requested page size is not a positive integer
    PageSize { value: Box<str> },
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            ValidationErrorKind::PageSize { value } => {
                write!(f, "page size must be a positive integer; got `{value}`")
            }
        }
    }
}

impl Error {
    /// Creates a validation error for a page size that is zero, negative, or
    /// not a number.
    pub fn invalid_page_size(value: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::PageSize {
                value: value.into().into(),
            },
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::Validation(_)))
    }
}
