use super::Error;
use crate::stmt::Value;

/// Error when a value cannot be converted to the expected type.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    pub(super) value: Value,
    pub(super) to_type: Box<str>,
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {:?} to {}", self.value, self.to_type)
    }
}

impl Error {
    /// Creates a type conversion error.
    ///
    /// Raised when a filter, cursor, or create value cannot be coerced to the
    /// column type it targets.
    pub fn type_conversion(value: Value, to_type: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
            value,
            to_type: to_type.into().into(),
        }))
    }

    /// Returns `true` if this error is a type conversion error.
    pub fn is_type_conversion(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::TypeConversion(_)))
    }
}
