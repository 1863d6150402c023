mod adhoc;
mod condition_failed;
mod invalid_result;
mod invalid_schema;
mod invalid_statement;
mod record_not_found;
mod too_many_records;
mod type_conversion;
mod unsupported_feature;
mod validation;

use adhoc::AdhocError;
use condition_failed::ConditionFailedError;
use invalid_result::InvalidResult;
use invalid_schema::InvalidSchema;
use invalid_statement::InvalidStatement;
use record_not_found::RecordNotFoundError;
use std::sync::Arc;
use too_many_records::TooManyRecordsError;
use type_conversion::TypeConversionError;
use unsupported_feature::UnsupportedFeature;
use validation::ValidationError;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised by the manager, the query translator, or a driver.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: Arc<ErrorKind>,
    cause: Option<Error>,
}

impl Error {
    /// Wraps this error in `consequent`. The chain displays outermost first,
    /// ending with the root cause: `Person.update(): record not found: ...`.
    pub fn context(self, consequent: Error) -> Error {
        consequent.caused_by(self)
    }

    /// Appends `root` to the end of this error's chain.
    fn caused_by(self, root: Error) -> Error {
        let cause = match &self.inner.cause {
            Some(cause) => cause.clone().caused_by(root),
            None => root,
        };

        Error {
            inner: Arc::new(ErrorInner {
                kind: self.inner.kind.clone(),
                cause: Some(cause),
            }),
        }
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    /// Returns `true` if this error, or any error in its context chain,
    /// satisfies `f`.
    fn any(&self, f: impl Fn(&ErrorKind) -> bool) -> bool {
        self.chain().any(|err| f(&*err.inner.kind))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.inner.kind {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(&err.inner.kind, f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if f.alternate() {
            f.debug_list()
                .entries(self.chain().map(|err| &err.inner.kind))
                .finish()
        } else {
            core::fmt::Display::fmt(self, f)
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    TypeConversion(TypeConversionError),
    RecordNotFound(RecordNotFoundError),
    TooManyRecords(TooManyRecordsError),
    InvalidResult(InvalidResult),
    InvalidSchema(InvalidSchema),
    InvalidStatement(InvalidStatement),
    UnsupportedFeature(UnsupportedFeature),
    Validation(ValidationError),
    ConditionFailed(ConditionFailedError),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            RecordNotFound(err) => core::fmt::Display::fmt(err, f),
            TooManyRecords(err) => core::fmt::Display::fmt(err, f),
            InvalidResult(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            InvalidStatement(err) => core::fmt::Display::fmt(err, f),
            UnsupportedFeature(err) => core::fmt::Display::fmt(err, f),
            Validation(err) => core::fmt::Display::fmt(err, f),
            ConditionFailed(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(ErrorInner {
                kind: Arc::new(kind),
                cause: None,
            }),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}
