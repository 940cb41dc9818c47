use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for translation operations
///
/// Every failure raised while compiling a filter tree or converting a geometry
/// falls into exactly one of these categories, so callers can decide whether
/// to reject the whole request or skip a single item.
///
/// # Examples
///
/// ```rust
/// use stac_asf::errors::{ErrorKind, StacAsfError, StacAsfResult};
///
/// fn example() -> StacAsfResult<()> {
///     Err(StacAsfError::new("unknown operator 'like'", ErrorKind::UnsupportedOperator))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::UnsupportedOperator);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Filter Errors
    /// The filter tree does not have the `{op, args}` shape or the wrong arity
    MalformedFilter,
    /// The operator is unknown, or not allowed for the property's value kind
    UnsupportedOperator,
    /// The property has no backend field mapping
    UnsupportedProperty,
    /// The literal is well-typed but not one of the accepted values
    UnsupportedValue,
    /// The literal cannot be coerced to the property's value kind
    TypeCoercionError,
    /// A single-valued field was constrained to two different values
    ConflictingConstraint,

    // Geometry Errors
    /// A typed geometry accessor was called on a geometry of another type
    TypeMismatch,
    /// The coordinate tree does not match the declared geometry type
    MalformedCoordinates,
    /// The WKT text could not be segmented or parsed
    MalformedWkt,
    /// The geometry type is outside the supported subset
    UnsupportedGeometryType,
    /// The geometry holds no coordinate to compute a bounding box from
    NoValidCoordinates,
    /// Nothing was supplied where a value was required
    EmptyInput,
    /// A search request carries both a bbox and an intersects geometry
    AmbiguousSpatialTerm,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MalformedFilter => write!(f, "Malformed filter"),
            ErrorKind::UnsupportedOperator => write!(f, "Unsupported operator"),
            ErrorKind::UnsupportedProperty => write!(f, "Unsupported property"),
            ErrorKind::UnsupportedValue => write!(f, "Unsupported value"),
            ErrorKind::TypeCoercionError => write!(f, "Type coercion error"),
            ErrorKind::ConflictingConstraint => write!(f, "Conflicting constraint"),
            ErrorKind::TypeMismatch => write!(f, "Type mismatch"),
            ErrorKind::MalformedCoordinates => write!(f, "Malformed coordinates"),
            ErrorKind::MalformedWkt => write!(f, "Malformed WKT"),
            ErrorKind::UnsupportedGeometryType => write!(f, "Unsupported geometry type"),
            ErrorKind::NoValidCoordinates => write!(f, "No valid coordinates"),
            ErrorKind::EmptyInput => write!(f, "Empty input"),
            ErrorKind::AmbiguousSpatialTerm => write!(f, "Ambiguous spatial term"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type for the translation core.
///
/// `StacAsfError` carries a message, an [`ErrorKind`], an optional cause and
/// the backtrace captured where it was created.
///
/// # Examples
///
/// ```rust
/// use stac_asf::errors::{ErrorKind, StacAsfError};
///
/// let cause = StacAsfError::new("expected a list", ErrorKind::MalformedFilter);
/// let err = StacAsfError::new_with_cause("invalid 'in' node", ErrorKind::MalformedFilter, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct StacAsfError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<StacAsfError>>,
    backtrace: Backtrace,
}

impl StacAsfError {
    /// Creates a new `StacAsfError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        StacAsfError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new_unresolved(),
        }
    }

    /// Creates a new `StacAsfError` that wraps the error which caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: StacAsfError) -> Self {
        StacAsfError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new_unresolved(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&StacAsfError> {
        self.cause.as_deref()
    }
}

impl Display for StacAsfError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_kind, self.message)
    }
}

impl Debug for StacAsfError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self, cause),
            None => {
                let mut backtrace = self.backtrace.clone();
                backtrace.resolve();
                write!(f, "{}\n{:?}", self, backtrace)
            }
        }
    }
}

impl Error for StacAsfError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for translation operations.
pub type StacAsfResult<T> = Result<T, StacAsfError>;

impl From<serde_json::Error> for StacAsfError {
    fn from(err: serde_json::Error) -> Self {
        StacAsfError::new(
            &format!("filter is not valid JSON: {}", err),
            ErrorKind::MalformedFilter,
        )
    }
}

impl From<std::fmt::Error> for StacAsfError {
    fn from(err: std::fmt::Error) -> Self {
        StacAsfError::new(
            &format!("Formatting error: {}", err),
            ErrorKind::InternalError,
        )
    }
}
