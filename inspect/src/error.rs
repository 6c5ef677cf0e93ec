use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error produced by a [`RawValue`](crate::RawValue) marshaller.
pub type ValueError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("trying to write to a reading inspector")]
    ReaderCantWrite,

    #[error("trying to read from a writing inspector")]
    WriterCantRead,

    #[error("field not present: `{0}`")]
    NoField(String),

    #[error("expected field `{expected}`, found `{found}`")]
    WrongField { expected: String, found: String },

    #[error("property access outside of an object")]
    NotAnObject,

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
    },

    #[error("end of a structure that was never begun")]
    UnbalancedEnd,

    #[error("object contains more fields than requested")]
    ObjectTooBig,

    #[error("array contains more items than were read")]
    ArrayTooBig,

    #[error("map contains more items than were read")]
    MapTooBig,

    #[error("invalid length prefix: {0}")]
    InvalidLength(i64),

    #[error("collection of {length} elements exceeds the limit of {limit}")]
    CollectionTooLong { length: usize, limit: usize },

    #[error("value {value} does not fit in {target}")]
    OutOfRange { value: i64, target: &'static str },

    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("short write: expected {expected} bytes, wrote {written}")]
    ShortWrite { expected: usize, written: usize },

    #[error("varint overflows a 64-bit integer")]
    VarintOverflow,

    #[error("non-finite float {0} cannot be represented as text")]
    NonFiniteFloat(f64),

    #[error("invalid UTF-8 in string payload")]
    Utf8(#[source] std::string::FromUtf8Error),

    #[error("self-describing value failed to marshal")]
    Value(#[source] ValueError),

    #[cfg(feature = "text")]
    #[error("invalid base64 payload")]
    Base64(#[source] base64::DecodeError),

    #[cfg(feature = "json")]
    #[error("JSON tokenizer failure")]
    Json(#[source] serde_json::Error),

    #[error("I/O failure")]
    Io(#[from] std::io::Error),
}

/// The failure classes an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A read operation on a writing inspector, or the reverse.
    DirectionViolation,
    /// A requested object field is absent from the input.
    MissingField,
    /// The input structure disagrees with the traversal order.
    SchemaMismatch,
    /// A collection was consumed more or less than its real length.
    SizeMismatch,
    /// Fewer bytes moved than a declared length demanded.
    ShortTransport,
    /// The underlying stream, tokenizer or value marshaller failed.
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;

        match self {
            ReaderCantWrite | WriterCantRead => ErrorKind::DirectionViolation,
            NoField(_) => ErrorKind::MissingField,
            WrongField { .. } | NotAnObject | UnexpectedToken { .. } | UnbalancedEnd => {
                ErrorKind::SchemaMismatch
            }
            ObjectTooBig
            | ArrayTooBig
            | MapTooBig
            | InvalidLength(_)
            | CollectionTooLong { .. }
            | OutOfRange { .. } => ErrorKind::SizeMismatch,
            ShortRead { .. } | ShortWrite { .. } => ErrorKind::ShortTransport,
            VarintOverflow | NonFiniteFloat(_) | Utf8(_) | Value(_) | Io(_) => ErrorKind::Io,
            #[cfg(feature = "text")]
            Base64(_) => ErrorKind::Io,
            #[cfg(feature = "json")]
            Json(_) => ErrorKind::Io,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::DirectionViolation => "direction violation",
            ErrorKind::MissingField => "missing field",
            ErrorKind::SchemaMismatch => "schema mismatch",
            ErrorKind::SizeMismatch => "size mismatch",
            ErrorKind::ShortTransport => "short transport",
            ErrorKind::Io => "I/O failure",
        };

        write!(f, "{}", s)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        // serde_json wraps stream failures; keep them as plain I/O errors.
        match e.io_error_kind() {
            Some(_) => Error::Io(e.into()),
            None => Error::Json(e),
        }
    }
}
