use core::fmt;

/// Error type for loading, validating and packing a raw sprite image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    FileAccess(AccessError),
    Format(FormatError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// No input path was given on the command line.
    MissingArgument,
    /// The input could not be opened or read.
    Io(embedded_io::ErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The loaded byte count is not `width * height * 3`.
    SizeMismatch { expected: usize, actual: usize },
    /// Zero-sized dimensions, or a byte length that does not fit in `usize`.
    InvalidDimensions { width: usize, height: usize },
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub fn from_io_error(error: impl embedded_io::Error) -> Self {
        Error::FileAccess(AccessError::Io(error.kind()))
    }
}

impl From<AccessError> for Error {
    fn from(err: AccessError) -> Self {
        Error::FileAccess(err)
    }
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        Error::Format(err)
    }
}

impl embedded_io::Error for Error {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            Error::FileAccess(AccessError::Io(kind)) => *kind,
            Error::FileAccess(AccessError::MissingArgument) => embedded_io::ErrorKind::InvalidInput,
            Error::Format(_) => embedded_io::ErrorKind::InvalidData,
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::MissingArgument => write!(f, "missing input file argument"),
            AccessError::Io(kind) => write!(f, "cannot read input file ({kind:?})"),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::SizeMismatch { expected, actual } if actual > expected => write!(
                f,
                "input is larger than the expected {expected} bytes of RGB triplets"
            ),
            FormatError::SizeMismatch { expected, actual } => write!(
                f,
                "input is {actual} bytes, expected exactly {expected} bytes of RGB triplets"
            ),
            FormatError::InvalidDimensions { width, height } => {
                write!(f, "invalid image dimensions {width}x{height}")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileAccess(err) => write!(f, "file access error: {err}"),
            Error::Format(err) => write!(f, "format error: {err}"),
        }
    }
}

impl core::error::Error for Error {}
