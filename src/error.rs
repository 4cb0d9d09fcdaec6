//! Failure taxonomy
//!
//! Every failure in the aggregation pipeline is a [`ColstatError`]. Each variant
//! belongs to exactly one [`ErrorKind`], which is what callers (and tests) match
//! on. Failures are created where they are first detected and travel unchanged to
//! the coordinator; the only decoration applied on the way is the file path a
//! worker attaches via [`ColstatError::in_file`].

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse classification of a [`ColstatError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Zero input files were given
    NoFilesProvided,
    /// Column index below 1, or a data row narrower than the requested column
    InvalidColumn,
    /// Unrecognized operation name
    InvalidOperation,
    /// Target cell is not a valid floating-point number
    NotANumber,
    /// Delimiter is not a single usable character
    InvalidDelimiter,
    /// The tabular reader rejected the stream
    MalformedRecord,
    /// File could not be opened or read
    IoError,
    /// A worker thread died without reporting
    WorkerPanicked,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NoFilesProvided => "no files provided",
            ErrorKind::InvalidColumn => "invalid column",
            ErrorKind::InvalidOperation => "invalid operation",
            ErrorKind::NotANumber => "not a number",
            ErrorKind::InvalidDelimiter => "invalid delimiter",
            ErrorKind::MalformedRecord => "malformed record",
            ErrorKind::IoError => "I/O error",
            ErrorKind::WorkerPanicked => "worker panicked",
        };
        f.write_str(name)
    }
}

/// Errors produced by the aggregation pipeline
#[derive(Debug, Error)]
pub enum ColstatError {
    #[error("no input files provided")]
    NoFilesProvided,

    #[error("{}", describe_invalid_column(.column, .width))]
    InvalidColumn {
        /// Requested 1-based column
        column: i64,
        /// Field count of the offending row (None when rejected before parsing)
        width: Option<usize>,
    },

    #[error("invalid operation: {0} is not supported")]
    InvalidOperation(String),

    #[error("not a number: {0:?} is not a valid number")]
    NotANumber(String),

    #[error("invalid delimiter {0:?}: {1}")]
    InvalidDelimiter(String, &'static str),

    #[error("malformed record: {0}")]
    MalformedRecord(#[source] csv::Error),

    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("cannot open file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot start thread {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("worker for {} exited without reporting", .path.display())]
    WorkerPanicked { path: PathBuf },

    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ColstatError>,
    },
}

fn describe_invalid_column(column: &i64, width: &Option<usize>) -> String {
    match *width {
        Some(width) => format!(
            "invalid column: column {} requested but row has only {} columns",
            column, width
        ),
        None => format!("invalid column: {} (columns are numbered from 1)", column),
    }
}

impl From<csv::Error> for ColstatError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return ColstatError::MalformedRecord(err);
        }
        match err.into_kind() {
            csv::ErrorKind::Io(source) => ColstatError::Read(source),
            kind => ColstatError::Read(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("{:?}", kind),
            )),
        }
    }
}

impl ColstatError {
    /// Classify this error, looking through file-context wrappers
    pub fn kind(&self) -> ErrorKind {
        match self {
            ColstatError::NoFilesProvided => ErrorKind::NoFilesProvided,
            ColstatError::InvalidColumn { .. } => ErrorKind::InvalidColumn,
            ColstatError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            ColstatError::NotANumber(_) => ErrorKind::NotANumber,
            ColstatError::InvalidDelimiter(..) => ErrorKind::InvalidDelimiter,
            ColstatError::MalformedRecord(_) => ErrorKind::MalformedRecord,
            ColstatError::Read(_) | ColstatError::Io { .. } | ColstatError::Spawn { .. } => {
                ErrorKind::IoError
            }
            ColstatError::WorkerPanicked { .. } => ErrorKind::WorkerPanicked,
            ColstatError::InFile { source, .. } => source.kind(),
        }
    }

    /// Attach the file in which this error was detected
    ///
    /// Errors that already name their file (`Io`, `WorkerPanicked`, `InFile`)
    /// are returned as-is.
    pub fn in_file(self, path: &Path) -> Self {
        match self {
            ColstatError::Io { .. }
            | ColstatError::WorkerPanicked { .. }
            | ColstatError::InFile { .. } => self,
            other => ColstatError::InFile {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with any file context removed
    pub fn root(&self) -> &ColstatError {
        match self {
            ColstatError::InFile { source, .. } => source.root(),
            other => other,
        }
    }

    /// File this error is attributed to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ColstatError::Io { path, .. }
            | ColstatError::WorkerPanicked { path }
            | ColstatError::InFile { path, .. } => Some(path),
            _ => None,
        }
    }
}
