//! Per-file worker
//!
//! A [`FileWorker`] is the unit of work the coordinator fans out: it opens one
//! file, runs the record parser over it, releases the file handle and produces
//! exactly one outcome, either the extracted sequence or the first failure.
//!
//! Workers share no mutable state. Everything a worker needs is moved into it at
//! construction, and everything it produces is moved out in its [`FileResult`].
//!
//! # Example
//!
//! ```no_run
//! use colstat::parser::Delimiter;
//! use colstat::worker::FileWorker;
//!
//! let worker = FileWorker::new(0, "data.csv".into(), 2, Delimiter::COMMA);
//! let result = worker.run()?;
//! println!("{} records from {}", result.values.len(), result.path.display());
//! # Ok::<(), colstat::error::ColstatError>(())
//! ```

use crate::error::ColstatError;
use crate::parser::{csv_to_floats, Delimiter};
use std::fs::File;
use std::path::PathBuf;
use tracing::debug;

/// Sequence extracted from one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileResult {
    /// Worker that produced this result
    pub worker_id: usize,
    /// File the values came from
    pub path: PathBuf,
    /// Column values in row order
    pub values: Vec<f64>,
}

/// Extracts one column from one file
#[derive(Debug, Clone)]
pub struct FileWorker {
    /// Worker ID (dispatch order)
    id: usize,

    /// File to process
    path: PathBuf,

    /// 1-based column to extract
    column: usize,

    /// Field separator
    delimiter: Delimiter,
}

impl FileWorker {
    /// Create a worker for `path`
    pub fn new(id: usize, path: PathBuf, column: usize, delimiter: Delimiter) -> Self {
        Self {
            id,
            path,
            column,
            delimiter,
        }
    }

    /// Open, parse and release the file
    ///
    /// Open failures become `IoError` carrying the path. Parser failures keep
    /// their kind and gain the path as context. The file handle is released on
    /// every path before this returns.
    pub fn run(self) -> Result<FileResult, ColstatError> {
        debug!(worker = self.id, path = %self.path.display(), "processing file");

        let file = File::open(&self.path).map_err(|source| ColstatError::Io {
            path: self.path.clone(),
            source,
        })?;

        let values = csv_to_floats(&file, self.column, self.delimiter)
            .map_err(|e| e.in_file(&self.path))?;

        drop(file);

        debug!(worker = self.id, records = values.len(), "file complete");

        Ok(FileResult {
            worker_id: self.id,
            path: self.path,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_worker_extracts_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "scores.csv", "id,score\n1,60\n2,40\n");

        let result = FileWorker::new(3, path.clone(), 2, Delimiter::COMMA).run().unwrap();
        assert_eq!(result.worker_id, 3);
        assert_eq!(result.path, path);
        assert_eq!(result.values, vec![60.0, 40.0]);
    }

    #[test]
    fn test_worker_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.csv");

        let err = FileWorker::new(0, path.clone(), 1, Delimiter::COMMA).run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoError);
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn test_worker_parser_failure_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "bad.csv", "v\n1\nnope\n");

        let err = FileWorker::new(0, path.clone(), 1, Delimiter::COMMA).run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotANumber);
        assert_eq!(err.path(), Some(path.as_path()));
        assert!(matches!(err.root(), ColstatError::NotANumber(raw) if raw == "nope"));
    }

    #[test]
    fn test_worker_narrow_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "narrow.csv", "a,b\n1,2\n");

        let err = FileWorker::new(0, path, 3, Delimiter::COMMA).run().unwrap_err();
        assert!(matches!(
            err.root(),
            ColstatError::InvalidColumn { column: 3, width: Some(2) }
        ));
    }

    #[test]
    fn test_worker_header_only_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "header.csv", "a,b\n");

        let result = FileWorker::new(0, path, 2, Delimiter::COMMA).run().unwrap();
        assert!(result.values.is_empty());
    }

    #[test]
    fn test_worker_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();

        let err = FileWorker::new(0, temp_dir.path().to_path_buf(), 1, Delimiter::COMMA)
            .run()
            .unwrap_err();
        // Opening a directory succeeds on unix; the first read fails
        assert_eq!(err.kind(), ErrorKind::IoError);
        assert!(err.path().is_some());
    }
}
