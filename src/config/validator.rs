//! Configuration validation
//!
//! Every check here runs before any file is opened. The order is fixed so that a
//! configuration with several problems always reports the same one first:
//! files, then column, then operation, then delimiter.

use super::*;
use crate::error::ColstatError;

/// Validate a run configuration and build its plan
pub fn validate_config(config: &RunConfig) -> Result<RunPlan, ColstatError> {
    validate_files(&config.files)?;
    let column = validate_column(config.col)?;
    let operation: Operation = config.op.parse()?;
    let delimiter: Delimiter = config.delimiter.parse()?;

    Ok(RunPlan {
        files: config.files.clone(),
        operation,
        column,
        delimiter,
    })
}

/// At least one input file is required
pub fn validate_files(files: &[PathBuf]) -> Result<(), ColstatError> {
    if files.is_empty() {
        return Err(ColstatError::NoFilesProvided);
    }
    Ok(())
}

/// Columns are numbered from 1
pub fn validate_column(column: i64) -> Result<usize, ColstatError> {
    match usize::try_from(column) {
        Ok(index) if index >= 1 => Ok(index),
        _ => Err(ColstatError::InvalidColumn { column, width: None }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_valid_config() {
        let config = RunConfig {
            op: "avg".to_string(),
            col: 2,
            delimiter: ";".to_string(),
            ..RunConfig::with_files(["a.csv"])
        };

        let plan = validate_config(&config).unwrap();
        assert_eq!(plan.files, vec![PathBuf::from("a.csv")]);
        assert_eq!(plan.operation, Operation::Avg);
        assert_eq!(plan.column, 2);
        assert_eq!(plan.delimiter.as_byte(), b';');
    }

    #[test]
    fn test_no_files() {
        let err = validate_config(&RunConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoFilesProvided);
    }

    #[test]
    fn test_column_zero() {
        let config = RunConfig {
            col: 0,
            ..RunConfig::with_files(["a.csv"])
        };
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidColumn);
    }

    #[test]
    fn test_negative_column() {
        let config = RunConfig {
            col: -1,
            ..RunConfig::with_files(["a.csv"])
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ColstatError::InvalidColumn { column: -1, width: None }));
    }

    #[test]
    fn test_unknown_operation() {
        let config = RunConfig {
            op: "median".to_string(),
            ..RunConfig::with_files(["a.csv"])
        };
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_multi_char_delimiter() {
        let config = RunConfig {
            delimiter: "::".to_string(),
            ..RunConfig::with_files(["a.csv"])
        };
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDelimiter);
    }

    #[test]
    fn test_check_order() {
        // Everything is wrong; files are reported first
        let config = RunConfig {
            files: vec![],
            op: "median".to_string(),
            col: 0,
            delimiter: String::new(),
            output: OutputFormat::Text,
        };
        assert_eq!(validate_config(&config).unwrap_err().kind(), ErrorKind::NoFilesProvided);

        let config = RunConfig {
            files: vec![PathBuf::from("a.csv")],
            ..config
        };
        assert_eq!(validate_config(&config).unwrap_err().kind(), ErrorKind::InvalidColumn);

        let config = RunConfig { col: 1, ..config };
        assert_eq!(validate_config(&config).unwrap_err().kind(), ErrorKind::InvalidOperation);
    }
}
