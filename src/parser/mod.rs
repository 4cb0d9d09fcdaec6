//! Delimited record parsing
//!
//! Turns a stream of delimited text into the numeric values of a single column.
//! The first record is always treated as a header and skipped. Every following
//! record must be wide enough to contain the requested column, and the cell in
//! that column must parse as an `f64` using locale-independent decimal syntax.
//!
//! Quoting follows the usual CSV rules, so a quoted field may contain the
//! delimiter:
//!
//! ```
//! use colstat::parser::{csv_to_floats, Delimiter};
//!
//! let data = "name;amount\n\"a;b\";1.5\nc;2.5\n";
//! let values = csv_to_floats(data.as_bytes(), 2, Delimiter::try_from(';').unwrap()).unwrap();
//! assert_eq!(values, vec![1.5, 2.5]);
//! ```

use crate::error::ColstatError;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Field separator for delimited records
///
/// Always a single ASCII character, and never one the record format reserves
/// for itself (the quote character or a line terminator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter(u8);

impl Delimiter {
    /// Comma, the default separator
    pub const COMMA: Delimiter = Delimiter(b',');

    /// Raw byte handed to the record reader
    pub fn as_byte(self) -> u8 {
        self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::COMMA
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 as char)
    }
}

impl TryFrom<char> for Delimiter {
    type Error = ColstatError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if !c.is_ascii() {
            return Err(ColstatError::InvalidDelimiter(
                c.to_string(),
                "delimiter must be an ASCII character",
            ));
        }
        if matches!(c, '"' | '\r' | '\n') {
            return Err(ColstatError::InvalidDelimiter(
                c.to_string(),
                "character is reserved by the record format",
            ));
        }
        Ok(Delimiter(c as u8))
    }
}

impl FromStr for Delimiter {
    type Err = ColstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Delimiter::try_from(c),
            _ => Err(ColstatError::InvalidDelimiter(
                s.to_string(),
                "exactly one character must be supplied",
            )),
        }
    }
}

/// Extract the values of one column from delimited text
///
/// `column` is 1-based. The header record is skipped unconditionally; a stream
/// holding only a header (or nothing at all) yields an empty vector.
///
/// # Errors
///
/// - `InvalidColumn` if `column` is 0, or a data row has fewer fields than
///   `column` (the error carries that row's width)
/// - `NotANumber` if the target cell fails to parse (the error carries the raw text)
/// - `MalformedRecord` if the stream cannot be split into records, or `IoError`
///   if reading the stream fails
pub fn csv_to_floats<R: Read>(
    reader: R,
    column: usize,
    delimiter: Delimiter,
) -> Result<Vec<f64>, ColstatError> {
    if column == 0 {
        return Err(ColstatError::InvalidColumn { column: 0, width: None });
    }
    let index = column - 1;

    let mut records = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    // One record buffer for the whole stream; values are copied out as f64
    let mut record = csv::StringRecord::new();
    let mut values = Vec::new();

    while records
        .read_record(&mut record)
        .map_err(ColstatError::from)?
    {
        let raw = record.get(index).ok_or(ColstatError::InvalidColumn {
            column: column as i64,
            width: Some(record.len()),
        })?;

        values.push(parse_cell(raw)?);
    }

    Ok(values)
}

/// Parse one cell as `f64`
///
/// Finite literals that overflow `f64` are rejected rather than rounded to an
/// infinity; only a spelled-out infinity yields one.
fn parse_cell(raw: &str) -> Result<f64, ColstatError> {
    match raw.parse::<f64>() {
        Ok(value) if !value.is_infinite() || is_infinity_literal(raw) => Ok(value),
        _ => Err(ColstatError::NotANumber(raw.to_string())),
    }
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(&['+', '-'][..]).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::stats::{avg, sum};

    const SCORES: &str = "name, subject, score,s2
khalid,physics,29,37.22
khalid1,physics,35,12.44
khalid1,physics,35,435.44
khalid1,physics,35,12.33
khalid1,physics,35,89.0
khalid1,physics,35,989.234
khalid1,physics,35,123.37
khalid1,physics,35,37.37
khalid1,physics,35,21.22
khalid1,physics,35,22.33
khalid1,physics,35,1
khalid1,physics,33,987.234
";

    #[test]
    fn test_extracts_column_in_row_order() {
        let values = csv_to_floats(SCORES.as_bytes(), 3, Delimiter::COMMA).unwrap();
        assert_eq!(
            values,
            vec![29.0, 35.0, 35.0, 35.0, 35.0, 35.0, 35.0, 35.0, 35.0, 35.0, 35.0, 33.0]
        );
        assert_eq!(sum(&values), 412.0);
    }

    #[test]
    fn test_extracts_fractional_column() {
        let values = csv_to_floats(SCORES.as_bytes(), 4, Delimiter::COMMA).unwrap();
        assert_eq!(
            values,
            vec![37.22, 12.44, 435.44, 12.33, 89.0, 989.234, 123.37, 37.37, 21.22, 22.33, 1.0, 987.234]
        );
        assert!((avg(&values) - 230.682_333_333_333_3).abs() < 1e-9);
    }

    #[test]
    fn test_text_column_is_not_a_number() {
        for column in [1, 2] {
            let err = csv_to_floats(SCORES.as_bytes(), column, Delimiter::COMMA).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotANumber);
        }
    }

    #[test]
    fn test_not_a_number_preserves_raw_text() {
        let data = "a,b\n1,2\n3,oops\n";
        let err = csv_to_floats(data.as_bytes(), 2, Delimiter::COMMA).unwrap_err();
        match err {
            ColstatError::NotANumber(raw) => assert_eq!(raw, "oops"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_header_only_yields_empty() {
        let values = csv_to_floats("a,b,c\n".as_bytes(), 2, Delimiter::COMMA).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_empty_stream_yields_empty() {
        let values = csv_to_floats("".as_bytes(), 1, Delimiter::COMMA).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_header_is_never_parsed() {
        // The header cell would not parse as a number
        let values = csv_to_floats("total\n7\n".as_bytes(), 1, Delimiter::COMMA).unwrap();
        assert_eq!(values, vec![7.0]);
    }

    #[test]
    fn test_column_beyond_row_reports_width() {
        let err = csv_to_floats(SCORES.as_bytes(), 5, Delimiter::COMMA).unwrap_err();
        match err {
            ColstatError::InvalidColumn { column, width } => {
                assert_eq!(column, 5);
                assert_eq!(width, Some(4));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_row_reports_its_own_width() {
        let data = "a,b,c\n1,2,3\n4,5\n";
        let err = csv_to_floats(data.as_bytes(), 3, Delimiter::COMMA).unwrap_err();
        assert!(matches!(
            err,
            ColstatError::InvalidColumn { column: 3, width: Some(2) }
        ));
    }

    #[test]
    fn test_column_zero_rejected() {
        let err = csv_to_floats(SCORES.as_bytes(), 0, Delimiter::COMMA).unwrap_err();
        assert!(matches!(err, ColstatError::InvalidColumn { column: 0, width: None }));
    }

    #[test]
    fn test_custom_delimiter() {
        let data = "x\ty\n1\t10.5\n2\t-0.5\n";
        let tab = Delimiter::try_from('\t').unwrap();
        let values = csv_to_floats(data.as_bytes(), 2, tab).unwrap();
        assert_eq!(values, vec![10.5, -0.5]);
    }

    #[test]
    fn test_quoted_field_may_contain_delimiter() {
        let data = "label,value\n\"a,b\",1\n\"c,d,e\",2\n";
        let values = csv_to_floats(data.as_bytes(), 2, Delimiter::COMMA).unwrap();
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_quoted_number_parses() {
        let data = "v\n\"3.25\"\n";
        let values = csv_to_floats(data.as_bytes(), 1, Delimiter::COMMA).unwrap();
        assert_eq!(values, vec![3.25]);
    }

    #[test]
    fn test_scientific_notation() {
        let data = "v\n1e3\n-2.5E-1\n";
        let values = csv_to_floats(data.as_bytes(), 1, Delimiter::COMMA).unwrap();
        assert_eq!(values, vec![1000.0, -0.25]);
    }

    #[test]
    fn test_out_of_range_literal_is_not_a_number() {
        for raw in ["1e400", "-1e400"] {
            let data = format!("v\n1\n{}\n", raw);
            let err = csv_to_floats(data.as_bytes(), 1, Delimiter::COMMA).unwrap_err();
            match err {
                ColstatError::NotANumber(cell) => assert_eq!(cell, raw),
                other => panic!("unexpected error for {raw}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_infinity_literals_accepted() {
        let data = "v\ninf\n-Infinity\n+INF\n";
        let values = csv_to_floats(data.as_bytes(), 1, Delimiter::COMMA).unwrap();
        assert_eq!(values, vec![f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY]);
    }

    #[test]
    fn test_nan_literal_accepted() {
        let values = csv_to_floats("v\nNaN\n".as_bytes(), 1, Delimiter::COMMA).unwrap();
        assert!(values[0].is_nan());
    }

    #[test]
    fn test_tiny_literal_underflows_to_zero() {
        let values = csv_to_floats("v\n1e-400\n".as_bytes(), 1, Delimiter::COMMA).unwrap();
        assert_eq!(values, vec![0.0]);
    }

    #[test]
    fn test_locale_decimal_comma_rejected() {
        let data = "v;w\n1,5;2\n";
        let semi = Delimiter::try_from(';').unwrap();
        let err = csv_to_floats(data.as_bytes(), 1, semi).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotANumber);
    }

    #[test]
    fn test_delimiter_from_str() {
        assert_eq!("|".parse::<Delimiter>().unwrap().as_byte(), b'|');
        assert_eq!(Delimiter::default(), Delimiter::COMMA);

        for bad in ["", ",,", "ab", "\"", "\n", "é"] {
            let err = bad.parse::<Delimiter>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidDelimiter, "input {bad:?}");
        }
    }
}
