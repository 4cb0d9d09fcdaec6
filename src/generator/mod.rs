//! Synthetic CSV data
//!
//! Produces input files shaped like real exports: a header row followed by rows
//! of twelve columns.
//!
//! | Columns | Content |
//! |---------|---------|
//! | 1–8     | floats with 4 fractional digits |
//! | 9       | `string<row>` |
//! | 10      | date within the last 365 days (`YYYY-MM-DD`) |
//! | 11–12   | `true` / `false` |
//!
//! Generated files are named `data<unix-nanos>.csv`.
//!
//! # Example
//!
//! ```
//! use colstat::generator::DataGenerator;
//!
//! let mut generator = DataGenerator::with_seed(3, 42);
//! let mut out = Vec::new();
//! generator.write_rows(&mut out).unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert_eq!(text.lines().count(), 4); // header + 3 rows
//! ```

use crate::Result;
use anyhow::Context;
use chrono::{Days, NaiveDate, Utc};
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Columns per generated row
pub const NUM_COLUMNS: usize = 12;

/// Number of leading float columns
pub const FLOAT_COLUMNS: usize = 8;

/// Default row count per file
pub const DEFAULT_ROWS: usize = 100_000;

/// Generates synthetic CSV files
pub struct DataGenerator {
    /// Data rows per file (header excluded)
    rows: usize,

    rng: Xoshiro256PlusPlus,

    /// Dates are drawn backwards from this day
    today: NaiveDate,
}

impl DataGenerator {
    /// Create a generator with random seed
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            rng: Xoshiro256PlusPlus::from_entropy(),
            today: Utc::now().date_naive(),
        }
    }

    /// Create a generator with specific seed
    ///
    /// Numeric, string and boolean columns are reproducible; dates are relative
    /// to the current day.
    pub fn with_seed(rows: usize, seed: u64) -> Self {
        Self {
            rows,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            today: Utc::now().date_naive(),
        }
    }

    /// Write one new file into `dir` and return its path
    ///
    /// `dir` is created if it does not exist.
    pub fn generate(&mut self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let (path, file) = create_unique(dir)?;
        debug!(path = %path.display(), rows = self.rows, "generating data file");

        self.write_rows(io::BufWriter::new(file))
            .with_context(|| format!("Failed to write data file: {}", path.display()))?;

        Ok(path)
    }

    /// Write the header and all rows to `out`
    pub fn write_rows<W: Write>(&mut self, out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);

        let header: Vec<String> = (1..=NUM_COLUMNS).map(|c| format!("Column {}", c)).collect();
        writer.write_record(&header)?;

        let mut row: Vec<String> = Vec::with_capacity(NUM_COLUMNS);
        for i in 0..self.rows {
            row.clear();
            self.fill_row(i, &mut row);
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn fill_row(&mut self, index: usize, row: &mut Vec<String>) {
        let scale = self.rng.gen_range(1..1_000_000_000u64) as f64;

        for _ in 0..FLOAT_COLUMNS {
            let value = self.rng.gen::<f64>() * scale;
            row.push(format!("{:.4}", value));
        }

        row.push(format!("string{}", index));

        let days_back = self.rng.gen_range(0..365u64);
        let date = self
            .today
            .checked_sub_days(Days::new(days_back))
            .unwrap_or(self.today);
        row.push(date.format("%Y-%m-%d").to_string());

        while row.len() < NUM_COLUMNS {
            row.push(self.rng.gen_bool(0.5).to_string());
        }
    }
}

/// Create `data<nanos>.csv` in `dir`, never overwriting an existing file
fn create_unique(dir: &Path) -> Result<(PathBuf, fs::File)> {
    let mut stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();

    loop {
        let path = dir.join(format!("data{}.csv", stamp));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => stamp += 1,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create file: {}", path.display()))
            }
        }
    }
}
