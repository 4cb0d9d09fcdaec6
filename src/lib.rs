//! colstat - concurrent column statistics over delimited text files
//!
//! colstat computes a single aggregate (sum, average, min, max) over one numeric
//! column across any number of delimited text files. Every file is parsed on its
//! own worker thread and the per-file sequences are merged into one before the
//! aggregate is applied.
//!
//! # Architecture
//!
//! - **Record parser**: delimited text → `Vec<f64>` for one column
//! - **Aggregation functions**: pure reducers selected by name
//! - **File worker**: one file in, exactly one result or failure out
//! - **Coordinator**: fan-out/fan-in with first-error-abort semantics
//!
//! # Example
//!
//! ```no_run
//! use colstat::config::{validator, RunConfig};
//! use colstat::coordinator::Coordinator;
//!
//! let config = RunConfig::with_files(["a.csv", "b.csv"]);
//! let plan = validator::validate_config(&config)?;
//! let summary = Coordinator::new(plan).run()?;
//! println!("{}", summary);
//! # Ok::<(), colstat::error::ColstatError>(())
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod generator;
pub mod output;
pub mod parser;
pub mod stats;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::{RunConfig, RunPlan};
pub use coordinator::{Coordinator, Summary};
pub use error::{ColstatError, ErrorKind};
pub use stats::Operation;

/// Result type used by the binaries and the output layer
pub type Result<T> = anyhow::Result<T>;
