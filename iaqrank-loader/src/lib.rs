//! Table loading for IAQRank
//!
//! Reads the six exported sensor tables from CSV files and hands them to
//! `iaqrank-core` through its [`TableSource`](iaqrank_core::TableSource)
//! seam. Where the files live is described by a [`SourceConfig`], loadable
//! from JSON.
//!
//! ```rust,no_run
//! use iaqrank_core::ReferenceCache;
//! use iaqrank_loader::{CsvDirectory, SourceConfig};
//!
//! let config = SourceConfig::from_json_file("iaqrank.json")?;
//! let options = config.prepare_options();
//! let cache = ReferenceCache::with_options(CsvDirectory::new(config), options);
//!
//! for warning in cache.warnings() {
//!     eprintln!("skipped: {warning}");
//! }
//! # Ok::<(), iaqrank_loader::LoadError>(())
//! ```
//!
//! A file that is missing or malformed only costs its own sensor; the
//! other tables still load.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod errors;
pub mod reader;

pub use config::{default_file_name, SourceConfig};
pub use errors::{LoadError, LoadResult};
pub use reader::{read_table, read_table_path, CsvDirectory};
