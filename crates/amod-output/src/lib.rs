//! `amod-output` — artifact table writers for the amod network bridge.
//!
//! [`TableWriter`] has one method per artifact table; [`CsvTableWriter`]
//! writes each table to its own headed CSV file (see [`csv`] for the file
//! list).  Index columns are zero-based in memory and translated according
//! to the configured [`IndexBase`](amod_core::IndexBase) only here.
//!
//! # Usage
//!
//! ```rust,ignore
//! use amod_output::{CsvTableWriter, RouteRow, TableWriter};
//!
//! let mut out = CsvTableWriter::from_config(&config.output)?;
//! out.write_network(&network)?;
//! out.write_routes(&RouteRow::from_outcome(&resolver, &outcome))?;
//! out.write_remaining_capacity(&capacity)?;
//! out.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;


pub use csv::CsvTableWriter;
pub use error::{OutputError, OutputResult};
pub use row::RouteRow;
pub use writer::TableWriter;
