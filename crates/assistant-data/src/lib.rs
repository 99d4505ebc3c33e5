//! Market data sources and symbol universes.
//!
//! - [`YahooBarSource`]: intraday bars from the Yahoo Finance chart API
//! - [`CsvBarSource`]: bars from per-symbol CSV files on disk
//! - [`CsvSymbolUniverse`]: the tradable symbol list from a CSV file

mod csv_source;
mod universe;
mod yahoo;

pub use csv_source::CsvBarSource;
pub use universe::CsvSymbolUniverse;
pub use yahoo::{parse_chart_response, YahooBarSource, YahooConfig};
