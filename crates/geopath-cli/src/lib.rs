//! geopath CLI library.
//!
//! Argument parsers, logging setup, terminal styling and output rendering
//! used by the `geopath` binary.

pub mod args;
pub mod logging;
pub mod output;
pub mod terminal;
