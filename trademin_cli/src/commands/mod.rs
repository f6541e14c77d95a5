//! CLI subcommand implementations.

pub mod aggregates;
pub mod configure;
pub mod dividends;
pub mod marketstatus;
