//! CLI library components for the QARTOD lookup-table validator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
