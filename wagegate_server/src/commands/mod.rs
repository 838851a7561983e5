//! CLI subcommand implementations.

pub mod catalog;
pub mod serve;
pub mod wages;
