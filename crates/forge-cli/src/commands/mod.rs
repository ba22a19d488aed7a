//! CLI command implementations

pub mod check;
pub mod generate;
pub mod view;
