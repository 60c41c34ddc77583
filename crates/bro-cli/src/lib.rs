//! CLI library components for bro2heka.

pub mod cli;
pub mod commands;
pub mod logging;
