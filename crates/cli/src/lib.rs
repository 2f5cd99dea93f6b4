//! `stockroom-cli`: operator tool over an exported inventory file.

pub mod cli;
pub mod commands;
pub mod store;
