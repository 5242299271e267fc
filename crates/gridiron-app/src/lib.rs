// Library root: re-exports all modules so integration tests and the binary
// can share the loader, config, and command dispatch.

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
