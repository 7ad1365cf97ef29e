// file: src/process/mod.rs
// description: external process execution module exports
// reference: internal module structure

pub mod command;
pub mod shim;

#[cfg(test)]
pub(crate) mod testing;

pub use command::ToolCommand;
pub use shim::{CommandRunner, FAILURE_STATUS, OutputStream, ProcessShim};
