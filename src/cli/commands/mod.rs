//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`], which owns the probe and dependency
//! registries shared by every command.

pub mod cache;
pub mod check;
pub mod dispatcher;
pub mod info;
pub mod list;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
