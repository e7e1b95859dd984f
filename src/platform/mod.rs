//! Platform probes.
//!
//! Raw detection lives in [`os`], [`path`] and [`tmpexe`];
//! [`ProbeRegistry`] wraps each detection in the result cache and is the
//! production [`Host`](crate::depcheck::Host).

pub mod os;
pub mod path;
pub mod probes;
pub mod tmpexe;

pub use probes::{PlatformSummary, ProbeRegistry, PERSISTED_PROBES};
