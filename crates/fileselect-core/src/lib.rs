//! Core types and traits for fileselect.
//!
//! This crate provides the capability traits the selection engine consumes
//! (directory listing, filesystem manipulation, randomness), the operation
//! outcome types, error types and engine configuration.

mod capability;
mod config;
mod error;
mod outcome;
mod words;

pub use capability::{Explorer, Manipulator, RandomSource};
pub use config::{EngineConfig, EngineConfigBuilder, EntryFilter};
pub use error::{EngineError, FsError};
pub use outcome::{EntryError, OperationKind, OperationOutcome};
pub use words::{ADJECTIVES, NOUNS};
