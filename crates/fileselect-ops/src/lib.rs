//! Local capabilities for fileselect.
//!
//! This crate implements the `Explorer`, `Manipulator` and `RandomSource`
//! traits from `fileselect-core` against the real filesystem and the `rand`
//! crate.

mod conflict;
mod explorer;
mod manipulator;
mod random;

pub use conflict::{ConflictPolicy, auto_rename_path};
pub use explorer::LocalExplorer;
pub use manipulator::LocalManipulator;
pub use random::{SeededRandom, ThreadRandom};
