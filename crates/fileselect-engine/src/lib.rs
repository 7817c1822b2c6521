//! Selection engine for fileselect.
//!
//! [`SelectionEngine`] owns the current directory listing and a set of
//! selected entries, and applies copy, move and delete to the selection one
//! entry at a time. Failures for individual entries are collected in the
//! returned [`OperationOutcome`](fileselect_core::OperationOutcome) instead of
//! aborting the batch, and failed entries stay selected so the same operation
//! can be retried.

mod batch;
mod destination;
mod engine;

pub use destination::generate_destination;
pub use engine::SelectionEngine;
