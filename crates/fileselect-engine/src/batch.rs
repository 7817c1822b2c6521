//! Batch copy, move and delete over the current selection.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fileselect_core::{
    EngineError, EntryError, Explorer, FsError, Manipulator, OperationKind, OperationOutcome,
    RandomSource,
};
use tracing::{info, warn};

use crate::SelectionEngine;

impl<E, M, R> SelectionEngine<E, M, R>
where
    E: Explorer,
    M: Manipulator,
    R: RandomSource,
{
    /// Copy every selected entry into `destination`, or into a generated
    /// directory when none is given.
    ///
    /// Copied entries are deselected; the entry list is left as is.
    pub fn copy_selection(
        &mut self,
        destination: Option<&Path>,
    ) -> Result<OperationOutcome, EngineError> {
        self.transfer(OperationKind::Copy, destination)
    }

    /// Move every selected entry into `destination`, or into a generated
    /// directory when none is given.
    ///
    /// Moved entries leave both the selection and the entry list.
    pub fn move_selection(
        &mut self,
        destination: Option<&Path>,
    ) -> Result<OperationOutcome, EngineError> {
        self.transfer(OperationKind::Move, destination)
    }

    /// Delete every selected entry.
    ///
    /// Deleted entries leave both the selection and the entry list.
    pub fn delete_selection(&mut self) -> Result<OperationOutcome, EngineError> {
        let (dir, snapshot) = self.snapshot()?;
        let mut outcome = OperationOutcome::new(OperationKind::Delete, None);

        for entry in snapshot {
            let result = self.manipulator.delete(&dir.join(&entry));
            record(&mut outcome, entry, result);
        }

        self.apply(&outcome);
        Ok(outcome)
    }

    fn transfer(
        &mut self,
        kind: OperationKind,
        destination: Option<&Path>,
    ) -> Result<OperationOutcome, EngineError> {
        let (dir, snapshot) = self.snapshot()?;
        let destination = self.resolve_destination(destination)?;
        self.manipulator
            .create_directory(&destination)
            .map_err(|source| EngineError::Destination {
                path: destination.clone(),
                source,
            })?;

        let mut outcome = OperationOutcome::new(kind, Some(destination.clone()));

        for entry in snapshot {
            let source = dir.join(&entry);
            let target = destination.join(&entry);
            let result = match kind {
                OperationKind::Copy => self.manipulator.copy(&source, &target),
                OperationKind::Move => self.manipulator.move_to(&source, &target),
                OperationKind::Delete => self.manipulator.delete(&source),
            };
            record(&mut outcome, entry, result);
        }

        self.apply(&outcome);
        Ok(outcome)
    }

    /// Freeze the selection, in listing order, before any entry is touched.
    fn snapshot(&self) -> Result<(PathBuf, Vec<String>), EngineError> {
        let snapshot = self.selected_entries();
        if snapshot.is_empty() {
            return Err(EngineError::NothingSelected);
        }
        let dir = self
            .current_directory
            .clone()
            .ok_or(EngineError::NoDirectoryLoaded)?;
        Ok((dir, snapshot))
    }

    /// Drop successfully processed entries from the selection, and from the
    /// listing when the source is gone.
    fn apply(&mut self, outcome: &OperationOutcome) {
        for entry in &outcome.succeeded {
            self.selection.remove(entry);
        }

        if outcome.kind.removes_source() {
            let done: HashSet<&str> = outcome.succeeded.iter().map(String::as_str).collect();
            self.entries.retain(|entry| !done.contains(entry.as_str()));
        }

        info!(
            kind = %outcome.kind,
            succeeded = outcome.succeeded.len(),
            failed = outcome.errors.len(),
            "{}",
            outcome.summary()
        );
    }
}

fn record(outcome: &mut OperationOutcome, entry: String, result: Result<(), FsError>) {
    match result {
        Ok(()) => outcome.succeeded.push(entry),
        Err(e) => {
            warn!(kind = %outcome.kind, entry = %entry, error = %e, "entry failed");
            outcome
                .errors
                .push(EntryError::new(entry, e.to_string(), outcome.kind));
        }
    }
}
