//! Destination directory resolution for copy and move.

use std::path::{Path, PathBuf};

use fileselect_core::{
    ADJECTIVES, EngineError, Explorer, Manipulator, NOUNS, RandomSource,
};
use tracing::{debug, trace};

use crate::SelectionEngine;

impl<E, M, R> SelectionEngine<E, M, R>
where
    E: Explorer,
    M: Manipulator,
    R: RandomSource,
{
    /// Resolve where a copy or move should land.
    ///
    /// An explicit destination is returned unchanged without any checks.
    /// Otherwise a free `<adjective>-<noun>` name inside the current
    /// directory is generated. Nothing is created on disk.
    pub fn resolve_destination(&mut self, explicit: Option<&Path>) -> Result<PathBuf, EngineError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let dir = self
            .current_directory
            .as_deref()
            .ok_or(EngineError::NoDirectoryLoaded)?;

        Ok(generate_destination(
            &self.explorer,
            &mut self.random,
            dir,
            self.config.max_name_attempts,
        ))
    }
}

/// Generate a path inside `dir` that does not exist yet.
///
/// Up to `attempts` random `<adjective>-<noun>` names are tried. When all of
/// them are taken, the last one gets a counter appended (`<base>-1`,
/// `<base>-2`, ...) until a free path turns up.
pub fn generate_destination<E, R>(
    explorer: &E,
    random: &mut R,
    dir: &Path,
    attempts: usize,
) -> PathBuf
where
    E: Explorer + ?Sized,
    R: RandomSource + ?Sized,
{
    let mut base = String::new();

    for attempt in 1..=attempts.max(1) {
        base = random_name(random);
        let candidate = dir.join(&base);
        if !explorer.exists(&candidate) {
            debug!(attempt, destination = %candidate.display(), "generated destination");
            return candidate;
        }
        trace!(attempt, name = %base, "generated name taken");
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = dir.join(format!("{base}-{counter}"));
        if !explorer.exists(&candidate) {
            debug!(counter, destination = %candidate.display(), "generated numbered destination");
            return candidate;
        }
        counter += 1;
    }
}

/// Draw one adjective, then one noun.
fn random_name<R: RandomSource + ?Sized>(random: &mut R) -> String {
    // Out-of-range draws wrap around.
    let adjective = ADJECTIVES[random.next_int(ADJECTIVES.len()) % ADJECTIVES.len()];
    let noun = NOUNS[random.next_int(NOUNS.len()) % NOUNS.len()];
    format!("{adjective}-{noun}")
}
