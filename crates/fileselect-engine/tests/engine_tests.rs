use fileselect_core::{
    ADJECTIVES, EngineConfig, EngineError, Explorer, FsError, Manipulator, NOUNS, OperationKind,
    RandomSource,
};
use fileselect_engine::SelectionEngine;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

#[derive(Default)]
struct MemoryExplorer {
    dirs: RefCell<HashMap<PathBuf, Vec<String>>>,
    taken: HashSet<PathBuf>,
    exists_calls: Cell<usize>,
}

impl MemoryExplorer {
    fn with_dir(self, dir: &str, names: &[&str]) -> Self {
        self.set_dir(dir, names);
        self
    }

    fn set_dir(&self, dir: &str, names: &[&str]) {
        self.dirs.borrow_mut().insert(
            PathBuf::from(dir),
            names.iter().map(|n| n.to_string()).collect(),
        );
    }

    fn with_taken(mut self, path: PathBuf) -> Self {
        self.taken.insert(path);
        self
    }
}

impl Explorer for MemoryExplorer {
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>, FsError> {
        self.dirs.borrow().get(dir).cloned().ok_or_else(|| FsError::NotFound {
            path: dir.to_path_buf(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_calls.set(self.exists_calls.get() + 1);
        self.taken.contains(path) || self.dirs.borrow().contains_key(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.dirs.borrow().contains_key(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Copy(PathBuf, PathBuf),
    Move(PathBuf, PathBuf),
    Delete(PathBuf),
    CreateDirectory(PathBuf),
}

#[derive(Default)]
struct RecordingManipulator {
    failing: RefCell<HashSet<String>>,
    fail_create: bool,
    calls: RefCell<Vec<Call>>,
}

impl RecordingManipulator {
    fn failing_on(names: &[&str]) -> Self {
        Self {
            failing: RefCell::new(names.iter().map(|n| n.to_string()).collect()),
            ..Default::default()
        }
    }

    fn check(&self, source: &Path) -> Result<(), FsError> {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing.borrow().contains(&name) {
            Err(FsError::other("Permission denied"))
        } else {
            Ok(())
        }
    }

    fn transfers(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| !matches!(c, Call::CreateDirectory(_)))
            .count()
    }
}

impl Manipulator for RecordingManipulator {
    fn copy(&self, source: &Path, target: &Path) -> Result<(), FsError> {
        self.calls
            .borrow_mut()
            .push(Call::Copy(source.to_path_buf(), target.to_path_buf()));
        self.check(source)
    }

    fn move_to(&self, source: &Path, target: &Path) -> Result<(), FsError> {
        self.calls
            .borrow_mut()
            .push(Call::Move(source.to_path_buf(), target.to_path_buf()));
        self.check(source)
    }

    fn delete(&self, path: &Path) -> Result<(), FsError> {
        self.calls.borrow_mut().push(Call::Delete(path.to_path_buf()));
        self.check(path)
    }

    fn create_directory(&self, path: &Path) -> Result<(), FsError> {
        self.calls
            .borrow_mut()
            .push(Call::CreateDirectory(path.to_path_buf()));
        if self.fail_create {
            Err(FsError::other("Read-only filesystem"))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
struct ScriptedRandom(VecDeque<usize>);

impl ScriptedRandom {
    fn new(values: &[usize]) -> Self {
        Self(values.iter().copied().collect())
    }
}

impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, max: usize) -> usize {
        assert_eq!(max, 20);
        self.0.pop_front().unwrap_or(0)
    }
}

type TestEngine = SelectionEngine<MemoryExplorer, RecordingManipulator, ScriptedRandom>;

fn engine_with(
    explorer: MemoryExplorer,
    manipulator: RecordingManipulator,
    random: &[usize],
) -> TestEngine {
    SelectionEngine::new(explorer, manipulator, ScriptedRandom::new(random))
}

fn abc_engine() -> TestEngine {
    let mut engine = engine_with(
        MemoryExplorer::default().with_dir("/data", &["a.txt", "b.txt", "c.txt"]),
        RecordingManipulator::default(),
        &[],
    );
    engine.load_directory("/data").unwrap();
    engine
}

fn name(adjective: usize, noun: usize) -> String {
    format!("{}-{}", ADJECTIVES[adjective], NOUNS[noun])
}

fn assert_selection_within_entries(engine: &TestEngine) {
    for selected in engine.selected_entries() {
        assert!(engine.entries().contains(&selected), "{selected} not listed");
    }
}

#[test]
fn test_load_directory_returns_entries() {
    let mut engine = engine_with(
        MemoryExplorer::default().with_dir("/data", &["a.txt", "b.txt"]),
        RecordingManipulator::default(),
        &[],
    );
    assert!(engine.current_directory().is_none());

    let entries = engine.load_directory("/data").unwrap();

    assert_eq!(entries, vec!["a.txt", "b.txt"]);
    assert_eq!(engine.entries(), entries.as_slice());
    assert_eq!(engine.current_directory(), Some(Path::new("/data")));
    assert!(engine.selected_entries().is_empty());
}

#[test]
fn test_load_clears_selection_even_for_same_directory() {
    let mut engine = abc_engine();
    engine.select_all();
    assert_eq!(engine.selection_len(), 3);

    engine.load_directory("/data").unwrap();

    assert_eq!(engine.selection_len(), 0);
    assert_eq!(engine.entries().len(), 3);
}

#[test]
fn test_load_failure_leaves_state_unchanged() {
    let mut engine = abc_engine();
    engine.select("a.txt").unwrap();

    let err = engine.load_directory("/missing").unwrap_err();

    assert!(matches!(
        err,
        EngineError::Load {
            source: FsError::NotFound { .. },
            ..
        }
    ));
    assert_eq!(engine.current_directory(), Some(Path::new("/data")));
    assert_eq!(engine.entries().len(), 3);
    assert!(engine.is_selected("a.txt"));
}

#[test]
fn test_select_unknown_entry_fails() {
    let mut engine = abc_engine();
    engine.select("a.txt").unwrap();

    let err = engine.select("zzz.txt").unwrap_err();

    assert!(matches!(err, EngineError::EntryNotFound { ref name } if name == "zzz.txt"));
    assert_eq!(engine.selected_entries(), vec!["a.txt"]);
}

#[test]
fn test_select_many_is_all_or_nothing() {
    let mut engine = abc_engine();

    let err = engine
        .select_many(&["a.txt", "missing.txt", "b.txt"])
        .unwrap_err();

    assert!(matches!(err, EngineError::EntryNotFound { ref name } if name == "missing.txt"));
    assert!(engine.selected_entries().is_empty());

    engine.select_many(&["c.txt", "a.txt"]).unwrap();
    assert_eq!(engine.selected_entries(), vec!["a.txt", "c.txt"]);
}

#[test]
fn test_select_is_idempotent() {
    let mut engine = abc_engine();
    engine.select("b.txt").unwrap();
    engine.select("b.txt").unwrap();

    assert_eq!(engine.selected_entries(), vec!["b.txt"]);
    assert!(engine.is_selected("b.txt"));
}

#[test]
fn test_deselect_absent_is_noop() {
    let mut engine = abc_engine();
    engine.select("a.txt").unwrap();

    engine.deselect("b.txt");
    engine.deselect("not-there");
    assert_eq!(engine.selected_entries(), vec!["a.txt"]);

    engine.deselect("a.txt");
    assert!(!engine.is_selected("a.txt"));
}

#[test]
fn test_select_all_and_deselect_all() {
    let mut engine = abc_engine();
    engine.select("a.txt").unwrap();
    engine.select_all();
    assert_eq!(engine.selected_entries(), vec!["a.txt", "b.txt", "c.txt"]);

    engine.deselect_all();
    assert!(engine.selected_entries().is_empty());
}

#[test]
fn test_toggle() {
    let mut engine = abc_engine();
    assert!(engine.toggle("c.txt").unwrap());
    assert!(engine.is_selected("c.txt"));
    assert!(!engine.toggle("c.txt").unwrap());
    assert!(!engine.is_selected("c.txt"));
    assert!(engine.toggle("nope").is_err());
}

#[test]
fn test_select_matching() {
    let mut engine = engine_with(
        MemoryExplorer::default().with_dir("/logs", &["a.log", "b.log", "notes.md"]),
        RecordingManipulator::default(),
        &[],
    );
    engine.load_directory("/logs").unwrap();
    engine.select("a.log").unwrap();

    let added = engine.select_matching("*.log").unwrap();

    assert_eq!(added, 1);
    assert_eq!(engine.selected_entries(), vec!["a.log", "b.log"]);

    let err = engine.select_matching("[").unwrap_err();
    assert!(matches!(err, EngineError::InvalidPattern { .. }));
    assert_eq!(engine.selection_len(), 2);
}

#[test]
fn test_delete_removes_entries_and_selection() {
    let mut engine = abc_engine();
    engine.select("a.txt").unwrap();
    engine.select("b.txt").unwrap();

    let outcome = engine.delete_selection().unwrap();

    assert!(outcome.errors.is_empty());
    assert!(outcome.destination.is_none());
    assert_eq!(outcome.kind, OperationKind::Delete);
    assert_eq!(engine.entries(), ["c.txt"]);
    assert!(engine.selected_entries().is_empty());
    assert_eq!(
        *engine.manipulator().calls.borrow(),
        vec![
            Call::Delete(PathBuf::from("/data/a.txt")),
            Call::Delete(PathBuf::from("/data/b.txt")),
        ]
    );
}

#[test]
fn test_move_with_partial_failure() {
    let mut engine = engine_with(
        MemoryExplorer::default().with_dir("/data", &["ok.txt", "fail.txt"]),
        RecordingManipulator::failing_on(&["fail.txt"]),
        &[],
    );
    engine.load_directory("/data").unwrap();
    engine.select_all();

    let outcome = engine.move_selection(Some(Path::new("/dest"))).unwrap();

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].entry, "fail.txt");
    assert_eq!(outcome.errors[0].kind, OperationKind::Move);
    assert_eq!(outcome.errors[0].message, "Permission denied");
    assert_eq!(outcome.succeeded, vec!["ok.txt"]);
    assert_eq!(engine.entries(), ["fail.txt"]);
    assert_eq!(engine.selected_entries(), vec!["fail.txt"]);
    assert_selection_within_entries(&engine);
}

#[test]
fn test_failed_entries_can_be_retried() {
    let mut engine = engine_with(
        MemoryExplorer::default().with_dir("/data", &["ok.txt", "fail.txt"]),
        RecordingManipulator::failing_on(&["fail.txt"]),
        &[],
    );
    engine.load_directory("/data").unwrap();
    engine.select_all();
    engine.delete_selection().unwrap();

    engine.manipulator().failing.borrow_mut().clear();
    let outcome = engine.delete_selection().unwrap();

    assert_eq!(outcome.succeeded, vec!["fail.txt"]);
    assert!(engine.entries().is_empty());
    assert_eq!(engine.selection_len(), 0);
}

#[test]
fn test_copy_keeps_entries() {
    let mut engine = engine_with(
        MemoryExplorer::default().with_dir("/data", &["a.txt", "b.txt", "c.txt"]),
        RecordingManipulator::failing_on(&["b.txt"]),
        &[],
    );
    engine.load_directory("/data").unwrap();
    engine.select("a.txt").unwrap();
    engine.select("b.txt").unwrap();

    let outcome = engine.copy_selection(Some(Path::new("/backup"))).unwrap();

    assert_eq!(outcome.destination.as_deref(), Some(Path::new("/backup")));
    assert_eq!(outcome.succeeded, vec!["a.txt"]);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].kind, OperationKind::Copy);
    assert_eq!(engine.entries(), ["a.txt", "b.txt", "c.txt"]);
    assert_eq!(engine.selected_entries(), vec!["b.txt"]);
    assert_eq!(
        engine.manipulator().calls.borrow()[..2],
        [
            Call::CreateDirectory(PathBuf::from("/backup")),
            Call::Copy(PathBuf::from("/data/a.txt"), PathBuf::from("/backup/a.txt")),
        ]
    );
}

#[test]
fn test_empty_selection_fails_before_any_work() {
    let mut engine = abc_engine();

    assert!(matches!(
        engine.copy_selection(None),
        Err(EngineError::NothingSelected)
    ));
    assert!(matches!(
        engine.move_selection(Some(Path::new("/x"))),
        Err(EngineError::NothingSelected)
    ));
    assert!(matches!(
        engine.delete_selection(),
        Err(EngineError::NothingSelected)
    ));

    assert!(engine.manipulator().calls.borrow().is_empty());
    assert_eq!(engine.explorer().exists_calls.get(), 0);
    assert_eq!(engine.entries().len(), 3);
}

#[test]
fn test_operations_before_load_report_nothing_selected() {
    let mut engine = engine_with(
        MemoryExplorer::default(),
        RecordingManipulator::default(),
        &[],
    );
    assert!(matches!(
        engine.delete_selection(),
        Err(EngineError::NothingSelected)
    ));
    assert!(matches!(
        engine.select("a"),
        Err(EngineError::EntryNotFound { .. })
    ));
    assert!(matches!(
        engine.refresh(),
        Err(EngineError::NoDirectoryLoaded)
    ));
}

#[test]
fn test_generated_destination_from_draws() {
    let mut engine = engine_with(
        MemoryExplorer::default().with_dir("/data", &["a.txt"]),
        RecordingManipulator::default(),
        &[2, 5],
    );
    engine.load_directory("/data").unwrap();
    engine.select("a.txt").unwrap();

    let outcome = engine.copy_selection(None).unwrap();

    let expected = Path::new("/data").join(name(2, 5));
    assert_eq!(outcome.destination.as_deref(), Some(expected.as_path()));
    assert_eq!(engine.explorer().exists_calls.get(), 1);
    assert_eq!(
        engine.manipulator().calls.borrow()[0],
        Call::CreateDirectory(expected.clone())
    );
    assert_eq!(
        engine.manipulator().calls.borrow()[1],
        Call::Copy(PathBuf::from("/data/a.txt"), expected.join("a.txt"))
    );
}

#[test]
fn test_second_candidate_used_after_collision() {
    let first = Path::new("/data").join(name(1, 1));
    let mut engine = engine_with(
        MemoryExplorer::default()
            .with_dir("/data", &["a.txt"])
            .with_taken(first),
        RecordingManipulator::default(),
        &[1, 1, 3, 4],
    );
    engine.load_directory("/data").unwrap();
    engine.select("a.txt").unwrap();

    let outcome = engine.move_selection(None).unwrap();

    assert_eq!(
        outcome.destination,
        Some(Path::new("/data").join(name(3, 4)))
    );
    assert_eq!(engine.explorer().exists_calls.get(), 2);
}

#[test]
fn test_numbered_fallback_after_ten_collisions() {
    // Twenty draws that produce ten different names, all taken.
    let draws: Vec<usize> = (0..10).flat_map(|i| [i, i]).collect();
    let mut explorer = MemoryExplorer::default().with_dir("/data", &["a.txt"]);
    for i in 0..10 {
        explorer = explorer.with_taken(Path::new("/data").join(name(i, i)));
    }
    let last = name(9, 9);
    explorer = explorer.with_taken(Path::new("/data").join(format!("{last}-1")));

    let mut engine = engine_with(explorer, RecordingManipulator::default(), &draws);
    engine.load_directory("/data").unwrap();

    let destination = engine.resolve_destination(None).unwrap();

    assert_eq!(destination, Path::new("/data").join(format!("{last}-2")));
    assert_eq!(engine.explorer().exists_calls.get(), 12);
}

#[test]
fn test_explicit_destination_is_not_checked() {
    let mut engine = abc_engine();

    let destination = engine
        .resolve_destination(Some(Path::new("relative/out")))
        .unwrap();

    assert_eq!(destination, Path::new("relative/out"));
    assert_eq!(engine.explorer().exists_calls.get(), 0);
}

#[test]
fn test_resolve_without_directory_fails() {
    let mut engine = engine_with(
        MemoryExplorer::default(),
        RecordingManipulator::default(),
        &[],
    );
    assert!(matches!(
        engine.resolve_destination(None),
        Err(EngineError::NoDirectoryLoaded)
    ));
    assert!(engine.resolve_destination(Some(Path::new("/x"))).is_ok());
}

#[test]
fn test_destination_creation_failure_aborts_batch() {
    let manipulator = RecordingManipulator {
        fail_create: true,
        ..Default::default()
    };
    let mut engine = engine_with(
        MemoryExplorer::default().with_dir("/data", &["a.txt", "b.txt"]),
        manipulator,
        &[],
    );
    engine.load_directory("/data").unwrap();
    engine.select_all();

    let err = engine.move_selection(Some(Path::new("/ro"))).unwrap_err();

    assert!(matches!(err, EngineError::Destination { ref path, .. } if path == Path::new("/ro")));
    assert_eq!(engine.manipulator().transfers(), 0);
    assert_eq!(engine.selection_len(), 2);
    assert_eq!(engine.entries().len(), 2);
}

#[test]
fn test_refresh_prunes_vanished_selection() {
    let mut engine = abc_engine();
    engine.select("a.txt").unwrap();
    engine.select("b.txt").unwrap();

    engine
        .explorer()
        .set_dir("/data", &["a.txt", "c.txt", "d.txt"]);
    let entries = engine.refresh().unwrap();

    assert_eq!(entries, vec!["a.txt", "c.txt", "d.txt"]);
    assert_eq!(engine.selected_entries(), vec!["a.txt"]);
    assert_selection_within_entries(&engine);
}

#[test]
fn test_refresh_failure_keeps_state() {
    let mut engine = abc_engine();
    engine.select("a.txt").unwrap();
    engine.explorer().dirs.borrow_mut().clear();

    assert!(matches!(engine.refresh(), Err(EngineError::Load { .. })));
    assert_eq!(engine.entries().len(), 3);
    assert!(engine.is_selected("a.txt"));
}

#[test]
fn test_hidden_entries_filtered_by_config() {
    let config = EngineConfig::builder()
        .include_hidden(false)
        .ignore_patterns(vec!["*.tmp".to_string()])
        .build()
        .unwrap();
    let mut engine = SelectionEngine::with_config(
        MemoryExplorer::default().with_dir("/data", &[".git", "a.txt", "scratch.tmp"]),
        RecordingManipulator::default(),
        ScriptedRandom::default(),
        config,
    )
    .unwrap();

    let entries = engine.load_directory("/data").unwrap();

    assert_eq!(entries, vec!["a.txt"]);
    assert!(engine.select(".git").is_err());
}

#[test]
fn test_selection_stays_within_entries() {
    let mut engine = engine_with(
        MemoryExplorer::default()
            .with_dir("/data", &["a", "b", "c", "d"])
            .with_dir("/other", &["x"]),
        RecordingManipulator::failing_on(&["c"]),
        &[],
    );
    engine.load_directory("/data").unwrap();
    engine.select_all();
    engine.deselect("d");
    assert_selection_within_entries(&engine);

    engine.move_selection(Some(Path::new("/other"))).unwrap();
    assert_selection_within_entries(&engine);
    assert_eq!(engine.entries(), ["c", "d"]);

    engine.select("d").unwrap();
    engine.delete_selection().unwrap();
    assert_selection_within_entries(&engine);
    assert_eq!(engine.entries(), ["c"]);

    engine.load_directory("/other").unwrap();
    assert_selection_within_entries(&engine);
    assert!(engine.selected_entries().is_empty());
}
