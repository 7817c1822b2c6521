//! Line-oriented interactive shell over one engine.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;
use fileselect_core::{EngineError, Explorer, Manipulator, RandomSource};
use fileselect_engine::SelectionEngine;

use crate::OutputFormat;
use crate::output;

const HELP: &str = "\
Commands:
  ls                 List entries (* marks selected)
  pwd                Show the current directory
  cd <dir>           Open another directory (clears the selection)
  sel <name>...      Select entries
  unsel <name>...    Deselect entries
  toggle <name>      Flip one entry
  glob <pattern>     Select entries matching a glob
  all / none         Select or clear everything
  selected           List selected entries
  refresh            Re-read the directory, keeping the selection
  cp [dest]          Copy the selection (generated destination if omitted)
  mv [dest]          Move the selection (generated destination if omitted)
  rm                 Delete the selection
  help               Show this help
  quit               Leave";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Pwd,
    Cd(String),
    Select(Vec<String>),
    Deselect(Vec<String>),
    Toggle(String),
    Glob(String),
    SelectAll,
    Clear,
    Selected,
    Refresh,
    Copy(Option<String>),
    Move(Option<String>),
    Delete,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = split_words(line)?.into_iter();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<String> = words.collect();

        let command = match (head.as_str(), rest.as_slice()) {
            ("ls", []) => Self::List,
            ("pwd", []) => Self::Pwd,
            ("cd", [dir]) => Self::Cd(dir.clone()),
            ("sel" | "select", names) if !names.is_empty() => Self::Select(names.to_vec()),
            ("unsel" | "deselect", names) if !names.is_empty() => Self::Deselect(names.to_vec()),
            ("toggle", [name]) => Self::Toggle(name.clone()),
            ("glob", [pattern]) => Self::Glob(pattern.clone()),
            ("all", []) => Self::SelectAll,
            ("none", []) => Self::Clear,
            ("selected", []) => Self::Selected,
            ("refresh", []) => Self::Refresh,
            ("cp" | "copy", []) => Self::Copy(None),
            ("cp" | "copy", [dest]) => Self::Copy(Some(dest.clone())),
            ("mv" | "move", []) => Self::Move(None),
            ("mv" | "move", [dest]) => Self::Move(Some(dest.clone())),
            ("rm" | "delete", []) => Self::Delete,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit" | "q", []) => Self::Quit,
            (other, _) => return Err(format!("Unknown or malformed command: {other} (try 'help')")),
        };
        Ok(Some(command))
    }
}

/// Split on whitespace, keeping double-quoted runs together.
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err("Unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Resolve a path typed in the shell against the current directory.
fn resolve_path(current: Option<&Path>, input: &str) -> PathBuf {
    let joined = match current {
        Some(dir) => dir.join(input),
        None => PathBuf::from(input),
    };
    joined.canonicalize().unwrap_or(joined)
}

/// Read commands from `input` until it ends or `quit` is entered.
pub fn run<E, M, R, I, W>(
    engine: &mut SelectionEngine<E, M, R>,
    input: I,
    mut out: W,
    format: OutputFormat,
) -> Result<()>
where
    E: Explorer,
    M: Manipulator,
    R: RandomSource,
    I: BufRead,
    W: Write,
{
    prompt(engine, &mut out)?;

    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                if let Err(e) = execute(engine, command, &mut out, format) {
                    writeln!(out, "error: {e}")?;
                }
            }
            Ok(None) => {}
            Err(message) => writeln!(out, "error: {message}")?,
        }
        prompt(engine, &mut out)?;
    }

    Ok(())
}

fn prompt<E, M, R, W>(engine: &SelectionEngine<E, M, R>, out: &mut W) -> Result<()>
where
    E: Explorer,
    M: Manipulator,
    R: RandomSource,
    W: Write,
{
    let dir = engine
        .current_directory()
        .map(|d| d.display().to_string())
        .unwrap_or_default();
    write!(out, "fsel:{dir} [{}]> ", engine.selection_len())?;
    out.flush()?;
    Ok(())
}

/// Run one command. Engine errors come back as `Err` for the caller to print.
fn execute<E, M, R, W>(
    engine: &mut SelectionEngine<E, M, R>,
    command: Command,
    out: &mut W,
    format: OutputFormat,
) -> Result<(), ShellError>
where
    E: Explorer,
    M: Manipulator,
    R: RandomSource,
    W: Write,
{
    match command {
        Command::List => {
            output::print_listing(out, engine.entries(), |name| engine.is_selected(name), format)?;
        }
        Command::Pwd => {
            let dir = engine
                .current_directory()
                .map(|d| d.display().to_string())
                .unwrap_or_default();
            writeln!(out, "{dir}")?;
        }
        Command::Cd(dir) => {
            let target = resolve_path(engine.current_directory(), &dir);
            let entries = engine.load_directory(target)?;
            writeln!(out, "{} entries", entries.len())?;
        }
        Command::Select(names) => engine.select_many(&names)?,
        Command::Deselect(names) => {
            for name in &names {
                engine.deselect(name);
            }
        }
        Command::Toggle(name) => {
            let selected = engine.toggle(&name)?;
            writeln!(out, "{name}: {}", if selected { "selected" } else { "deselected" })?;
        }
        Command::Glob(pattern) => {
            let added = engine.select_matching(&pattern)?;
            writeln!(out, "{added} selected")?;
        }
        Command::SelectAll => engine.select_all(),
        Command::Clear => engine.deselect_all(),
        Command::Selected => {
            let selected = engine.selected_entries();
            output::print_listing(out, &selected, |_| true, format)?;
        }
        Command::Refresh => {
            let entries = engine.refresh()?;
            writeln!(out, "{} entries", entries.len())?;
        }
        Command::Copy(dest) => {
            let dest = dest.map(|d| resolve_path(engine.current_directory(), &d));
            let outcome = engine.copy_selection(dest.as_deref())?;
            output::print_outcome(out, &outcome, format)?;
        }
        Command::Move(dest) => {
            let dest = dest.map(|d| resolve_path(engine.current_directory(), &d));
            let outcome = engine.move_selection(dest.as_deref())?;
            output::print_outcome(out, &outcome, format)?;
        }
        Command::Delete => {
            let outcome = engine.delete_selection()?;
            output::print_outcome(out, &outcome, format)?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

/// Failure of a single shell command.
#[derive(Debug, thiserror::Error)]
enum ShellError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Output(String),
}

impl From<std::io::Error> for ShellError {
    fn from(e: std::io::Error) -> Self {
        Self::Output(e.to_string())
    }
}

impl From<color_eyre::eyre::Report> for ShellError {
    fn from(e: color_eyre::eyre::Report) -> Self {
        Self::Output(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use fileselect_ops::{LocalExplorer, LocalManipulator, SeededRandom};

    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(Command::parse("ls").unwrap(), Some(Command::List));
        assert_eq!(
            Command::parse("sel a.txt b.txt").unwrap(),
            Some(Command::Select(vec!["a.txt".into(), "b.txt".into()]))
        );
        assert_eq!(Command::parse("cp").unwrap(), Some(Command::Copy(None)));
        assert_eq!(
            Command::parse("mv ../out").unwrap(),
            Some(Command::Move(Some("../out".into())))
        );
        assert_eq!(Command::parse("none").unwrap(), Some(Command::Clear));
        assert!(Command::parse("rm now").is_err());
        assert!(Command::parse("sel").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }

    #[test]
    fn test_split_words_with_quotes() {
        assert_eq!(
            split_words(r#"sel "my file.txt" other"#).unwrap(),
            vec!["sel", "my file.txt", "other"]
        );
        assert_eq!(split_words(r#"sel """#).unwrap(), vec!["sel", ""]);
        assert!(split_words(r#"sel "open"#).is_err());
    }

    #[test]
    fn test_session_moves_and_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let mut engine =
            SelectionEngine::new(LocalExplorer, LocalManipulator::new(), SeededRandom::new(1));
        engine.load_directory(dir.path()).unwrap();

        let script = "sel a.txt\nsel missing.txt\nmv out\nls\nrm\nquit\nls\n";
        let mut buf = Vec::new();
        run(&mut engine, script.as_bytes(), &mut buf, OutputFormat::Text).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("error: Entry not found: missing.txt"));
        assert!(text.contains("Moved 1 items"));
        assert!(text.contains("error: Nothing selected"));
        assert!(dir.path().join("out").join("a.txt").exists());
        assert_eq!(engine.entries(), ["b.txt"]);
    }

    #[test]
    fn test_select_with_unknown_name_selects_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let mut engine =
            SelectionEngine::new(LocalExplorer, LocalManipulator::new(), SeededRandom::new(1));
        engine.load_directory(dir.path()).unwrap();

        let mut buf = Vec::new();
        run(&mut engine, "sel a.txt missing b.txt\n".as_bytes(), &mut buf, OutputFormat::Text)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("error: Entry not found: missing"));
        assert_eq!(engine.selection_len(), 0);
    }
}
