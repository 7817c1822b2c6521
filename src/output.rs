//! Rendering of listings and batch outcomes.

use std::io::Write;

use color_eyre::eyre::Result;
use fileselect_core::OperationOutcome;

use crate::OutputFormat;

/// Print a directory listing, marking selected entries with `*`.
pub fn print_listing<W: Write>(
    out: &mut W,
    entries: &[String],
    is_selected: impl Fn(&str) -> bool,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for entry in entries {
                let marker = if is_selected(entry.as_str()) { "*" } else { " " };
                writeln!(out, "{marker} {entry}")?;
            }
        }
        OutputFormat::Json => {
            let listing: Vec<_> = entries
                .iter()
                .map(|entry| {
                    serde_json::json!({ "name": entry, "selected": is_selected(entry.as_str()) })
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&listing)?)?;
        }
    }
    Ok(())
}

/// Print a plain listing with nothing selected.
pub fn print_entries<W: Write>(out: &mut W, entries: &[String], format: OutputFormat) -> Result<()> {
    print_listing(out, entries, |_| false, format)
}

/// Print the result of a batch operation.
pub fn print_outcome<W: Write>(
    out: &mut W,
    outcome: &OperationOutcome,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", outcome.summary())?;
            if let Some(destination) = &outcome.destination {
                writeln!(out, "  -> {}", destination.display())?;
            }
            for error in &outcome.errors {
                writeln!(out, "  ! {}: {}", error.entry, error.message)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(outcome)?)?;
        }
    }
    Ok(())
}
