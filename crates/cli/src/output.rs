//! Writing command results to stdout.
//!
//! Logs go to stderr, so stdout carries only results and can be piped.

use std::fmt::Display;
use std::io::{self, Write};

use saho_storefront::Notice;
use serde::Serialize;

/// Print one line.
pub fn line(text: impl Display) -> io::Result<()> {
    writeln!(io::stdout().lock(), "{text}")
}

/// Pretty-print a value as JSON.
pub fn json(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    let text = serde_json::to_string_pretty(value)?;
    line(text)?;
    Ok(())
}

/// Print a submission notice, prefixed by its level.
pub fn notice(notice: &Notice) -> io::Result<()> {
    let marker = if notice.is_error() { "✗" } else { "✓" };
    line(format_args!("{marker} {notice}"))
}
