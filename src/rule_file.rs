//! Loading and saving rule files.
//!
//! A rule file is plain text, one directive per line. Lines are kept verbatim,
//! including `%:` includes, comments and lines that do not parse; only the
//! editor's limits are enforced.

use crate::api::Options;
use crate::error::Error;
use std::fs;
use std::path::Path;

/// Read `path` into lines.
pub fn read_lines(path: &Path, options: &Options) -> Result<Vec<String>, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    let lines = split_lines(&text, options)?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "rule file read");
    Ok(lines)
}

/// Split rule-file text into lines, checking the editor limits.
pub fn split_lines(text: &str, options: &Options) -> Result<Vec<String>, Error> {
    let mut lines = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let len = line.chars().count();
        if len > options.max_line_len {
            return Err(Error::LineTooLong { line: index + 1, len });
        }
        if lines.len() == options.max_lines {
            return Err(Error::TooManyLines { max: options.max_lines });
        }
        lines.push(line.to_string());
    }
    Ok(lines)
}

/// Write `lines` to `path`, each followed by a newline.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), Error> {
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    fs::write(path, text).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "rule file written");
    Ok(())
}
