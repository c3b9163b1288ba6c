use std::path::PathBuf;
use thiserror::Error;

/// Errors at the I/O boundary: loading and saving rule files.
///
/// Everything inside the engine recovers locally (rejected lines, refused
/// edits, search misses); only these surface to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a rule file failed.
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    /// A line exceeds the editor's line-length limit.
    #[error("line {line} is {len} characters long")]
    LineTooLong { line: usize, len: usize },

    /// The file has more lines than the editor can hold.
    #[error("rule file has more than {max} lines")]
    TooManyLines { max: usize },
}
