//! Reading the raw header block from a log file.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::debug;

use crate::error::{HeaderError, Result};

/// Number of lines in a standard Bro log header.
pub const HEADER_LINE_COUNT: usize = 8;

/// Read up to the first [`HEADER_LINE_COUNT`] lines of the file at `path`.
///
/// Lines are returned without their terminators. A file shorter than the
/// header yields fewer lines; nothing is validated here.
pub fn read_header_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            HeaderError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            HeaderError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let lines = read_lines_from(file).map_err(|source| HeaderError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), lines = lines.len(), "read header lines");
    Ok(lines)
}

fn read_lines_from<R: Read>(reader: R) -> std::io::Result<Vec<String>> {
    BufReader::new(reader)
        .lines()
        .take(HEADER_LINE_COUNT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_after_header() {
        let input = (0..12).map(|i| format!("line{i}\n")).collect::<String>();
        let lines = read_lines_from(input.as_bytes()).expect("read");
        assert_eq!(lines.len(), HEADER_LINE_COUNT);
        assert_eq!(lines[7], "line7");
    }

    #[test]
    fn short_input_returns_what_exists() {
        let lines = read_lines_from("#separator \\x09\r\n#path\tconn".as_bytes()).expect("read");
        assert_eq!(lines, ["#separator \\x09", "#path\tconn"]);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_header_lines(Path::new("/nonexistent/bro/conn.log")).unwrap_err();
        assert!(matches!(err, HeaderError::FileNotFound { .. }));
    }
}
