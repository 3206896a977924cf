//! Plain-text game logs: one finished game's move record per line.
//!
//! IO problems are logged and swallowed; a missing log is an empty log.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing::warn;

/// Every line of the log at `path`. Empty if it cannot be read.
pub fn load_log_lines<P: AsRef<Path>>(path: P) -> Vec<String> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => text.lines().map(str::to_string).collect(),
        Err(err) => {
            warn!(path = %path.display(), %err, "could not read game log");
            Vec::new()
        }
    }
}

/// Append `lines` to the log at `path`, creating it if needed.
/// Returns `false` if anything could not be written.
pub fn save_log_lines<P: AsRef<Path>, S: AsRef<str>>(path: P, lines: &[S]) -> bool {
    let path = path.as_ref();
    match append(path, lines) {
        Ok(()) => true,
        Err(err) => {
            warn!(path = %path.display(), %err, "could not write game log");
            false
        }
    }
}

fn append<S: AsRef<str>>(path: &Path, lines: &[S]) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for line in lines {
        writeln!(file, "{}", line.as_ref())?;
    }
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "othello-records-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn save_appends_lines() {
        let path = scratch("append");
        assert!(save_log_lines(&path, &["19,18"]));
        assert!(
            save_log_lines(&path, &["37,-1".to_string(), "44".to_string()])
        );
        assert_eq!(load_log_lines(&path), vec!["19,18", "37,-1", "44"]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_log_is_empty() {
        assert!(load_log_lines(scratch("missing")).is_empty());
    }

    #[test]
    fn unwritable_path_reports_failure() {
        let dir = scratch("directory");
        fs::create_dir_all(&dir).unwrap();
        assert!(!save_log_lines(&dir, &["19"]));
        fs::remove_dir(&dir).unwrap();
    }
}
