//! Save service seam.
//!
//! The exporter hands finished bytes to a [`SaveTarget`] and waits for its
//! answer; where the bytes end up is the target's business.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

/// Failure reported by a save target; the reason is shown to the user verbatim
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct SaveError {
    pub reason: String,
}

impl SaveError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Somewhere an export can be saved
pub trait SaveTarget {
    /// Save `bytes` under a bare file name (no directory components)
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError>;
}

impl<F> SaveTarget for F
where
    F: Fn(&[u8], &str) -> Result<(), SaveError>,
{
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError> {
        self(bytes, filename)
    }
}

/// Saves exports as files inside one directory
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: false,
        }
    }

    /// Replace existing files instead of failing
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl SaveTarget for DirectorySaver {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError> {
        if !is_bare_name(filename) {
            return Err(SaveError::new(format!(
                "Invalid file name '{}': directory components are not allowed",
                filename
            )));
        }

        let path = self.dir.join(filename);
        let mut options = OpenOptions::new();
        options.write(true);
        if self.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options
            .open(&path)
            .map_err(|e| SaveError::new(format!("Failed to create {}: {}", path.display(), e)))?;
        file.write_all(bytes)
            .map_err(|e| SaveError::new(format!("Failed to write {}: {}", path.display(), e)))?;

        debug!(path = %path.display(), bytes = bytes.len(), "saved export");
        Ok(())
    }
}

fn is_bare_name(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saves_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());
        saver.save(b"# hi\n", "chat_session.md").unwrap();
        let written = std::fs::read_to_string(dir.path().join("chat_session.md")).unwrap();
        assert_eq!(written, "# hi\n");
    }

    #[test]
    fn test_rejects_directory_components() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());
        for name in ["../x.md", "a/b.md", "a\\b.md", "..", ""] {
            assert!(saver.save(b"x", name).is_err(), "{name}");
        }
    }

    #[test]
    fn test_refuses_overwrite_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());
        saver.save(b"one", "a.md").unwrap();
        assert!(saver.save(b"two", "a.md").is_err());

        let saver = saver.overwrite(true);
        saver.save(b"two", "a.md").unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("a.md")).unwrap(), "two");
    }

    #[test]
    fn test_closure_target() {
        let target = |bytes: &[u8], name: &str| -> Result<(), SaveError> {
            if bytes.is_empty() {
                Err(SaveError::new(format!("{} is empty", name)))
            } else {
                Ok(())
            }
        };
        assert!(target.save(b"x", "a.md").is_ok());
        assert_eq!(target.save(b"", "a.md").unwrap_err().to_string(), "a.md is empty");
    }
}
