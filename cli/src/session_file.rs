//! Session cookie persistence between CLI invocations.
//!
//! The file holds a single `Cookie` header line (`name=value; name=value`).
//! A missing file means "no session".

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved cookie header, if any.
    pub fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let header = raw.trim();
                Ok((!header.is_empty()).then(|| header.to_owned()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write the cookie header, or remove the file when there is none.
    pub fn save(&self, header: Option<&str>) -> io::Result<()> {
        match header.map(str::trim).filter(|h| !h.is_empty()) {
            Some(header) => {
                let mut file = open_private(&self.path)?;
                writeln!(file, "{header}")
            }
            None => match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            },
        }
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

#[cfg(test)]
#[path = "session_file_test.rs"]
mod tests;
