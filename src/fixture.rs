//! Helpers for tests that materialize fixture trees with copydir.

use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Changes the current working directory, restoring the previous one when
/// dropped.
///
/// The working directory is process-wide: tests holding a guard must not run
/// concurrently with other tests that depend on it.
#[derive(Debug)]
pub struct CurrentDirGuard {
    previous: PathBuf,
}

impl CurrentDirGuard {
    pub fn change_to<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir).map_err(|source| Error::Io {
            step: "doing chdir",
            path: dir.to_path_buf(),
            source,
        })?;
        debug!("Changed directory to {}", dir.display());
        Ok(Self { previous })
    }

    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for CurrentDirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            panic!("chdir: cleanup: restoring {}: {}", self.previous.display(), e);
        }
    }
}

/// Runs `tree -a` on `dir`, logs the listing and returns it.
///
/// # Errors
/// * `Error::IoError` if `tree` cannot be spawned or exits unsuccessfully
pub fn tree<P: AsRef<Path>>(dir: P) -> Result<String> {
    let dir = dir.as_ref();
    let output = Command::new("tree").arg("-a").arg(dir).output()?;
    if !output.status.success() {
        return Err(Error::IoError(std::io::Error::other(format!(
            "tree {} failed with status: {}",
            dir.display(),
            output.status
        ))));
    }
    let listing = String::from_utf8_lossy(&output.stdout).into_owned();
    debug!("\n{}", listing);
    Ok(listing)
}
