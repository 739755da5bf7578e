use crate::error::{CliError, CliResult};
use bbk_contacts_csvs::write_error;
use bbk_contacts_sdk::ContactsError;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Marks a conversion in progress for one output file.
///
/// Held for the whole run and released on drop, whether the run succeeded,
/// failed or unwound.
#[derive(Debug)]
pub struct RunGuard {
    lock_path: PathBuf,
}

impl RunGuard {
    pub fn acquire(output: &Path) -> CliResult<Self> {
        Self::acquire_with(output, |file| writeln!(file, "{}", std::process::id()))
    }

    fn acquire_with<F>(output: &Path, stamp: F) -> CliResult<Self>
    where
        F: FnOnce(&mut File) -> io::Result<()>,
    {
        let lock_path = lock_path_for(output);

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(CliError::RunInProgress(lock_path));
            }
            // Lock lives in the output's directory
            Err(e) => return Err(ContactsError::from(write_error(output, e)).into()),
        };

        // Drop removes the lock from here on
        let guard = Self { lock_path };
        stamp(&mut file)?;

        debug!(lock = %guard.lock_path.display(), "run guard acquired");
        Ok(guard)
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock_path) {
            warn!(lock = %self.lock_path.display(), error = %e, "failed to release run guard");
        }
    }
}

/// `名片.csv` → `名片.csv.lock`
fn lock_path_for(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".lock");
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbk_contacts_sdk::FailureKind;
    use tempfile::tempdir;

    #[test]
    fn test_second_run_rejected_while_first_holds_guard() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("名片.csv");

        let guard = RunGuard::acquire(&output).unwrap();
        assert!(guard.lock_path().exists());
        assert!(matches!(
            RunGuard::acquire(&output),
            Err(CliError::RunInProgress(_))
        ));

        drop(guard);
        assert!(!dir.path().join("名片.csv.lock").exists());
        assert!(RunGuard::acquire(&output).is_ok());
    }

    #[test]
    fn test_guard_released_on_error_path() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("名片.csv");

        let failing_run = || -> CliResult<()> {
            let _guard = RunGuard::acquire(&output)?;
            Err(CliError::Unexpected("boom".to_string()))
        };
        assert!(failing_run().is_err());
        assert!(!dir.path().join("名片.csv.lock").exists());
    }

    #[test]
    fn test_lock_removed_when_pid_write_fails() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("名片.csv");

        let result = RunGuard::acquire_with(&output, |_| {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        });
        assert!(matches!(result, Err(CliError::Io(_))));
        assert!(!dir.path().join("名片.csv.lock").exists());

        assert!(RunGuard::acquire(&output).is_ok());
    }

    #[test]
    fn test_missing_output_directory_is_write_failure() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("missing").join("名片.csv");

        let err = RunGuard::acquire(&output).unwrap_err();
        assert!(matches!(
            &err,
            CliError::Contacts(e) if e.kind() == FailureKind::WriteFailed
        ));
        assert_eq!(err.headline(), "Failed to write contact file");
    }

    #[test]
    fn test_lock_path_for() {
        assert_eq!(
            lock_path_for(Path::new("out/名片.csv")),
            PathBuf::from("out/名片.csv.lock")
        );
    }
}
