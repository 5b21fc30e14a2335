//! Moves a staged download to its final destination.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::PathPersistError;
use tracing::{debug, instrument};

use super::error::TransferError;
use super::worker::StagedFile;

/// Moves `staged` to `destination`, replacing any existing file.
///
/// Uses a rename; when the staging file sits on another filesystem the body
/// is copied and the staging file removed instead.
///
/// # Errors
///
/// Returns [`TransferError::Io`] carrying `destination` if neither the rename
/// nor the copy succeeds. The staging file is removed in that case.
#[instrument(skip(staged), fields(staged = %staged.path().display()))]
pub async fn move_into_place(
    staged: StagedFile,
    destination: &Path,
) -> Result<PathBuf, TransferError> {
    match staged.into_temp_path().persist(destination) {
        Ok(()) => {
            debug!(destination = %destination.display(), "renamed into place");
            Ok(destination.to_path_buf())
        }
        Err(PathPersistError { error, path }) if error.kind() == io::ErrorKind::CrossesDevices => {
            debug!(
                destination = %destination.display(),
                "staging file on another filesystem, copying"
            );
            tokio::fs::copy(&path, destination)
                .await
                .map_err(|e| TransferError::io(destination, e))?;
            // Dropping the TempPath removes the staging copy.
            drop(path);
            Ok(destination.to_path_buf())
        }
        Err(PathPersistError { error, .. }) => Err(TransferError::io(destination, error)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::download::ErrorKind;
    use tempfile::TempDir;

    fn staged_with(dir: &Path, contents: &[u8]) -> StagedFile {
        let temp = tempfile::Builder::new()
            .prefix(".lwget-")
            .suffix(".part")
            .tempfile_in(dir)
            .unwrap();
        std::fs::write(temp.path(), contents).unwrap();
        StagedFile::for_tests(temp.into_temp_path(), contents.len() as u64)
    }

    #[tokio::test]
    async fn test_move_into_place_renames_staging_file() {
        let dir = TempDir::new().unwrap();
        let staged = staged_with(dir.path(), b"payload");
        let staged_path = staged.path().to_path_buf();
        let destination = dir.path().join("final.bin");

        let result = move_into_place(staged, &destination).await.unwrap();

        assert_eq!(result, destination);
        assert_eq!(std::fs::read(&destination).unwrap(), b"payload");
        assert!(!staged_path.exists());
    }

    #[tokio::test]
    async fn test_move_into_place_overwrites_existing_destination() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("final.bin");
        std::fs::write(&destination, b"old contents that are longer").unwrap();

        let staged = staged_with(dir.path(), b"new");
        move_into_place(staged, &destination).await.unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_move_into_missing_directory_is_io_error_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let staged = staged_with(dir.path(), b"payload");
        let staged_path = staged.path().to_path_buf();
        let destination = dir.path().join("missing").join("final.bin");

        let err = move_into_place(staged, &destination).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Filesystem);
        match err {
            TransferError::Io { path, .. } => assert_eq!(path, destination),
            other => panic!("expected Io error, got {other:?}"),
        }
        assert!(!staged_path.exists(), "staging file must not be left behind");
    }
}
