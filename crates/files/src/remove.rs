//! Removing and renaming files.

use crate::error::FilesError;
use logging::{debug_log, info_log};
use std::fs;
use std::io;
use std::path::Path;

/// Removes the file at `path`, treating an already absent file as success.
pub fn remove(path: impl AsRef<Path>) -> Result<(), FilesError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => {
            info_log!(Remove, 1, "removed {:?}", path);
            Ok(())
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug_log!(Del, 2, "{:?} already absent", path);
            Ok(())
        }
        Err(source) => Err(FilesError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Removes the file at `path`, ignoring every failure.
pub fn safe_rm(path: impl AsRef<Path>) {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => info_log!(Remove, 1, "removed {:?}", path),
        Err(error) => debug_log!(Del, 1, "ignoring failure to remove {:?}: {}", path, error),
    }
}

/// Renames `from` to `to`, replacing `to` if it exists.
///
/// On platforms where renaming onto an existing file fails, the destination
/// is removed first and the rename retried. A destination that disappears
/// in between is fine; any other failure to remove it is reported as
/// [`FilesError::ReplaceDestination`].
pub fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<(), FilesError> {
    let (from, to) = (from.as_ref(), to.as_ref());
    let rename_error = |source| FilesError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    match fs::rename(from, to) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
            debug_log!(Del, 1, "clearing {:?} before rename", to);
            match fs::remove_file(to) {
                Ok(()) => {}
                Err(error) if error.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(FilesError::ReplaceDestination {
                        path: to.to_path_buf(),
                        source,
                    });
                }
            }
            fs::rename(from, to).map_err(rename_error)?;
        }
        Err(error) => return Err(rename_error(error)),
    }
    debug_log!(Io, 1, "renamed {:?} to {:?}", from, to);
    Ok(())
}
