//! Install location discovery.
//!
//! Bundled resources live next to the installed binary, so the registry
//! needs the directory that contains the running executable. Symlinks are
//! followed so a binary linked into `~/.local/bin` still resolves to the
//! real installation.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory containing the running executable.
pub fn current_install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| Error::location_io("current executable", e))?;
    install_dir_of(&exe)
}

/// Directory containing `file`, after resolving symlinks.
pub fn install_dir_of(file: &Path) -> Result<PathBuf> {
    let real = dunce::canonicalize(file)
        .map_err(|e| Error::location_io(file.display().to_string(), e))?;

    real.parent().map(Path::to_path_buf).ok_or_else(|| {
        Error::location(real.display().to_string(), "path has no parent directory")
    })
}

/// Make `dir` absolute without touching the filesystem.
pub(crate) fn absolutize(dir: &Path) -> Result<PathBuf> {
    std::path::absolute(dir).map_err(|e| Error::location_io(dir.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_current_install_dir_is_absolute_directory() {
        let dir = current_install_dir().unwrap();
        assert!(dir.is_absolute());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_install_dir_of_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("chip");
        std::fs::write(&file, "").unwrap();

        let dir = install_dir_of(&file).unwrap();
        assert_eq!(dir, dunce::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn test_install_dir_of_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = install_dir_of(&temp.path().join("absent")).unwrap_err();
        assert!(matches!(err, Error::LocationResolution { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_install_dir_of_root_has_no_parent() {
        let err = install_dir_of(Path::new("/")).unwrap_err();
        match err {
            Error::LocationResolution { origin, reason, .. } => {
                assert_eq!(origin, "/");
                assert_eq!(reason, "path has no parent directory");
            }
            other => panic!("expected LocationResolution, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_install_dir_follows_symlink() {
        let install = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        let real = install.path().join("chip");
        std::fs::write(&real, "").unwrap();
        let link = bin.path().join("chip");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let dir = install_dir_of(&link).unwrap();
        assert_eq!(dir, dunce::canonicalize(install.path()).unwrap());
    }

    #[test]
    fn test_absolutize_relative() {
        let dir = absolutize(Path::new("share/metachip")).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("share/metachip"));
    }
}
