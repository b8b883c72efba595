//! [`InstallFixture`] builder for registry test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Bundled files a complete installation ships.
pub const BUNDLED_FILES: [&str; 2] = ["MetaCHIP_phylo.hmm", "MetaCHIP_circos_HGT.R"];

/// A temporary installation directory plus a private `bin/` search path.
///
/// # Example
///
/// ```rust,no_run
/// use chip_test_utils::install::InstallFixture;
///
/// let fixture = InstallFixture::new().with_bundled_files();
/// fixture.add_executable("prodigal");
/// fixture.assert_file_exists("MetaCHIP_phylo.hmm");
/// ```
pub struct InstallFixture {
    temp_dir: TempDir,
    install_dir: PathBuf,
}

impl Default for InstallFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallFixture {
    /// Create an empty installation with an empty `bin/` directory.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn new() -> Self {
        let temp_dir = TempDir::new()
            .unwrap_or_else(|e| panic!("InstallFixture: failed to create tempdir: {e}"));
        let install_dir = temp_dir.path().join("metachip");
        fs::create_dir_all(install_dir.join("bin"))
            .unwrap_or_else(|e| panic!("InstallFixture: failed to create bin/: {e}"));
        Self {
            temp_dir,
            install_dir,
        }
    }

    /// Installation root, where bundled files live.
    pub fn path(&self) -> &Path {
        &self.install_dir
    }

    /// Directory holding fake executables, usable as a `PATH` value.
    pub fn bin_dir(&self) -> PathBuf {
        self.path().join("bin")
    }

    /// Write both bundled resource files (builder pattern).
    pub fn with_bundled_files(self) -> Self {
        for name in BUNDLED_FILES {
            self.write_file(name, "");
        }
        self
    }

    /// Write a file relative to the installation root.
    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("InstallFixture: failed to create {}: {e}", parent.display())
            });
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("InstallFixture: failed to write {}: {e}", path.display()));
        path
    }

    /// Create an executable stub named `name` in [`bin_dir`](Self::bin_dir).
    ///
    /// On Windows the stub gets an `.exe` extension so `PATHEXT` lookup finds it.
    pub fn add_executable(&self, name: &str) -> PathBuf {
        let file_name = if cfg!(windows) {
            format!("{name}.exe")
        } else {
            name.to_string()
        };
        let path = self.bin_dir().join(file_name);
        fs::write(&path, "#!/bin/sh\nexit 0\n")
            .unwrap_or_else(|e| panic!("InstallFixture: failed to write {}: {e}", path.display()));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap_or_else(|e| {
                panic!("InstallFixture: failed to chmod {}: {e}", path.display())
            });
        }

        path
    }

    /// Assert that a file exists relative to the installation root.
    pub fn assert_file_exists(&self, rel: &str) {
        let path = self.path().join(rel);
        assert!(path.is_file(), "Expected file to exist: {}", path.display());
    }

    /// Move the whole installation to a sibling directory named `name`.
    ///
    /// The previous path no longer exists afterwards.
    pub fn relocate(&mut self, name: &str) -> PathBuf {
        let dest = self.temp_dir.path().join(name);
        fs::rename(&self.install_dir, &dest).unwrap_or_else(|e| {
            panic!(
                "InstallFixture: failed to move {} to {}: {e}",
                self.install_dir.display(),
                dest.display()
            )
        });
        self.install_dir = dest.clone();
        dest
    }
}
