//! External dependency installer invocation
//!
//! After the manifest has been flushed, the composer shells out to the package
//! installer. The installer is a black box: it either succeeds or fails the
//! whole run.

use std::path::Path;
use std::process::Command;

use crate::constants::DEFAULT_INSTALLER_PROGRAM;
use crate::error::{Error, Result};

pub trait Installer {
    fn install(&self, app_dir: &Path) -> Result<()>;
}

/// Runs `bundle install` in the application directory.
#[derive(Debug, Clone)]
pub struct BundlerInstaller {
    program: String,
    quiet: bool,
}

impl Default for BundlerInstaller {
    fn default() -> Self {
        Self { program: DEFAULT_INSTALLER_PROGRAM.to_string(), quiet: true }
    }
}

impl BundlerInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the installer program. Used by tests.
    pub fn with_program(program: &str) -> Self {
        Self { program: program.to_string(), quiet: true }
    }
}

impl Installer for BundlerInstaller {
    fn install(&self, app_dir: &Path) -> Result<()> {
        log::info!("installing dependencies with '{} install'", self.program);
        let mut command = Command::new(&self.program);
        command.arg("install").current_dir(app_dir);
        if self.quiet {
            command.arg("--quiet");
        }

        let status = command.status()?;
        if !status.success() {
            return Err(Error::InstallError { status });
        }
        Ok(())
    }
}

/// Skips installation entirely, for `--skip-install` runs.
#[derive(Debug, Default)]
pub struct SkipInstaller;

impl Installer for SkipInstaller {
    fn install(&self, _app_dir: &Path) -> Result<()> {
        log::info!("skipping dependency installation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeding_program_installs_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let installer = BundlerInstaller::with_program("true");
        installer.install(dir.path()).unwrap();
    }

    #[test]
    fn nonzero_exit_is_an_install_error() {
        let dir = tempfile::tempdir().unwrap();
        let installer = BundlerInstaller::with_program("false");
        let err = installer.install(dir.path()).unwrap_err();
        assert!(matches!(err, Error::InstallError { .. }));
    }

    #[test]
    fn missing_program_surfaces_as_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let installer = BundlerInstaller::with_program("railseed-no-such-program");
        let err = installer.install(dir.path()).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn skip_installer_always_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        SkipInstaller.install(dir.path()).unwrap();
    }
}
