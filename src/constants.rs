//! Constants used throughout the railseed application

/// Name of the dependency manifest inside the application skeleton
pub const MANIFEST_FILENAME: &str = "Gemfile";

/// Default program used to install declared dependencies
pub const DEFAULT_INSTALLER_PROGRAM: &str = "bundle";

/// Recipe tag used for callbacks registered outside any recipe
pub const COMPOSER_TAG: &str = "composer";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
