use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Invalid dependency declaration: {0}.")]
    InvalidDeclaration(String),

    #[error("Cannot create '{path}': file already exists.")]
    FileExistsError { path: String },

    #[error("Marker '{marker}' not found in '{path}'.")]
    MarkerNotFoundError { path: String, marker: String },

    #[error("Failed to parse line pattern. Original error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Prompt failed: {0}.")]
    PromptInteractionError(#[from] dialoguer::Error),

    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// When the installer has executed but finished with an error.
    #[error("Dependency installation failed with status: {status}")]
    InstallError { status: ExitStatus },

    /// A deferred callback raised; remaining callbacks in its stage were skipped.
    #[error("Callback from recipe '{recipe}' failed: {source}")]
    CallbackError { recipe: String, source: Box<Error> },

    #[error("Cannot proceed: application directory '{app_dir}' does not exist.")]
    AppDirMissingError { app_dir: String },

    #[error("Cannot proceed: no manifest found at '{path}'.")]
    ManifestMissingError { path: String },
}

/// Convenience type alias for Results with this crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
