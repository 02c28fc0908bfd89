//! Orchestrates a composition run
//!
//! The composer owns the manifest aggregator, the callback registry and the
//! prompter. Recipes run top-to-bottom against it; afterwards the manifest is
//! flushed, the external installer runs, and the post-install callbacks
//! execute in registration order. Every error is fatal: there is no retry and
//! no rollback of files already written.

use std::path::{Path, PathBuf};

use crate::constants::MANIFEST_FILENAME;
use crate::error::{Error, Result};
use crate::gemfile::{GemOptions, GemfileAggregator};
use crate::installer::Installer;
use crate::prompt::Prompter;
use crate::stages::{CallbackRunner, Stage};

/// Phases of a composition run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Recipes are declaring gems and registering callbacks.
    Declaring,
    /// The manifest has been rendered and appended.
    ManifestFlushed,
    /// The external installer is running.
    Installing,
    /// Deferred callbacks for a stage are executing.
    RunningStage(Stage),
    Done,
}

/// A logical unit of composition work: declares gems, mutates files, and
/// defers the work that must wait until after dependency installation.
pub trait Recipe {
    fn name(&self) -> &str;
    fn apply(&self, composer: &mut Composer) -> Result<()>;
}

pub struct Composer {
    app_dir: PathBuf,
    manifest_path: PathBuf,
    gemfile: GemfileAggregator,
    callbacks: CallbackRunner,
    prompter: Box<dyn Prompter>,
    phase: RunPhase,
    current_recipe: Option<String>,
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("app_dir", &self.app_dir)
            .field("manifest_path", &self.manifest_path)
            .field("gemfile", &self.gemfile)
            .field("phase", &self.phase)
            .field("current_recipe", &self.current_recipe)
            .finish_non_exhaustive()
    }
}

impl Composer {
    /// Creates a composer for an existing application skeleton. The skeleton
    /// must already contain a manifest to append to.
    pub fn new<P: AsRef<Path>>(app_dir: P, prompter: Box<dyn Prompter>) -> Result<Self> {
        let app_dir = app_dir.as_ref().to_path_buf();
        if !app_dir.is_dir() {
            return Err(Error::AppDirMissingError { app_dir: app_dir.display().to_string() });
        }
        let manifest_path = app_dir.join(MANIFEST_FILENAME);
        if !manifest_path.is_file() {
            return Err(Error::ManifestMissingError {
                path: manifest_path.display().to_string(),
            });
        }

        Ok(Self {
            app_dir,
            manifest_path,
            gemfile: GemfileAggregator::new(),
            callbacks: CallbackRunner::new(),
            prompter,
            phase: RunPhase::Declaring,
            current_recipe: None,
        })
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// Resolves a path relative to the application directory.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.app_dir.join(relative)
    }

    /// Application name derived from the directory name, snake_cased. Recipes
    /// use it for env-var prefixes and service names.
    pub fn app_name(&self) -> String {
        let name = self
            .app_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "app".to_string());
        name.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn gemfile(&self) -> &GemfileAggregator {
        &self.gemfile
    }

    pub fn prompter(&mut self) -> &mut dyn Prompter {
        self.prompter.as_mut()
    }

    /// Declares a gem for the manifest. See [`GemfileAggregator::declare`].
    pub fn add_gem(&mut self, name: &str, version: Option<&str>, opts: GemOptions) -> Result<()> {
        self.gemfile.declare(name, version, opts)
    }

    /// Defers an action to `stage`, tagged with the recipe currently applying.
    pub fn defer<F>(&mut self, stage: Stage, action: F)
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        self.callbacks.register(stage, self.current_recipe.as_deref(), action);
    }

    /// Number of callbacks currently registered for `stage`.
    pub fn deferred(&self, stage: Stage) -> usize {
        self.callbacks.registered(stage)
    }

    /// Runs the whole composition: recipes, manifest flush, install, then the
    /// post-install callbacks.
    pub fn run(&mut self, recipes: &[Box<dyn Recipe>], installer: &dyn Installer) -> Result<()> {
        for recipe in recipes {
            log::info!("running '{}' recipe", recipe.name());
            self.current_recipe = Some(recipe.name().to_string());
            recipe.apply(self)?;
        }
        self.current_recipe = None;

        self.flush_manifest()?;

        self.phase = RunPhase::Installing;
        installer.install(&self.app_dir)?;

        self.run_stage(Stage::PostInstall)?;

        self.phase = RunPhase::Done;
        Ok(())
    }

    /// Renders the aggregated declarations and appends them to the manifest.
    pub fn flush_manifest(&mut self) -> Result<()> {
        self.gemfile.append_to(&self.manifest_path)?;
        self.phase = RunPhase::ManifestFlushed;
        Ok(())
    }

    /// Executes the deferred callbacks registered for `stage`.
    pub fn run_stage(&mut self, stage: Stage) -> Result<()> {
        self.phase = RunPhase::RunningStage(stage);
        self.callbacks.run_stage(stage)
    }
}
