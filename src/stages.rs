//! Deferred callback registration and staged execution
//!
//! Recipes register zero-argument callbacks while the composition script runs;
//! the driver executes them later, after the manifest has been written and the
//! dependencies installed. Callbacks run in strict registration order within a
//! stage and are never reordered or deduplicated.

use std::collections::HashMap;
use std::fmt::Display;

use crate::constants::COMPOSER_TAG;
use crate::error::{Error, Result};

/// Execution phases for deferred callbacks, relative to manifest flush and
/// dependency install. The default driver only runs `PostInstall`; the later
/// stages exist for embedders that drive extra phases themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Right after the external installer has finished.
    PostInstall,
    /// After all post-install work, e.g. writing project documentation.
    Finalize,
    /// Last-chance housekeeping.
    Cleanup,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::PostInstall => "post-install",
            Stage::Finalize => "finalize",
            Stage::Cleanup => "cleanup",
        };
        write!(f, "{s}")
    }
}

type Action = Box<dyn FnOnce() -> Result<()>>;

struct DeferredCallback {
    recipe: Option<String>,
    action: Action,
}

impl DeferredCallback {
    fn recipe_tag(&self) -> &str {
        self.recipe.as_deref().unwrap_or(COMPOSER_TAG)
    }
}

/// Ordered registry of deferred callbacks, keyed by stage.
#[derive(Default)]
pub struct CallbackRunner {
    stages: HashMap<Stage, Vec<DeferredCallback>>,
}

impl CallbackRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a callback to the ordered list for `stage`. Nothing executes at
    /// registration time.
    pub fn register<F>(&mut self, stage: Stage, recipe: Option<&str>, action: F)
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        self.stages.entry(stage).or_default().push(DeferredCallback {
            recipe: recipe.map(str::to_string),
            action: Box::new(action),
        });
    }

    /// Number of callbacks currently registered for `stage`.
    pub fn registered(&self, stage: Stage) -> usize {
        self.stages.get(&stage).map_or(0, Vec::len)
    }

    /// Drains and invokes every callback registered for `stage`, in
    /// registration order. Callbacks share the process state: each one observes
    /// the file writes of the ones before it.
    ///
    /// Fail-fast: the first callback error stops the remaining callbacks in
    /// this stage. Other stages are unaffected.
    pub fn run_stage(&mut self, stage: Stage) -> Result<()> {
        let callbacks = self.stages.remove(&stage).unwrap_or_default();
        log::info!("running {} '{stage}' callback(s)", callbacks.len());

        for callback in callbacks {
            let recipe = callback.recipe_tag().to_string();
            log::debug!("running '{stage}' callback from recipe '{recipe}'");
            (callback.action)()
                .map_err(|e| Error::CallbackError { recipe, source: Box::new(e) })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(
        log: &Rc<RefCell<Vec<&'static str>>>,
        entry: &'static str,
    ) -> impl FnOnce() -> Result<()> + 'static {
        let log = Rc::clone(log);
        move || {
            log.borrow_mut().push(entry);
            Ok(())
        }
    }

    #[test]
    fn runs_callbacks_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut runner = CallbackRunner::new();
        runner.register(Stage::PostInstall, Some("dotenv"), recording(&log, "first"));
        runner.register(Stage::PostInstall, Some("testing"), recording(&log, "second"));
        runner.register(Stage::PostInstall, None, recording(&log, "third"));

        runner.run_stage(Stage::PostInstall).unwrap();
        assert_eq!(*log.borrow(), ["first", "second", "third"]);
    }

    #[test]
    fn only_runs_the_requested_stage() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut runner = CallbackRunner::new();
        runner.register(Stage::PostInstall, None, recording(&log, "post-install"));
        runner.register(Stage::Finalize, None, recording(&log, "finalize"));

        runner.run_stage(Stage::PostInstall).unwrap();
        assert_eq!(*log.borrow(), ["post-install"]);
        assert_eq!(runner.registered(Stage::Finalize), 1);
    }

    #[test]
    fn stops_at_first_failing_callback() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut runner = CallbackRunner::new();
        runner.register(Stage::PostInstall, Some("ok"), recording(&log, "ran"));
        runner.register(Stage::PostInstall, Some("broken"), || {
            Err(Error::PromptError("boom".to_string()))
        });
        runner.register(Stage::PostInstall, Some("skipped"), recording(&log, "never"));

        let err = runner.run_stage(Stage::PostInstall).unwrap_err();
        assert!(matches!(err, Error::CallbackError { ref recipe, .. } if recipe == "broken"));
        assert_eq!(*log.borrow(), ["ran"]);
    }

    #[test]
    fn failure_leaves_other_stages_untouched() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut runner = CallbackRunner::new();
        runner.register(Stage::PostInstall, Some("broken"), || {
            Err(Error::PromptError("boom".to_string()))
        });
        runner.register(Stage::Finalize, None, recording(&log, "finalize"));

        assert!(runner.run_stage(Stage::PostInstall).is_err());
        runner.run_stage(Stage::Finalize).unwrap();
        assert_eq!(*log.borrow(), ["finalize"]);
    }

    #[test]
    fn running_an_empty_stage_is_a_noop() {
        let mut runner = CallbackRunner::new();
        runner.run_stage(Stage::Cleanup).unwrap();
    }

    #[test]
    fn untagged_callbacks_report_the_composer_tag() {
        let mut runner = CallbackRunner::new();
        runner.register(Stage::PostInstall, None, || {
            Err(Error::PromptError("boom".to_string()))
        });

        let err = runner.run_stage(Stage::PostInstall).unwrap_err();
        assert!(matches!(err, Error::CallbackError { ref recipe, .. } if recipe == COMPOSER_TAG));
    }
}
