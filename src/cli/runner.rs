use crate::{
    cli::Args,
    composer::Composer,
    error::Result,
    installer::{BundlerInstaller, Installer, SkipInstaller},
    prompt::{ConsolePrompter, Prompter, ScriptedPrompter},
    recipes::default_recipes,
};

/// Main CLI runner that orchestrates the entire composition workflow.
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the complete composition workflow.
    pub fn run(self) -> Result<()> {
        let prompter: Box<dyn Prompter> = match &self.args.answers {
            Some(answers) => Box::new(ScriptedPrompter::new(answers.clone())),
            None => Box::new(ConsolePrompter::new()),
        };

        let installer: Box<dyn Installer> = if self.args.skip_install {
            Box::new(SkipInstaller)
        } else {
            Box::new(BundlerInstaller::new())
        };

        let mut composer = Composer::new(&self.args.app_dir, prompter)?;
        composer.run(&default_recipes(), installer.as_ref())?;

        println!("Composition completed successfully in {}.", self.args.app_dir.display());
        Ok(())
    }
}

/// Convenience entry point used by `main`.
pub fn run(args: Args) -> Result<()> {
    Runner::new(args).run()
}
