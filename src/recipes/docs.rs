use crate::composer::{Composer, Recipe};
use crate::error::Result;
use crate::fsops;
use crate::gemfile::GemOptions;
use crate::stages::Stage;

/// Documentation tooling. The README writer registers under `Finalize`, a
/// stage the default driver leaves untouched; embedders that want it run the
/// stage explicitly.
pub struct DocsRecipe;

impl Recipe for DocsRecipe {
    fn name(&self) -> &str {
        "docs"
    }

    fn apply(&self, composer: &mut Composer) -> Result<()> {
        composer.add_gem("yard", Some("~> 0.9.20"), GemOptions::group(["development"]))?;

        let gitignore = composer.path(".gitignore");
        composer.defer(Stage::PostInstall, move || {
            fsops::append_to_file(&gitignore, "/.yardoc\n/doc/\n")
        });

        let readme = composer.path("README.md");
        let app_name = composer.app_name();
        composer.defer(Stage::Finalize, move || {
            fsops::create_file(
                &readme,
                &format!(
                    "\
# {app_name}

This Rails project was composed by railseed.

## Development

```shell
bundle exec yard server
```

## Tests

```shell
bundle exec rspec
COVERAGE=1 bundle exec rspec
```
"
                ),
                true,
            )
        });
        Ok(())
    }
}
