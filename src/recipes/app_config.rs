use crate::composer::{Composer, Recipe};
use crate::error::Result;
use crate::fsops;

/// Baseline application configuration: silences the platform-specific tzinfo
/// gem and injects framework defaults right below `config.load_defaults`.
/// These edits happen during the script body, not deferred, so later recipes
/// see the updated files.
pub struct AppConfigRecipe;

impl Recipe for AppConfigRecipe {
    fn name(&self) -> &str {
        "app_config"
    }

    fn apply(&self, composer: &mut Composer) -> Result<()> {
        fsops::comment_lines(composer.path("Gemfile"), "^gem 'tzinfo-data'")?;

        let settings = "    config.i18n.default_locale = :'zh-CN'
    config.time_zone = 'Beijing'
    config.generators.assets = false
    config.generators.helper = false
    config.generators.stylesheets = false
    config.active_record.schema_format = :sql
";
        fsops::inject_after_marker(
            composer.path("config/application.rb"),
            "config.load_defaults 6.0\n",
            settings,
        )
    }
}
