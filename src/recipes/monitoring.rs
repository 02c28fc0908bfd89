use crate::composer::{Composer, Recipe};
use crate::error::Result;
use crate::fsops;
use crate::gemfile::GemOptions;
use crate::stages::Stage;

/// APM and error reporting. Both agents load lazily, only when their env
/// variables are present, so the gems are declared with `require: false`.
pub struct MonitoringRecipe;

impl Recipe for MonitoringRecipe {
    fn name(&self) -> &str {
        "monitoring"
    }

    fn apply(&self, composer: &mut Composer) -> Result<()> {
        composer.add_gem(
            "elastic-apm",
            Some("~> 3.1"),
            GemOptions::new().with_option("require", false),
        )?;
        composer.add_gem(
            "sentry-raven",
            Some("~> 2.12.2"),
            GemOptions::new().with_option("require", false),
        )?;

        let app_name = composer.app_name();
        let apm_init = composer.path("config/initializers/elastic_apm.rb");
        let sentry_init = composer.path("config/initializers/sentry.rb");

        composer.defer(Stage::PostInstall, move || {
            fsops::create_file(
                &apm_init,
                &format!(
                    "\
if ENV['ELASTIC_APM_SERVER_URL'].present?
  require 'elastic_apm'
  config.elastic_apm.service_name = \"{app_name}-#{{Rails.env}}\"
end
"
                ),
                false,
            )?;

            fsops::create_file(
                &sentry_init,
                "\
require 'raven/base'
if ENV['SENTRY_DSN'].present? && !(Rails.env.development? || Rails.env.test?)
  Raven.configure do |config|
    config.dsn = ENV['SENTRY_DSN']
    config.sanitize_fields = Rails.application.config.filter_parameters.map(&:to_s)
  end
  Raven.inject
end
",
                false,
            )
        });
        Ok(())
    }
}
