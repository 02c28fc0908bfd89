use crate::composer::{Composer, Recipe};
use crate::error::Result;
use crate::fsops;
use crate::gemfile::GemOptions;
use crate::stages::Stage;

/// Test and debugging toolchain: rspec with factory_bot and shoulda-matchers,
/// coverage reporting, and pry consoles for development.
pub struct TestingRecipe;

impl Recipe for TestingRecipe {
    fn name(&self) -> &str {
        "testing"
    }

    fn apply(&self, composer: &mut Composer) -> Result<()> {
        let dev_test = || GemOptions::group(["development", "test"]);
        composer.add_gem("pry-rails", Some("~> 0.3.9"), dev_test())?;
        composer.add_gem("pry-remote", Some("~> 0.1.8"), dev_test())?;
        composer.add_gem("rspec-rails", Some("~> 3.9"), dev_test())?;
        composer.add_gem("factory_bot_rails", Some("~> 5.1"), dev_test())?;
        composer.add_gem("shoulda-matchers", Some("~> 4.1"), dev_test())?;
        composer.add_gem("simplecov", Some("~> 0.17.0"), dev_test())?;

        let gitignore = composer.path(".gitignore");
        let rakefile = composer.path("Rakefile");
        let shoulda = composer.path("spec/support/shoulda.rb");
        let factory_bot = composer.path("spec/support/factory_bot.rb");

        composer.defer(Stage::PostInstall, move || {
            fsops::append_to_file(&rakefile, "load 'rspec/rails/tasks/rspec.rake'\n")?;
            fsops::append_to_file(&gitignore, "/coverage\n")?;

            fsops::create_file(
                &shoulda,
                "\
require 'shoulda-matchers'
Shoulda::Matchers.configure do |config|
  config.integrate do |with|
    with.test_framework :rspec
    with.library :rails
  end
end
",
                false,
            )?;

            fsops::create_file(
                &factory_bot,
                "\
RSpec.configure do |config|
  config.include FactoryBot::Syntax::Methods
end
",
                false,
            )
        });
        Ok(())
    }
}
