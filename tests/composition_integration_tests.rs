use std::cell::RefCell;
use std::path::Path;

use railseed::composer::Composer;
use railseed::error::{Error, Result};
use railseed::installer::Installer;
use railseed::prompt::ScriptedPrompter;
use railseed::recipes::default_recipes;
use railseed::stages::Stage;
use tempfile::TempDir;

/// Lays out the files a freshly generated application skeleton provides.
fn create_skeleton() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("Gemfile"),
        "source 'https://rubygems.org'\n\ngem 'rails', '~> 6.0.0'\ngem 'tzinfo-data', platforms: [:mingw]\n",
    )
    .unwrap();
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(
        dir.path().join("config/application.rb"),
        "module MyApp\n  class Application < Rails::Application\n    config.load_defaults 6.0\n  end\nend\n",
    )
    .unwrap();
    std::fs::write(dir.path().join(".gitignore"), "/log\n").unwrap();
    std::fs::write(dir.path().join("Rakefile"), "Rails.application.load_tasks\n").unwrap();
    dir
}

fn scripted() -> Box<ScriptedPrompter> {
    // dotenv asks for the database username and password; database asks for
    // the adapter via a numbered menu.
    Box::new(ScriptedPrompter::new(["postgres", "secret", "1"]))
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

/// Records what the manifest and skeleton looked like at install time.
#[derive(Default)]
struct RecordingInstaller {
    manifest_at_install: RefCell<String>,
    env_existed_at_install: RefCell<bool>,
}

impl Installer for RecordingInstaller {
    fn install(&self, app_dir: &Path) -> Result<()> {
        *self.manifest_at_install.borrow_mut() = read(&app_dir.join("Gemfile"));
        *self.env_existed_at_install.borrow_mut() = app_dir.join(".env").exists();
        Ok(())
    }
}

struct FailingInstaller;

impl Installer for FailingInstaller {
    fn install(&self, _app_dir: &Path) -> Result<()> {
        Err(Error::IoError(std::io::Error::other("bundler exited non-zero")))
    }
}

#[test]
fn composes_a_full_application_skeleton() {
    let dir = create_skeleton();
    let mut composer = Composer::new(dir.path(), scripted()).unwrap();
    let installer = RecordingInstaller::default();

    composer.run(&default_recipes(), &installer).unwrap();

    // Manifest was flushed before install; callbacks ran only afterwards.
    assert!(installer.manifest_at_install.borrow().contains("gem 'rspec-rails', '~> 3.9'"));
    assert!(!*installer.env_existed_at_install.borrow());

    let manifest = read(&dir.path().join("Gemfile"));
    assert!(manifest.starts_with("source 'https://rubygems.org'\n"));
    assert!(manifest.contains("# gem 'tzinfo-data'"));
    assert!(manifest.contains("gem 'kaminari', '~> 1.1'\n"));
    assert!(manifest.contains("gem 'elastic-apm', '~> 3.1', require: false\n"));
    assert!(manifest.contains("group :development do\n  gem 'yard', '~> 0.9.20'\nend\n"));

    // Grouped block: names sorted, ungrouped section first.
    let dev_test = "group :development, :test do\n  \
gem 'factory_bot_rails', '~> 5.1'\n  \
gem 'pry-rails', '~> 0.3.9'\n  \
gem 'pry-remote', '~> 0.1.8'\n  \
gem 'rspec-rails', '~> 3.9'\n  \
gem 'shoulda-matchers', '~> 4.1'\n  \
gem 'simplecov', '~> 0.17.0'\nend\n";
    assert!(manifest.contains(dev_test));
    assert!(manifest.find("gem 'kaminari'").unwrap() < manifest.find("group :development do").unwrap());

    // In-body edits from the app_config recipe.
    let application_rb = read(&dir.path().join("config/application.rb"));
    assert!(application_rb.contains("config.load_defaults 6.0\n    config.i18n.default_locale"));
    assert!(application_rb.contains("config.time_zone = 'Beijing'"));

    // Deferred file mutations, in registration order.
    let gitignore = read(&dir.path().join(".gitignore"));
    let env_pos = gitignore.find(".env.local").unwrap();
    let coverage_pos = gitignore.find("/coverage").unwrap();
    let yardoc_pos = gitignore.find("/.yardoc").unwrap();
    assert!(env_pos < coverage_pos);
    assert!(coverage_pos < yardoc_pos);

    let env = read(&dir.path().join(".env"));
    assert!(env.contains("_PGSQL_DATABASE_PREFIX"));
    let example = read(&dir.path().join(".env.local.example"));
    assert!(example.contains("USERNAME='postgres'"));
    assert!(example.contains("PASSWORD='secret'"));

    let database_yml = read(&dir.path().join("config/database.yml"));
    assert!(database_yml.contains("adapter: postgresql"));

    assert!(read(&dir.path().join("Rakefile")).contains("load 'rspec/rails/tasks/rspec.rake'"));
    assert!(dir.path().join("spec/support/shoulda.rb").exists());
    assert!(dir.path().join("spec/support/factory_bot.rb").exists());
    assert!(dir.path().join("config/initializers/sentry.rb").exists());

    // The finalize stage is registered but not run by the default driver.
    assert!(!dir.path().join("README.md").exists());
    assert_eq!(composer.deferred(Stage::Finalize), 1);
}

#[test]
fn finalize_stage_runs_only_when_driven_explicitly() {
    let dir = create_skeleton();
    let mut composer = Composer::new(dir.path(), scripted()).unwrap();

    composer.run(&default_recipes(), &RecordingInstaller::default()).unwrap();
    composer.run_stage(Stage::Finalize).unwrap();

    let readme = read(&dir.path().join("README.md"));
    assert!(readme.contains("composed by railseed"));
}

#[test]
fn failed_install_aborts_before_callbacks() {
    let dir = create_skeleton();
    let mut composer = Composer::new(dir.path(), scripted()).unwrap();

    let err = composer.run(&default_recipes(), &FailingInstaller).unwrap_err();
    assert!(matches!(err, Error::IoError(_)));

    // The manifest flush already happened; no deferred callback ran.
    assert!(read(&dir.path().join("Gemfile")).contains("gem 'rspec-rails'"));
    assert!(!dir.path().join(".env").exists());
    assert!(!dir.path().join("config/database.yml").exists());
}

#[test]
fn rerunning_render_after_flush_is_stable() {
    let dir = create_skeleton();
    let mut composer = Composer::new(dir.path(), scripted()).unwrap();
    composer.run(&default_recipes(), &RecordingInstaller::default()).unwrap();

    let first = composer.gemfile().render();
    let second = composer.gemfile().render();
    assert_eq!(first, second);
}
