use crate::composer::{Composer, Recipe};
use crate::error::Result;
use crate::fsops;
use crate::prompt::Choice;
use crate::stages::Stage;

/// Database configuration driven entirely by environment variables. The
/// adapter is chosen interactively; the config file itself is written after
/// install so the dotenv entries already exist.
pub struct DatabaseRecipe;

impl Recipe for DatabaseRecipe {
    fn name(&self) -> &str {
        "database"
    }

    fn apply(&self, composer: &mut Composer) -> Result<()> {
        let choices = [
            Choice::new("PostgreSQL", "postgresql"),
            Choice::new("MySQL", "mysql2"),
            Choice::new("SQLite", "sqlite3"),
        ];
        let adapter = composer.prompter().choose_one("Which database adapter?", &choices)?;

        let prefix = composer.app_name().to_uppercase();
        let config_path = composer.path("config/database.yml");

        composer.defer(Stage::PostInstall, move || {
            let content = format!(
                "\
default: &default
  adapter: {adapter}
  encoding: unicode
  pool: <%= ENV.fetch('RAILS_MAX_THREADS') {{ 5 }} %>
  host: <%= ENV.fetch('{prefix}_PGSQL_HOST') %>
  port: <%= ENV.fetch('{prefix}_PGSQL_PORT') %>
  username: <%= ENV.fetch('{prefix}_PGSQL_USERNAME') %>
  password: <%= ENV.fetch('{prefix}_PGSQL_PASSWORD', nil) %>

development:
  <<: *default
  database: <%= ENV.fetch('{prefix}_PGSQL_DATABASE_PREFIX') %>_dev

test:
  <<: *default
  database: <%= ENV.fetch('{prefix}_PGSQL_DATABASE_PREFIX') %>_test

production:
  <<: *default
  database: <%= ENV.fetch('{prefix}_PGSQL_DATABASE_PREFIX') %>_prod
"
            );
            fsops::create_file(&config_path, &content, true)
        });
        Ok(())
    }
}
