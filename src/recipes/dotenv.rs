use crate::composer::{Composer, Recipe};
use crate::error::Result;
use crate::fsops;
use crate::gemfile::GemOptions;
use crate::stages::Stage;

/// Environment variable handling: the dotenv gem, a committed `.env` listing
/// every variable the application reads, and a `.env.local.example` seeded
/// with prompted database credentials. Local env files are git-ignored.
pub struct DotenvRecipe;

impl Recipe for DotenvRecipe {
    fn name(&self) -> &str {
        "dotenv"
    }

    fn apply(&self, composer: &mut Composer) -> Result<()> {
        composer.add_gem("dotenv-rails", Some("~> 2.7"), GemOptions::new())?;

        let app_name = composer.app_name();
        let prefix = app_name.to_uppercase();
        let username = composer.prompter().ask("PostgreSQL username")?;
        let password = composer.prompter().ask("PostgreSQL password")?;

        let gitignore = composer.path(".gitignore");
        let env_file = composer.path(".env");
        let example_file = composer.path(".env.local.example");

        composer.defer(Stage::PostInstall, move || {
            for name in
                [".env.development.local", ".env.test.local", ".env.production.local", ".env.local"]
            {
                fsops::append_to_file(&gitignore, &format!("{name}\n"))?;
            }

            fsops::create_file(
                &env_file,
                &format!(
                    "\
# copy this file to .env.local for development
# don't change this file!!!
SITE_TITLE='{prefix}'
{prefix}_PGSQL_HOST=
{prefix}_PGSQL_PORT=
{prefix}_PGSQL_USERNAME=
{prefix}_PGSQL_PASSWORD=
{prefix}_PGSQL_DATABASE_PREFIX='{app_name}'
SECRET_KEY_BASE=
ELASTIC_APM_SERVER_URL=
SENTRY_DSN=
"
                ),
                false,
            )?;

            fsops::create_file(
                &example_file,
                &format!(
                    "\
{prefix}_PGSQL_HOST='localhost'
{prefix}_PGSQL_PORT='5432'
{prefix}_PGSQL_USERNAME='{username}'
{prefix}_PGSQL_PASSWORD='{password}'
"
                ),
                false,
            )
        });
        Ok(())
    }
}
