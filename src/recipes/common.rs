use crate::composer::{Composer, Recipe};
use crate::error::Result;
use crate::gemfile::GemOptions;

/// Ungrouped utility gems every application in this stack carries.
pub struct CommonGemsRecipe;

impl Recipe for CommonGemsRecipe {
    fn name(&self) -> &str {
        "common_gems"
    }

    fn apply(&self, composer: &mut Composer) -> Result<()> {
        composer.add_gem("kaminari", Some("~> 1.1"), GemOptions::new())?;
        composer.add_gem("kaminari-i18n", Some("~> 0.5.0"), GemOptions::new())?;
        composer.add_gem("rails-i18n", Some("~> 6.0"), GemOptions::new())?;
        composer.add_gem("request_store", Some("~> 1.4"), GemOptions::new())?;
        composer.add_gem("strip_attributes", Some("~> 1.9"), GemOptions::new())?;
        Ok(())
    }
}
