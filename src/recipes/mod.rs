//! Built-in composition recipes
//!
//! Each recipe declares the gems it needs and defers its file mutations until
//! after dependency installation. Recipes run in the order returned by
//! [`default_recipes`]; later recipes may rely on files written by earlier
//! ones.

mod app_config;
mod common;
mod database;
mod docs;
mod dotenv;
mod monitoring;
mod testing;

pub use app_config::AppConfigRecipe;
pub use common::CommonGemsRecipe;
pub use database::DatabaseRecipe;
pub use docs::DocsRecipe;
pub use dotenv::DotenvRecipe;
pub use monitoring::MonitoringRecipe;
pub use testing::TestingRecipe;

use crate::composer::Recipe;

/// The standard recipe set, in execution order.
pub fn default_recipes() -> Vec<Box<dyn Recipe>> {
    vec![
        Box::new(AppConfigRecipe),
        Box::new(DotenvRecipe),
        Box::new(DatabaseRecipe),
        Box::new(TestingRecipe),
        Box::new(CommonGemsRecipe),
        Box::new(MonitoringRecipe),
        Box::new(DocsRecipe),
    ]
}
