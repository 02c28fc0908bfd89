/// Handles argument parsing.
pub mod cli;

/// Orchestrates recipes, manifest flush, install and staged callbacks.
pub mod composer;

/// Shared constant values.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// A set of helpers for mutating files inside the application skeleton.
pub mod fsops;

/// Dependency manifest aggregation and rendering.
pub mod gemfile;

/// External dependency installer invocation.
pub mod installer;

/// User input and interaction handling.
pub mod prompt;

/// Built-in composition recipes.
pub mod recipes;

/// Deferred callback registration and staged execution.
pub mod stages;
