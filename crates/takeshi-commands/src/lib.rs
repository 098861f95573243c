//! # takeshi-commands
//!
//! Command catalog for Takeshi. Scans `{commands_dir}/<category>/**/*.toml`
//! manifests, groups them by category folder, and resolves a normalized
//! command name to its definition. Handlers are bound by key through a
//! [`HandlerRegistry`] at startup.

mod catalog;
mod handler;
mod manifest;
mod resolve;

// Re-export public API — all consumers use `takeshi_commands::*` paths.
pub use catalog::{Catalog, CatalogBuilder, Category, MANIFEST_EXTENSIONS};
pub use handler::{CommandContext, CommandHandler, HandlerRegistry};
pub use manifest::CommandDefinition;
pub use resolve::{resolve, Resolution};
