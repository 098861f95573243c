//! Command name → definition lookup.

use crate::catalog::Catalog;
use crate::manifest::CommandDefinition;
use takeshi_core::logger::Logger;

/// Outcome of a lookup. `command` is `None` when nothing matched, in which
/// case `category` is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    pub category: &'a str,
    pub command: Option<&'a CommandDefinition>,
}

impl Resolution<'_> {
    pub fn is_found(&self) -> bool {
        self.command.is_some()
    }
}

/// Find the definition whose aliases contain `command_name`.
///
/// `command_name` must already be normalized. Categories are searched in
/// catalog order and the first match wins. Definitions without a usable
/// alias list are reported through `logger` and skipped.
pub fn resolve<'a>(catalog: &'a Catalog, command_name: &str, logger: &dyn Logger) -> Resolution<'a> {
    for category in catalog.categories() {
        let found = category.commands.iter().find(|def| match def.matches(command_name) {
            Some(hit) => hit,
            None => {
                logger.warning(&format!(
                    "command in category \"{}\" has no usable \"commands\" list \
                     (expected a non-empty array of names): {}",
                    category.name,
                    def.file_label()
                ));
                false
            }
        });

        if let Some(def) = found {
            return Resolution {
                category: &category.name,
                command: Some(def),
            };
        }
    }

    Resolution {
        category: "",
        command: None,
    }
}
