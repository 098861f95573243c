//! Message dispatch: extract → resolve → run handler.

use std::sync::Arc;
use takeshi_commands::{resolve, Catalog, CommandContext, HandlerRegistry, Resolution};
use takeshi_core::{
    config::Config,
    error::TakeshiError,
    extract::{extract_data_from_message, CommandDescriptor},
    logger::Logger,
    message::WebMessage,
};
use tracing::debug;

/// Owns the command catalog and the handler bindings.
///
/// The catalog is only rebuilt on [`Dispatcher::refresh`]; lookups never
/// touch the filesystem.
pub struct Dispatcher {
    config: Config,
    logger: Arc<dyn Logger>,
    handlers: HandlerRegistry,
    catalog: Catalog,
}

impl Dispatcher {
    /// Create a dispatcher with an empty catalog.
    pub fn new(config: Config, logger: Arc<dyn Logger>, handlers: HandlerRegistry) -> Self {
        Self {
            config,
            logger,
            handlers,
            catalog: Catalog::default(),
        }
    }

    /// Replace the catalog with a prebuilt one.
    #[cfg(test)]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Rescan the commands directory. Returns the number of definitions.
    pub fn refresh(&mut self) -> Result<usize, TakeshiError> {
        let root = self.config.paths.commands_dir();
        self.catalog = Catalog::load(&root, self.logger.as_ref())?;
        debug!(
            "dispatch: loaded {} command(s) from {}",
            self.catalog.len(),
            root.display()
        );
        Ok(self.catalog.len())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Normalize a message with the configured prefixes and separators.
    pub fn describe(&self, message: &WebMessage) -> CommandDescriptor {
        extract_data_from_message(
            message,
            &self.config.bot.prefixes(),
            &self.config.parsing.arg_separators,
        )
    }

    /// Look up a normalized command name in the current catalog.
    pub fn lookup(&self, command_name: &str) -> Resolution<'_> {
        resolve(&self.catalog, command_name, self.logger.as_ref())
    }

    /// Handle one inbound message.
    ///
    /// Returns `Ok(None)` when the message is not a command for this bot:
    /// no text, wrong prefix, unknown name, or a handler key with nothing
    /// registered. Handler errors are logged and returned.
    pub async fn dispatch(&self, message: &WebMessage) -> Result<Option<String>, TakeshiError> {
        let descriptor = self.describe(message);
        if !descriptor.has_text() || !descriptor.has_prefix(&self.config.bot.prefixes()) {
            return Ok(None);
        }

        self.logger.input(&format!(
            "{} → {}",
            descriptor
                .user_jid
                .as_deref()
                .or(descriptor.remote_jid.as_deref())
                .unwrap_or("?"),
            descriptor.full_message
        ));

        let resolution = self.lookup(&descriptor.command_name);
        let Some(definition) = resolution.command else {
            debug!("dispatch: no command named '{}'", descriptor.command_name);
            return Ok(None);
        };

        let Some(handler) = self.handlers.get(&definition.handler) else {
            self.logger.warning(&format!(
                "command \"{}\" ({}) points to unregistered handler \"{}\"",
                definition.name,
                definition.file_label(),
                definition.handler
            ));
            return Ok(None);
        };

        let ctx = CommandContext {
            message,
            descriptor: &descriptor,
            category: resolution.category,
            definition,
            config: &self.config,
            logger: self.logger.as_ref(),
        };

        match handler.handle(&ctx).await {
            Ok(reply) => {
                self.logger
                    .success(&format!("{} ran /{}", resolution.category, definition.name));
                Ok(Some(reply))
            }
            Err(e) => {
                self.logger
                    .error(&format!("command \"{}\" failed: {e}", definition.name));
                Err(e)
            }
        }
    }
}
