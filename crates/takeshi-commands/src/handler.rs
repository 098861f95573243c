//! Handler binding for command definitions.

use crate::manifest::CommandDefinition;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use takeshi_core::{
    config::Config, error::TakeshiError, extract::CommandDescriptor, logger::Logger,
    message::WebMessage,
};

/// Everything a handler gets to see about the invocation.
pub struct CommandContext<'a> {
    pub message: &'a WebMessage,
    pub descriptor: &'a CommandDescriptor,
    pub category: &'a str,
    pub definition: &'a CommandDefinition,
    pub config: &'a Config,
    pub logger: &'a dyn Logger,
}

/// A runnable command. Returns the reply text.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext<'_>) -> Result<String, TakeshiError>;
}

/// Handlers keyed by the `handler` field of command definitions.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `key`, replacing any previous one.
    pub fn register(&mut self, key: &str, handler: Arc<dyn CommandHandler>) -> &mut Self {
        self.handlers.insert(key.to_string(), handler);
        self
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeshi_core::logger::MemoryLogger;

    struct Echo;

    #[async_trait]
    impl CommandHandler for Echo {
        async fn handle(&self, ctx: &CommandContext<'_>) -> Result<String, TakeshiError> {
            Ok(ctx.descriptor.full_args.clone())
        }
    }

    #[tokio::test]
    async fn test_registry_lookup_and_invoke() {
        let mut registry = HandlerRegistry::new();
        registry.register("echo", Arc::new(Echo));
        assert!(registry.contains("echo"));
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.keys(), vec!["echo"]);

        let message = WebMessage::from_text("1@s.whatsapp.net", "/echo oi tudo bem");
        let descriptor = CommandDescriptor {
            full_args: "oi tudo bem".into(),
            ..Default::default()
        };
        let definition = CommandDefinition::new("echo", &["echo"]);
        let config = Config::default();
        let logger = MemoryLogger::new();
        let ctx = CommandContext {
            message: &message,
            descriptor: &descriptor,
            category: "member",
            definition: &definition,
            config: &config,
            logger: &logger,
        };

        let reply = registry.get("echo").unwrap().handle(&ctx).await.unwrap();
        assert_eq!(reply, "oi tudo bem");
    }
}
