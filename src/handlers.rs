//! Built-in command handlers.

use async_trait::async_trait;
use std::sync::Arc;
use takeshi_commands::{CommandContext, CommandHandler, HandlerRegistry};
use takeshi_core::error::TakeshiError;

use crate::menu::menu_message;

/// `/menu` — the help text.
pub struct MenuHandler;

#[async_trait]
impl CommandHandler for MenuHandler {
    async fn handle(&self, ctx: &CommandContext<'_>) -> Result<String, TakeshiError> {
        Ok(menu_message(&ctx.config.bot, chrono::Local::now().naive_local()))
    }
}

/// `/ping` — liveness check.
pub struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    async fn handle(&self, _ctx: &CommandContext<'_>) -> Result<String, TakeshiError> {
        Ok("🏓 Pong!".to_string())
    }
}

/// `/get-id` — the chat's JID.
pub struct GetIdHandler;

#[async_trait]
impl CommandHandler for GetIdHandler {
    async fn handle(&self, ctx: &CommandContext<'_>) -> Result<String, TakeshiError> {
        let jid = ctx
            .descriptor
            .remote_jid
            .as_deref()
            .ok_or_else(|| TakeshiError::Command("message has no remote JID".into()))?;
        Ok(format!("ID do chat: {jid}"))
    }
}

/// Registry with every built-in handler.
pub fn builtin_handlers() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry
        .register("menu", Arc::new(MenuHandler))
        .register("ping", Arc::new(PingHandler))
        .register("get-id", Arc::new(GetIdHandler));
    registry
}
