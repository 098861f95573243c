//! # takeshi-core
//!
//! Core types, traits, configuration, and error handling for the Takeshi bot.

pub mod config;
pub mod error;
pub mod extract;
pub mod jid;
pub mod logger;
pub mod message;
pub mod text;
pub mod traits;
pub mod util;
