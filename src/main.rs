mod dispatch;
mod handlers;
mod menu;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use takeshi_core::{
    config,
    logger::{ConsoleLogger, Logger},
    message::WebMessage,
    util,
};
use takeshi_media::FetchOptions;

#[derive(Parser)]
#[command(
    name = "takeshi",
    version,
    about = "Takeshi — WhatsApp bot command tooling"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the help menu.
    Menu,
    /// Show how a text message is parsed, as JSON.
    Parse {
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Parse a text message and look up its command.
    Resolve {
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// List every command found in the commands directory.
    Catalog,
    /// Run a message through the dispatcher and print the reply.
    Dispatch {
        /// Inbound message JSON file.
        #[arg(long, conflicts_with = "text")]
        message: Option<PathBuf>,
        /// Plain text to send as a private message instead.
        #[arg(long)]
        text: Option<String>,
    },
    /// Check whether the stored session credentials are stale.
    Creds,
    /// Download a URL to a file.
    Fetch {
        url: String,
        /// Output file path.
        #[arg(short, long)]
        out: PathBuf,
        /// Extra header, `Name: value` (repeatable).
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// Proxy URL.
        #[arg(long)]
        proxy: Option<String>,
    },
}

const CLI_JID: &str = "0@s.whatsapp.net";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.bot.log_level)),
        )
        .init();

    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new(&cfg.bot.name, env!("CARGO_PKG_VERSION")));
    let mut dispatcher =
        dispatch::Dispatcher::new(cfg.clone(), logger.clone(), handlers::builtin_handlers());

    match cli.command {
        Commands::Menu => {
            println!(
                "{}",
                menu::menu_message(&cfg.bot, chrono::Local::now().naive_local())
            );
        }
        Commands::Parse { text } => {
            let message = WebMessage::from_text(CLI_JID, &text.join(" "));
            let descriptor = dispatcher.describe(&message);
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
        Commands::Resolve { text } => {
            let message = WebMessage::from_text(CLI_JID, &text.join(" "));
            let descriptor = dispatcher.describe(&message);
            dispatcher.refresh()?;
            let resolution = dispatcher.lookup(&descriptor.command_name);
            match resolution.command {
                Some(def) => println!(
                    "{} → {} ({}) [handler: {}]",
                    descriptor.command_name,
                    def.name,
                    resolution.category,
                    def.handler
                ),
                None => println!("{} → not found", descriptor.command_name),
            }
        }
        Commands::Catalog => {
            logger.banner();
            let count = dispatcher.refresh()?;
            for category in dispatcher.catalog().categories() {
                println!("[{}]", category.name);
                for def in &category.commands {
                    let aliases = def
                        .aliases
                        .as_ref()
                        .map(|a| a.join(", "))
                        .unwrap_or_else(|| "<invalid commands list>".to_string());
                    println!("  {:<24} {}", def.name, aliases);
                }
            }
            logger.success(&format!("{count} command(s) loaded"));
        }
        Commands::Dispatch { message, text } => {
            let message = match (message, text) {
                (Some(path), _) => {
                    let raw = std::fs::read_to_string(&path)?;
                    serde_json::from_str::<WebMessage>(&raw)?
                }
                (None, Some(text)) => WebMessage::from_text(CLI_JID, &text),
                (None, None) => anyhow::bail!("pass --message <file> or --text <text>"),
            };
            dispatcher.refresh()?;
            logger.talk(menu::WAIT_MESSAGE);
            match dispatcher.dispatch(&message).await? {
                Some(reply) => logger.talk(&reply),
                None => logger.info("no command to run for this message"),
            }
        }
        Commands::Creds => {
            let assets = cfg.paths.assets_dir();
            match util::last_creds_timestamp(&assets)? {
                Some(ts) => {
                    let minutes = cfg.creds.stale_after_minutes;
                    if util::is_at_least_minutes_in_past(ts, minutes) {
                        logger.warning(&format!(
                            "last account sync is at least {minutes} minute(s) old ({ts})"
                        ));
                    } else {
                        logger.success(&format!("last account sync is recent ({ts})"));
                    }
                }
                None => logger.warning("credentials have no lastAccountSyncTimestamp"),
            }
        }
        Commands::Fetch {
            url,
            out,
            headers,
            proxy,
        } => {
            let mut options = FetchOptions::default();
            for header in &headers {
                let Some((name, value)) = header.split_once(':') else {
                    anyhow::bail!("invalid header '{header}', expected 'Name: value'");
                };
                options = options.header(name.trim(), value.trim());
            }
            if let Some(proxy) = proxy {
                options = options.proxy(&proxy);
            }

            let bytes = match takeshi_media::get_buffer(&url, &options).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    logger.error(&format!("download failed: {e}"));
                    return Err(e.into());
                }
            };
            tokio::fs::write(&out, &bytes).await?;
            logger.success(&format!("saved {} bytes to {}", bytes.len(), out.display()));
        }
    }

    Ok(())
}
