//! Bot console logging.
//!
//! Components that report to the operator take a `&dyn Logger` instead of
//! printing directly, so tests can swap in [`MemoryLogger`].

use console::style;
use std::sync::Mutex;

/// Category of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    Talk,
    Input,
    Info,
    Success,
    Error,
    Warning,
    Banner,
}

impl LogKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Talk => "TALK",
            Self::Input => "INPUT",
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Banner => "BANNER",
        }
    }
}

/// Operator-facing log sinks.
pub trait Logger: Send + Sync {
    fn log(&self, kind: LogKind, message: &str);

    /// Print the startup banner.
    fn banner(&self);

    fn talk(&self, message: &str) {
        self.log(LogKind::Talk, message);
    }

    fn input(&self, message: &str) {
        self.log(LogKind::Input, message);
    }

    fn info(&self, message: &str) {
        self.log(LogKind::Info, message);
    }

    fn success(&self, message: &str) {
        self.log(LogKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.log(LogKind::Error, message);
    }

    fn warning(&self, message: &str) {
        self.log(LogKind::Warning, message);
    }
}

const BANNER: [&str; 3] = [
    "░▀█▀░█▀█░█░█░█▀▀░█▀▀░█░█░▀█▀░░█▀▄░█▀█░▀█▀",
    "░░█░░█▀█░█▀▄░█▀▀░▀▀█░█▀█░░█░░░█▀▄░█░█░░█░",
    "░░▀░░▀░▀░▀░▀░▀▀▀░▀▀▀░▀░▀░▀▀▀░░▀▀░░▀▀▀░░▀░",
];

/// Colorized stdout logger. One line per call, no buffering, no filtering.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    tag: String,
    version: String,
}

impl ConsoleLogger {
    pub fn new(bot_name: &str, version: &str) -> Self {
        Self {
            tag: bot_name.to_uppercase(),
            version: version.to_string(),
        }
    }

    /// Render the tagged line without printing it.
    pub fn format_line(&self, kind: LogKind, message: &str) -> String {
        let tag = format!("[{} | {}]", self.tag, kind.label());
        let tag = match kind {
            LogKind::Talk | LogKind::Banner => style(tag).cyan(),
            LogKind::Input => style(tag).black(),
            LogKind::Info => style(tag).blue(),
            LogKind::Success => style(tag).green(),
            LogKind::Error => style(tag).red(),
            LogKind::Warning => style(tag).yellow(),
        };
        format!("{tag} {message}")
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, kind: LogKind, message: &str) {
        println!("{}", self.format_line(kind, message));
    }

    fn banner(&self) {
        println!("{}", style(BANNER[0]).cyan());
        println!("{}", BANNER[1]);
        println!("{}", style(BANNER[2]).cyan());
        println!("{}{}\n", style("🤖 Versão: ").cyan(), self.version);
    }
}

/// Logger that records lines in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(LogKind, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines, oldest first.
    pub fn lines(&self) -> Vec<(LogKind, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Recorded messages of one kind.
    pub fn of_kind(&self, kind: LogKind) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, kind: LogKind, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((kind, message.to_string()));
        }
    }

    fn banner(&self) {
        self.log(LogKind::Banner, BANNER.join("\n").as_str());
    }
}
