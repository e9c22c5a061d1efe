use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, Metadata, Record};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::config::GeminiConfig;

static STUDIO_LOGGER: Lazy<StudioLogger> = Lazy::new(StudioLogger::new);
static INSTALLED: AtomicBool = AtomicBool::new(false);

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::default())
}

/// Installs the studio logger. Calling it again only swaps the configuration.
pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    STUDIO_LOGGER.update_config(config.clone());

    if INSTALLED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
    {
        if let Err(e) = log::set_logger(&*STUDIO_LOGGER) {
            INSTALLED.store(false, Ordering::SeqCst);
            return Err(format!("Failed to set logger: {:?}", e));
        }
    }

    log::set_max_level(config.min_level.to_level_filter());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Trace => "🔍",
            LogLevel::Debug => "🐛",
            LogLevel::Info => "💡",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "❌",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }

    pub fn from_log_level(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

/// One emitted record, also the JSON line shape in production mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub module: String,
    pub file: String,
    pub line: u32,
}

impl LogEntry {
    fn from_record(record: &Record) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level: LogLevel::from_log_level(record.level()),
            message: record.args().to_string(),
            module: record.module_path().unwrap_or("unknown").to_string(),
            file: record.file().unwrap_or("unknown").to_string(),
            line: record.line().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub show_colors: bool,
    pub show_emojis: bool,
    pub show_module: bool,
    pub show_file_location: bool,
    pub timestamp_format: String,
    pub output_json: bool,
    pub log_file_path: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: true,
            show_emojis: true,
            show_module: true,
            show_file_location: false,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            output_json: false,
            log_file_path: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_json_output(mut self, enabled: bool) -> Self {
        self.output_json = enabled;
        self
    }

    pub fn with_file_output(mut self, path: &str) -> Self {
        self.log_file_path = Some(path.to_string());
        self
    }

    pub fn production() -> Self {
        Self {
            show_colors: false,
            show_emojis: false,
            output_json: true,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            show_file_location: true,
            ..Default::default()
        }
    }
}

pub struct StudioLogger {
    config: Mutex<LoggerConfig>,
    log_file: Mutex<Option<File>>,
}

impl StudioLogger {
    fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
            log_file: Mutex::new(None),
        }
    }

    fn update_config(&self, new_config: LoggerConfig) {
        if let Ok(mut log_file) = self.log_file.lock() {
            *log_file = new_config.log_file_path.as_deref().and_then(|path| {
                OpenOptions::new().create(true).append(true).open(path).ok()
            });
        }
        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }
    }

    fn render(&self, entry: &LogEntry, config: &LoggerConfig) -> String {
        if config.output_json {
            return serde_json::to_string(entry).unwrap_or_default();
        }

        let timestamp = entry
            .timestamp
            .format(&config.timestamp_format)
            .to_string();
        let level = if config.show_emojis {
            format!("{} {}", entry.level.emoji(), entry.level.as_str())
        } else {
            entry.level.as_str().to_string()
        };

        let mut output = String::new();
        if config.show_colors {
            output.push_str(&format!(
                "{} [{}] ",
                timestamp.bright_black(),
                level.color(entry.level.color()).bold()
            ));
            if config.show_module {
                output.push_str(&format!("{}: ", entry.module.bright_blue()));
            }
            output.push_str(&entry.message.white().to_string());
        } else {
            output.push_str(&format!("{} [{}] ", timestamp, level));
            if config.show_module {
                output.push_str(&format!("{}: ", entry.module));
            }
            output.push_str(&entry.message);
        }

        if config.show_file_location {
            let location = format!(" ({}:{})", entry.file, entry.line);
            if config.show_colors {
                output.push_str(&location.bright_black().to_string());
            } else {
                output.push_str(&location);
            }
        }

        output
    }
}

impl log::Log for StudioLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match self.config.lock() {
            Ok(config) => LogLevel::from_log_level(metadata.level()) >= config.min_level,
            Err(_) => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = LogEntry::from_record(record);

        let Ok(config) = self.config.lock() else {
            return;
        };
        let line = self.render(&entry, &config);
        eprintln!("{}", line);

        if let Ok(mut guard) = self.log_file.lock() {
            if let Some(file) = guard.as_mut() {
                // The file never gets ANSI escapes.
                let plain = if config.show_colors && !config.output_json {
                    let plain_config = LoggerConfig {
                        show_colors: false,
                        ..config.clone()
                    };
                    self.render(&entry, &plain_config)
                } else {
                    line
                };
                let _ = writeln!(file, "{}", plain);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Ok(mut guard) = self.log_file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Logs how long a named operation took once it goes out of scope.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        log::debug!("⏱️  Starting timer: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::info!(
            "⏱️  {} finished in {}ms",
            self.name,
            self.elapsed().as_millis()
        );
    }
}

pub fn timer(name: &str) -> Timer {
    Timer::new(name)
}

pub fn log_config_info(config: &GeminiConfig) {
    log::info!("⚙️  Gemini configuration:");
    log::info!("   Model: {}", config.model());
    log::info!("   Endpoint: {}", config.base_url());
    match config.credential() {
        Ok(credential) => log::info!("   API key: {}", credential.masked()),
        Err(_) => log::warn!("   API key: not set"),
    }
}
