// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use serde_json::Value;

use crate::Error;
use crate::ErrorKind;
use crate::Level;
use crate::LevelInput;
use crate::LogRecord;
use crate::append::Append;
use crate::append::File;
use crate::color::LevelColor;
use crate::config::Config;
use crate::config::ConfigOverrides;
use crate::layout::Rendered;
use crate::trap::Trap;
use crate::webhook::Webhook;

mod builder;
mod log_impl;

pub use self::builder::LoggerBuilder;

/// A logger that fans every call out to its console, file and webhook sinks.
///
/// Cloning is cheap; clones share sinks and pending webhook deliveries.
///
/// # Examples
///
/// ```
/// use logfan::Logger;
/// use logfan::config::ConfigOverrides;
/// use logfan::config::FileSink;
/// use serde_json::json;
///
/// let dir = tempfile::tempdir().unwrap();
/// let overrides = ConfigOverrides::default().files([FileSink::new(dir.path().join("app.log"))]);
/// let logger = Logger::new("shop", "database", Some(overrides)).unwrap();
///
/// logger.info("Connected to the database!", None).unwrap();
/// logger
///     .log(2, "Database table 'foo' missing", Some(&json!({"database": "bar"})))
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    dispatcher: Arc<Dispatcher>,
    webhook: Option<Arc<Webhook>>,
}

impl Logger {
    /// Create a logger for `application`/`subprocess` with the given overrides merged over the
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::InvalidArgument`] error if either name is empty.
    pub fn new(
        application: impl Into<String>,
        subprocess: impl Into<String>,
        overrides: Option<ConfigOverrides>,
    ) -> Result<Logger, Error> {
        let mut builder = Logger::builder(application, subprocess);
        if let Some(overrides) = overrides {
            builder = builder.config(overrides);
        }
        builder.build()
    }

    /// Create a [`LoggerBuilder`] for finer control over the sinks.
    pub fn builder(application: impl Into<String>, subprocess: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(application.into(), subprocess.into())
    }

    /// Log a message at the given level.
    ///
    /// `level` is a code in `0..=7` or a level name. Every enabled sink whose threshold admits
    /// the level receives the record. This never notifies the webhook; see [`Logger::error`].
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::UnknownLevel`] error, without writing anything, if `level` is not a
    /// level. Return an [`ErrorKind::IoFailure`] error if any sink failed; the other sinks are
    /// still written.
    pub fn log<'a>(
        &self,
        level: impl Into<LevelInput<'a>>,
        message: &str,
        extra: Option<&Value>,
    ) -> Result<(), Error> {
        let level = Level::normalize(level)?;
        self.dispatcher.dispatch(level, message, extra)
    }

    /// Log a message at FATAL.
    pub fn fatal(&self, message: &str, extra: Option<&Value>) -> Result<(), Error> {
        self.dispatcher.dispatch(Level::Fatal, message, extra)
    }

    /// Log a message at ERROR, then notify the webhook if one is configured.
    ///
    /// The notification is sent in the background; its failures are logged at FATAL and never
    /// returned here.
    pub fn error(&self, message: &str, extra: Option<&Value>) -> Result<(), Error> {
        let dispatched = self.dispatcher.dispatch(Level::Error, message, extra);
        if let Some(webhook) = &self.webhook {
            webhook.notify(&self.dispatcher, message, extra);
        }
        dispatched
    }

    /// Log a message at WARNING.
    pub fn warning(&self, message: &str, extra: Option<&Value>) -> Result<(), Error> {
        self.dispatcher.dispatch(Level::Warning, message, extra)
    }

    /// Alias of [`Logger::warning`].
    pub fn warn(&self, message: &str, extra: Option<&Value>) -> Result<(), Error> {
        self.warning(message, extra)
    }

    /// Log a message at SUCCESS.
    pub fn success(&self, message: &str, extra: Option<&Value>) -> Result<(), Error> {
        self.dispatcher.dispatch(Level::Success, message, extra)
    }

    /// Log a message at INFO.
    pub fn info(&self, message: &str, extra: Option<&Value>) -> Result<(), Error> {
        self.dispatcher.dispatch(Level::Info, message, extra)
    }

    /// Log a message at DEBUG.
    pub fn debug(&self, message: &str, extra: Option<&Value>) -> Result<(), Error> {
        self.dispatcher.dispatch(Level::Debug, message, extra)
    }

    /// Log a message at VERBOSE.
    pub fn verbose(&self, message: &str, extra: Option<&Value>) -> Result<(), Error> {
        self.dispatcher.dispatch(Level::Verbose, message, extra)
    }

    /// Log a message at TRACE.
    pub fn trace(&self, message: &str, extra: Option<&Value>) -> Result<(), Error> {
        self.dispatcher.dispatch(Level::Trace, message, extra)
    }

    /// Wait for in-flight webhook notifications, then flush the console.
    pub fn flush(&self) -> Result<(), Error> {
        if let Some(webhook) = &self.webhook {
            webhook.wait();
        }
        self.dispatcher.console.flush()
    }

    /// The effective configuration.
    pub fn config(&self) -> &Config {
        &self.dispatcher.config
    }

    /// The application name.
    pub fn application(&self) -> &str {
        &self.dispatcher.application
    }

    /// The subprocess name.
    pub fn subprocess(&self) -> &str {
        &self.dispatcher.subprocess
    }

    /// Whether any sink would write a record at `level`.
    pub fn enabled(&self, level: Level) -> bool {
        self.dispatcher.accepts(level)
    }
}

/// Renders records and writes them to the console and file sinks.
///
/// Holds no route to the webhook, so FATAL self-logs from webhook failures cannot trigger
/// another notification.
#[derive(Debug)]
pub(crate) struct Dispatcher {
    application: String,
    subprocess: String,
    config: Config,
    console: Box<dyn Append>,
    files: Vec<File>,
    colors: LevelColor,
    trap: Box<dyn Trap>,
}

impl Dispatcher {
    fn new(
        application: String,
        subprocess: String,
        config: Config,
        console: Box<dyn Append>,
        colors: LevelColor,
        trap: Box<dyn Trap>,
    ) -> Self {
        let files = config.file.iter().map(|sink| File::new(&sink.path)).collect();
        Self {
            application,
            subprocess,
            config,
            console,
            files,
            colors,
            trap,
        }
    }

    fn console_accepts(&self, level: Level) -> bool {
        self.config.stdout.enable && level.passes(self.config.stdout.level)
    }

    fn accepts(&self, level: Level) -> bool {
        self.console_accepts(level)
            || self
                .config
                .file
                .iter()
                .any(|sink| sink.enable && level.passes(sink.level))
    }

    pub(crate) fn dispatch(
        &self,
        level: Level,
        message: &str,
        extra: Option<&Value>,
    ) -> Result<(), Error> {
        let record = LogRecord::new(level, &self.application, &self.subprocess, message, extra);
        let rendered = Rendered::new(&record);
        let human = rendered.human();
        let mut failures = vec![];

        if self.console_accepts(level) {
            let stdout = &self.config.stdout;
            let line = if stdout.json {
                rendered.json.clone()
            } else if stdout.color {
                format!(
                    "{} {}",
                    self.colors.paint_timestamp(&rendered.timestamp),
                    self.colors.paint(level, &rendered.body)
                )
            } else {
                human.clone()
            };
            if let Err(err) = self.console.append(&line) {
                failures.push(err);
            }
        }

        for (sink, file) in self.config.file.iter().zip(&self.files) {
            if !sink.enable || !level.passes(sink.level) {
                continue;
            }
            let line = if sink.json { &rendered.json } else { &human };
            if let Err(err) = file.append(line) {
                failures.push(err);
            }
        }

        if failures.is_empty() {
            return Ok(());
        }

        let mut err = Error::new(ErrorKind::IoFailure, "failed to write log sinks")
            .with_context("level", level)
            .with_context("failed", failures.len());
        for failure in failures {
            err = err.with_source(failure);
        }
        Err(err)
    }

    pub(crate) fn trap(&self, err: &Error) {
        self.trap.trap(err);
    }
}
