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

use crate::Error;
use crate::ErrorKind;
use crate::Logger;
use crate::append::Append;
use crate::append::Stdout;
use crate::color::LevelColor;
use crate::config::Config;
use crate::config::ConfigOverrides;
use crate::logger::Dispatcher;
use crate::trap::DefaultTrap;
use crate::trap::Trap;
use crate::webhook::Transport;
use crate::webhook::Webhook;

/// A builder for configuring a [`Logger`].
///
/// # Examples
///
/// ```
/// use logfan::Logger;
/// use logfan::append;
/// use logfan::config::ConfigOverrides;
///
/// let logger = Logger::builder("shop", "web-server")
///     .config(ConfigOverrides::default().files([]))
///     .console(append::Stderr::default())
///     .build()
///     .unwrap();
///
/// logger.info("listening on :8080", None).unwrap();
/// ```
#[must_use = "call `build` to construct the logger"]
#[derive(Debug)]
pub struct LoggerBuilder {
    application: String,
    subprocess: String,
    overrides: ConfigOverrides,
    console: Box<dyn Append>,
    transport: Option<Box<dyn Transport>>,
    colors: LevelColor,
    trap: Box<dyn Trap>,
}

impl LoggerBuilder {
    pub(super) fn new(application: String, subprocess: String) -> Self {
        Self {
            application,
            subprocess,
            overrides: ConfigOverrides::default(),
            console: Box::new(Stdout::default()),
            transport: None,
            colors: LevelColor::default(),
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the overrides merged over the default configuration.
    pub fn config(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set the console target.
    ///
    /// Default to [`Stdout`].
    pub fn console(mut self, console: impl Into<Box<dyn Append>>) -> Self {
        self.console = console.into();
        self
    }

    /// Set the transport used for webhook notifications.
    ///
    /// Default to [`ReqwestTransport`](crate::webhook::ReqwestTransport) when the `reqwest`
    /// feature is enabled.
    pub fn transport(mut self, transport: impl Into<Box<dyn Transport>>) -> Self {
        self.transport = Some(transport.into());
        self
    }

    /// Set the console emphasis of each level.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Set the trap for errors that cannot be returned to a caller.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the [`Logger`].
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::InvalidArgument`] error if the application or subprocess name is
    /// empty, or if a webhook URL is configured while no transport is available.
    pub fn build(self) -> Result<Logger, Error> {
        let LoggerBuilder {
            application,
            subprocess,
            overrides,
            console,
            transport,
            colors,
            trap,
        } = self;

        for (argument, value) in [("application", &application), ("subprocess", &subprocess)] {
            if value.is_empty() {
                return Err(Error::new(
                    ErrorKind::InvalidArgument,
                    format!("{argument} cannot be empty"),
                )
                .with_context("argument", argument));
            }
        }

        let config = Config::default().merge(overrides);
        // an empty url is the same as none
        let webhook = match config.webhook.url.clone().filter(|url| !url.is_empty()) {
            None => None,
            Some(url) => {
                let transport = match transport {
                    Some(transport) => transport,
                    None => default_transport()?,
                };
                Some(Arc::new(Webhook::new(url, transport)))
            }
        };

        let dispatcher = Dispatcher::new(application, subprocess, config, console, colors, trap);
        Ok(Logger {
            dispatcher: Arc::new(dispatcher),
            webhook,
        })
    }
}

#[cfg(feature = "reqwest")]
fn default_transport() -> Result<Box<dyn Transport>, Error> {
    Ok(Box::new(crate::webhook::ReqwestTransport::default()))
}

#[cfg(not(feature = "reqwest"))]
fn default_transport() -> Result<Box<dyn Transport>, Error> {
    Err(Error::new(
        ErrorKind::InvalidArgument,
        "a webhook url is configured but no transport is set",
    ))
}
