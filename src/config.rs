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

//! Sink configuration and how caller overrides merge over the defaults.
//!
//! Every override field is optional. Object-valued settings (`stdout`, `webhook`) merge field by
//! field, while a supplied `file` list replaces the default list as a whole: passing any file
//! list opts out of the default `./log.log` sink.
//!
//! # Examples
//!
//! ```
//! use logfan::config::Config;
//! use logfan::config::ConfigOverrides;
//!
//! let overrides: ConfigOverrides = serde_json::from_str(
//!     r#"{"stdout": {"json": true}, "file": [{"path": "./human.log", "json": false}]}"#,
//! )
//! .unwrap();
//!
//! let config = Config::default().merge(overrides);
//! assert!(config.stdout.enable);
//! assert!(config.stdout.json);
//! assert_eq!(config.file.len(), 1);
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use serde::Deserializer;

use crate::Level;

/// The effective sink configuration of a logger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stdout: StdoutConfig,
    pub webhook: WebhookConfig,
    pub file: Vec<FileSink>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stdout: StdoutConfig::default(),
            webhook: WebhookConfig::default(),
            file: vec![FileSink::default()],
        }
    }
}

impl Config {
    /// Merge the overrides over this configuration.
    pub fn merge(self, overrides: ConfigOverrides) -> Config {
        merge_config(self, overrides)
    }
}

/// Console sink settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StdoutConfig {
    pub enable: bool,
    /// The least urgent level written to the console.
    pub level: Level,
    /// Write structured lines instead of human lines.
    pub json: bool,
    /// Emphasize human lines with per-level colors.
    pub color: bool,
}

impl Default for StdoutConfig {
    fn default() -> Self {
        Self {
            enable: true,
            level: Level::Info,
            json: false,
            color: true,
        }
    }
}

/// Webhook settings. No URL, no delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub url: Option<String>,
}

/// One file sink.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileSink {
    pub path: PathBuf,
    #[serde(default = "default_true")]
    pub enable: bool,
    /// Write structured lines instead of human lines. An entry that leaves it out writes human
    /// lines.
    #[serde(default)]
    pub json: bool,
    /// The least urgent level written to this file.
    #[serde(default = "default_file_level")]
    pub level: Level,
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new("./log.log")
    }
}

impl FileSink {
    /// A structured sink at `path` that accepts every level.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            enable: true,
            json: true,
            level: default_file_level(),
        }
    }

    /// Switch between structured and human lines.
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Set the least urgent level written to this file.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Keep the sink configured but stop writing to it.
    pub fn enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_file_level() -> Level {
    Level::Trace
}

/// Caller-supplied settings; absent fields inherit from the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub stdout: Option<StdoutOverrides>,
    pub webhook: Option<WebhookOverrides>,
    pub file: Option<Vec<FileSink>>,
}

/// Overrides for [`StdoutConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StdoutOverrides {
    pub enable: Option<bool>,
    pub level: Option<Level>,
    pub json: Option<bool>,
    pub color: Option<bool>,
}

/// Overrides for [`WebhookConfig`].
///
/// A missing URL keeps the default, while an explicit `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebhookOverrides {
    #[serde(deserialize_with = "present")]
    pub url: Option<Option<String>>,
}

impl ConfigOverrides {
    /// Override console settings.
    pub fn stdout(mut self, stdout: StdoutOverrides) -> Self {
        self.stdout = Some(stdout);
        self
    }

    /// Override the webhook URL.
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook = Some(WebhookOverrides {
            url: Some(Some(url.into())),
        });
        self
    }

    /// Drop any webhook URL from the defaults.
    pub fn no_webhook(mut self) -> Self {
        self.webhook = Some(WebhookOverrides { url: Some(None) });
        self
    }

    /// Replace the file sink list.
    pub fn files(mut self, files: impl IntoIterator<Item = FileSink>) -> Self {
        self.file = Some(files.into_iter().collect());
        self
    }
}

impl StdoutOverrides {
    pub fn enable(mut self, enable: bool) -> Self {
        self.enable = Some(enable);
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = Some(json);
        self
    }

    pub fn color(mut self, color: bool) -> Self {
        self.color = Some(color);
        self
    }
}

/// Merge `overrides` over `defaults`.
///
/// Object-valued settings merge field by field. The file list is replaced, never concatenated
/// or merged by index. Nothing is validated here; bad paths or URLs surface at write time.
pub fn merge_config(defaults: Config, overrides: ConfigOverrides) -> Config {
    let Config {
        stdout,
        webhook,
        file,
    } = defaults;

    let stdout = match overrides.stdout {
        None => stdout,
        Some(o) => StdoutConfig {
            enable: o.enable.unwrap_or(stdout.enable),
            level: o.level.unwrap_or(stdout.level),
            json: o.json.unwrap_or(stdout.json),
            color: o.color.unwrap_or(stdout.color),
        },
    };

    let webhook = match overrides.webhook {
        None => webhook,
        Some(o) => WebhookConfig {
            url: o.url.unwrap_or(webhook.url),
        },
    };

    Config {
        stdout,
        webhook,
        file: overrides.file.unwrap_or(file),
    }
}

/// Deserialize a field that is present, keeping an explicit `null` apart from a missing key.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.stdout.enable);
        assert_eq!(config.stdout.level, Level::Info);
        assert!(!config.stdout.json);
        assert_eq!(config.webhook.url, None);
        assert_eq!(config.file, vec![FileSink::new("./log.log")]);
        assert!(config.file[0].json);
        assert_eq!(config.file[0].level, Level::Trace);
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let config = merge_config(Config::default(), ConfigOverrides::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_object_settings_merge_by_field() {
        let overrides: ConfigOverrides = serde_json::from_str(
            r#"{"stdout": {"level": "debug"}, "webhook": {"url": "http://hook"}}"#,
        )
        .unwrap();
        let config = merge_config(Config::default(), overrides);

        assert!(config.stdout.enable);
        assert!(!config.stdout.json);
        assert_eq!(config.stdout.level, Level::Debug);
        assert_eq!(config.webhook.url.as_deref(), Some("http://hook"));
        assert_eq!(config.file, Config::default().file);
    }

    #[test]
    fn test_file_list_replaces_defaults() {
        let mut defaults = Config::default();
        defaults.file.push(FileSink::new("./second.log"));

        let overrides = ConfigOverrides::default().files([FileSink::new("./only.log").json(false)]);
        let config = merge_config(defaults, overrides);

        assert_eq!(config.file.len(), 1);
        assert_eq!(config.file[0].path, PathBuf::from("./only.log"));
        assert!(!config.file[0].json);
        assert_eq!(config.file[0].level, Level::Trace);
    }

    #[test]
    fn test_empty_file_list_disables_files() {
        let overrides: ConfigOverrides = serde_json::from_str(r#"{"file": []}"#).unwrap();
        let config = merge_config(Config::default(), overrides);
        assert!(config.file.is_empty());
    }

    #[test]
    fn test_file_entry_defaults() {
        let overrides: ConfigOverrides = serde_json::from_str(
            r#"{"file": [{"enable": true, "json": false, "path": "./human.log"}]}"#,
        )
        .unwrap();
        let sink = &overrides.file.unwrap()[0];
        assert!(sink.enable);
        assert!(!sink.json);
        assert_eq!(sink.level, Level::Trace);

        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{"file": [{"path": "./x.log"}]}"#).unwrap();
        let config = merge_config(Config::default(), overrides);
        assert_eq!(config.file.len(), 1);
        assert!(config.file[0].enable);
        assert!(!config.file[0].json);
        assert_eq!(config.file[0].level, Level::Trace);

        assert!(FileSink::new("./x.log").json);
        assert!(FileSink::default().json);
    }

    #[test]
    fn test_webhook_url_null_and_missing() {
        let mut defaults = Config::default();
        defaults.webhook.url = Some("http://default".to_string());

        let overrides: ConfigOverrides = serde_json::from_str(r#"{"webhook": {}}"#).unwrap();
        let config = merge_config(defaults.clone(), overrides);
        assert_eq!(config.webhook.url.as_deref(), Some("http://default"));

        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{"webhook": {"url": null}}"#).unwrap();
        let config = merge_config(defaults.clone(), overrides);
        assert_eq!(config.webhook.url, None);

        let config = merge_config(defaults, ConfigOverrides::default().no_webhook());
        assert_eq!(config.webhook.url, None);
    }

    #[test]
    fn test_bad_level_in_config() {
        let result = serde_json::from_str::<ConfigOverrides>(r#"{"stdout": {"level": 12}}"#);
        assert!(result.is_err());
    }
}
