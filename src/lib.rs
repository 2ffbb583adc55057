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

//! Logfan is a leveled logger where a single call fans out to the console, any number of files
//! and an error webhook, each sink with its own threshold and format.
//!
//! # Overview
//!
//! A [`Logger`] is created once per component with an application and a subprocess name. Every
//! call is written synchronously to the console and file sinks whose threshold admits its
//! level, either as a human line or as a JSON line. Calls to [`Logger::error`] additionally post
//! a notification to the configured webhook in the background; delivery failures are logged
//! back at FATAL.
//!
//! Levels, from the most to the least urgent: FATAL (0), ERROR (1), WARNING (2), SUCCESS (3),
//! INFO (4), DEBUG (5), VERBOSE (6) and TRACE (7).
//!
//! # Examples
//!
//! Log to stdout and to the default `./log.log` JSON file:
//!
//! ```no_run
//! use logfan::Logger;
//!
//! let logger = Logger::new("shop", "database", None).unwrap();
//! logger.info("Connected to the database!", None).unwrap();
//! logger.log("WARNING", "Database table 'foo' missing", None).unwrap();
//! ```
//!
//! Human-readable file output, quiet console and an error webhook:
//!
//! ```no_run
//! use logfan::Logger;
//! use logfan::config::ConfigOverrides;
//! use logfan::config::FileSink;
//! use logfan::config::StdoutOverrides;
//!
//! let overrides = ConfigOverrides::default()
//!     .stdout(StdoutOverrides::default().enable(false))
//!     .files([FileSink::new("./human.log").json(false)])
//!     .webhook_url("https://discord.com/api/webhooks/1234/abcd");
//!
//! let logger = Logger::new("shop", "payments", Some(overrides)).unwrap();
//! logger.error("Payment provider unreachable", None).unwrap();
//! logger.flush().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod color;
pub mod config;
pub mod layout;
pub mod trap;
pub mod webhook;

mod error;
pub use self::error::Error;
pub use self::error::ErrorKind;

mod level;
pub use self::level::Level;
pub use self::level::LevelInput;

mod logger;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;

mod record;
pub use self::record::LogRecord;
