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

//! Log records.

use jiff::Zoned;
use serde_json::Value;

use crate::Level;

/// An immutable snapshot of one log event.
///
/// A record is built once per log call and borrowed by every sink while it renders its own
/// view.
#[derive(Clone, Debug)]
pub struct LogRecord<'a> {
    now: Zoned,
    level: Level,
    application: &'a str,
    subprocess: &'a str,
    message: &'a str,
    extra: Option<&'a Value>,
}

impl<'a> LogRecord<'a> {
    /// Create a record stamped with the current local time.
    pub fn new(
        level: Level,
        application: &'a str,
        subprocess: &'a str,
        message: &'a str,
        extra: Option<&'a Value>,
    ) -> Self {
        Self::at(Zoned::now(), level, application, subprocess, message, extra)
    }

    /// Create a record stamped with the given time.
    pub fn at(
        now: Zoned,
        level: Level,
        application: &'a str,
        subprocess: &'a str,
        message: &'a str,
        extra: Option<&'a Value>,
    ) -> Self {
        Self {
            now,
            level,
            application,
            subprocess,
            message,
            extra,
        }
    }

    /// The time of the event, in the zone it was captured in.
    pub fn time(&self) -> &Zoned {
        &self.now
    }

    /// The severity.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The application name.
    pub fn application(&self) -> &'a str {
        self.application
    }

    /// The subprocess name.
    pub fn subprocess(&self) -> &'a str {
        self.subprocess
    }

    /// The message text.
    pub fn message(&self) -> &'a str {
        self.message
    }

    /// The optional structured payload.
    pub fn extra(&self) -> Option<&'a Value> {
        self.extra
    }
}
