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

//! Layouts for formatting log records.

pub use self::json::JsonLayout;
pub use self::json::StructuredRecord;
pub use self::text::TextLayout;
pub use self::text::zero_pad;

use crate::LogRecord;

mod json;
mod text;

/// Both representations of one record, rendered once and shared by every sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The bracketed display timestamp, e.g. `[2024-08-11 22:44:57 GMT+08]`.
    pub timestamp: String,
    /// The human line without the timestamp, e.g. `[app.sub] [INFO] hello`.
    pub body: String,
    /// The structured line.
    pub json: String,
}

impl Rendered {
    /// Render a record in both layouts.
    pub fn new(record: &LogRecord) -> Self {
        Self {
            timestamp: TextLayout::timestamp(record.time()),
            body: TextLayout::body(record),
            json: JsonLayout::format(record),
        }
    }

    /// The full human line.
    pub fn human(&self) -> String {
        format!("{} {}", self.timestamp, self.body)
    }
}
