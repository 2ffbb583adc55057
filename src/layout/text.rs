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

use jiff::Zoned;

use crate::LogRecord;

/// A layout that formats log records as human-readable text.
///
/// Output format:
///
/// ```text
/// [2024-08-11 22:44:57 GMT+08] [shop.database] [FATAL] Failed to connect to database
/// [2024-08-11 22:44:57 GMT+08] [shop.database] [WARNING] Database table 'foo' missing
/// [2024-08-11 22:44:57 GMT+08] [shop.database] [INFO] Connected to the database!
/// ```
///
/// The offset is the local offset from UTC in whole hours. Extra payloads are not part of the
/// text output; use [`JsonLayout`](super::JsonLayout) to keep them.
#[derive(Default, Debug, Clone, Copy)]
#[non_exhaustive]
pub struct TextLayout {}

impl TextLayout {
    /// Render the bracketed timestamp of a record.
    pub fn timestamp(now: &Zoned) -> String {
        let offset_hours = now.offset().seconds() / 3600;
        let sign = if offset_hours < 0 { '-' } else { '+' };

        format!(
            "[{}-{}-{} {}:{}:{} GMT{sign}{}]",
            zero_pad(i64::from(now.year()), 4),
            zero_pad(i64::from(now.month()), 2),
            zero_pad(i64::from(now.day()), 2),
            zero_pad(i64::from(now.hour()), 2),
            zero_pad(i64::from(now.minute()), 2),
            zero_pad(i64::from(now.second()), 2),
            zero_pad(i64::from(offset_hours.abs()), 2),
        )
    }

    /// Render the text after the timestamp.
    pub fn body(record: &LogRecord) -> String {
        format!(
            "[{}.{}] [{}] {}",
            record.application(),
            record.subprocess(),
            record.level(),
            record.message()
        )
    }

    /// Render the full line.
    pub fn format(record: &LogRecord) -> String {
        format!(
            "{} {}",
            TextLayout::timestamp(record.time()),
            TextLayout::body(record)
        )
    }
}

/// Left-pad `n` with zeros to at least `width` digits.
///
/// Wider numbers are returned in full; the sign of negative numbers goes first.
///
/// # Examples
///
/// ```
/// use logfan::layout::zero_pad;
///
/// assert_eq!(zero_pad(7, 2), "07");
/// assert_eq!(zero_pad(2024, 2), "2024");
/// assert_eq!(zero_pad(-5, 2), "-05");
/// ```
pub fn zero_pad(n: i64, width: usize) -> String {
    if n < 0 {
        format!("-{:0width$}", n.unsigned_abs())
    } else {
        format!("{n:0width$}")
    }
}
