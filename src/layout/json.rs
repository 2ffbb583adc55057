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

use std::str::FromStr;

use jiff::Timestamp;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use crate::Level;
use crate::LogRecord;
use crate::config::present;

/// A JSON layout for formatting log records.
///
/// Output format:
///
/// ```json
/// {"date":"2024-08-11T14:44:57.172Z","level":"ERROR","appName":"shop","subprocess":"database","message":"Hello error!"}
/// {"date":"2024-08-11T14:44:57.173Z","level":"WARNING","appName":"shop","subprocess":"database","message":"Table missing","extra":{"table":"foo"}}
/// ```
///
/// `date` is the instant in UTC with millisecond precision. `extra` is left out when the call
/// carried none, and written as `null` when the call carried a JSON `null`.
#[derive(Default, Debug, Clone, Copy)]
#[non_exhaustive]
pub struct JsonLayout {}

impl JsonLayout {
    /// Render a record as a single JSON line, without the trailing newline.
    pub fn format(record: &LogRecord) -> String {
        let mut line = Map::new();
        line.insert(
            "date".to_string(),
            format!("{:.3}", record.time().timestamp()).into(),
        );
        line.insert("level".to_string(), record.level().as_str().into());
        line.insert("appName".to_string(), record.application().into());
        line.insert("subprocess".to_string(), record.subprocess().into());
        line.insert("message".to_string(), record.message().into());
        if let Some(extra) = record.extra() {
            line.insert("extra".to_string(), extra.clone());
        }
        Value::Object(line).to_string()
    }
}

/// A record parsed back from the output of [`JsonLayout`].
///
/// # Examples
///
/// ```
/// use logfan::Level;
/// use logfan::layout::StructuredRecord;
///
/// let line = r#"{"date":"2024-08-11T14:44:57.172Z","level":"INFO","appName":"shop","subprocess":"db","message":"up"}"#;
/// let record: StructuredRecord = line.parse().unwrap();
/// assert_eq!(record.level, Level::Info);
/// assert_eq!(record.extra, None);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructuredRecord {
    pub date: Timestamp,
    pub level: Level,
    #[serde(rename = "appName")]
    pub app_name: String,
    pub subprocess: String,
    pub message: String,
    /// `None` when the key is missing, `Some(Value::Null)` when it is `null`.
    #[serde(default, deserialize_with = "present")]
    pub extra: Option<Value>,
}

impl FromStr for StructuredRecord {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Zoned;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_round_trip() {
        let extra = json!({"server": "server1.example.com", "database": "bar", "retries": 3});
        let now = Zoned::now();
        let record = LogRecord::at(
            now.clone(),
            Level::Warning,
            "foo",
            "bar",
            "Database table 'foo' missing",
            Some(&extra),
        );

        let line = JsonLayout::format(&record);
        let parsed: StructuredRecord = line.parse().unwrap();

        assert_eq!(parsed.level, Level::Warning);
        assert_eq!(parsed.app_name, "foo");
        assert_eq!(parsed.subprocess, "bar");
        assert_eq!(parsed.message, "Database table 'foo' missing");
        assert_eq!(parsed.extra, Some(extra));
        let drift = now.timestamp().as_millisecond() - parsed.date.as_millisecond();
        assert!(drift.abs() <= 1, "drift {drift}ms");
    }

    #[test]
    fn test_field_order_and_absent_extra() {
        let record = LogRecord::new(Level::Info, "a", "b", "line\n\"quoted\"", None);
        let line = JsonLayout::format(&record);

        assert!(line.starts_with(r#"{"date":""#), "{line}");
        assert!(line.contains(r#""level":"INFO","appName":"a","subprocess":"b""#));
        assert!(!line.contains("extra"));
        assert!(!line.contains('\n'));

        let parsed: StructuredRecord = line.parse().unwrap();
        assert_eq!(parsed.message, "line\n\"quoted\"");
        assert_eq!(parsed.extra, None);
    }

    #[test]
    fn test_null_extra_is_kept() {
        let record = LogRecord::new(Level::Info, "a", "b", "m", Some(&Value::Null));
        let line = JsonLayout::format(&record);
        assert!(line.ends_with(r#""message":"m","extra":null}"#), "{line}");

        let parsed: StructuredRecord = line.parse().unwrap();
        assert_eq!(parsed.extra, Some(Value::Null));
    }
}
