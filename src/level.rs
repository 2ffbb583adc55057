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

//! Severity levels and their normalization.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::Error;
use crate::ErrorKind;

/// A log severity.
///
/// Lower codes are more urgent; a sink with threshold `T` accepts every level whose code is
/// less than or equal to `T`.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Designates failures the process cannot recover from.
    Fatal = 0,
    /// Designates very serious errors.
    Error = 1,
    /// Designates hazardous situations.
    Warning = 2,
    /// Designates a completed operation worth pointing out.
    Success = 3,
    /// Designates useful information.
    Info = 4,
    /// Designates lower priority information.
    Debug = 5,
    /// Designates chatty diagnostics.
    Verbose = 6,
    /// Designates very low priority, often extremely verbose, information.
    Trace = 7,
}

const LEVELS: [Level; 8] = [
    Level::Fatal,
    Level::Error,
    Level::Warning,
    Level::Success,
    Level::Info,
    Level::Debug,
    Level::Verbose,
    Level::Trace,
];

impl Level {
    /// Resolve a code or a name into a level.
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::UnknownLevel`] error if the input is neither a code in `0..=7`
    /// nor one of the eight level names.
    ///
    /// # Examples
    ///
    /// ```
    /// use logfan::Level;
    ///
    /// assert_eq!(Level::normalize(2).unwrap(), Level::Warning);
    /// assert_eq!(Level::normalize("warning").unwrap(), Level::Warning);
    /// assert!(Level::normalize(8).is_err());
    /// ```
    pub fn normalize<'a>(input: impl Into<LevelInput<'a>>) -> Result<Level, Error> {
        match input.into() {
            LevelInput::Code(code) => u8::try_from(code)
                .ok()
                .and_then(Level::from_code)
                .ok_or_else(|| {
                    Error::new(ErrorKind::UnknownLevel, "unknown level").with_context("level", code)
                }),
            LevelInput::Name(name) => name.parse(),
        }
    }

    /// Return the level for a numeric code, if any.
    pub fn from_code(code: u8) -> Option<Level> {
        LEVELS.get(code as usize).copied()
    }

    /// Return the numeric code of the level.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Return the upper-case name of the level.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Success => "SUCCESS",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Verbose => "VERBOSE",
            Level::Trace => "TRACE",
        }
    }

    /// Whether a sink with the given threshold accepts this level.
    pub fn passes(self, threshold: Level) -> bool {
        self <= threshold
    }

    /// Iterate all levels from the most to the least urgent.
    pub fn iter() -> impl Iterator<Item = Level> {
        LEVELS.into_iter()
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Level, Self::Err> {
        for level in LEVELS {
            if s.eq_ignore_ascii_case(level.as_str()) {
                return Ok(level);
            }
        }

        Err(Error::new(ErrorKind::UnknownLevel, "unknown level")
            .with_context("level", format!("{s:?}")))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(i64),
            Name(String),
        }

        let input = match Raw::deserialize(deserializer)? {
            Raw::Code(code) => LevelInput::Code(code),
            Raw::Name(name) => LevelInput::Name(Cow::Owned(name)),
        };
        Level::normalize(input).map_err(serde::de::Error::custom)
    }
}

/// A level argument as callers pass it: either a numeric code or a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelInput<'a> {
    /// A numeric code; only `0..=7` are valid.
    Code(i64),
    /// A level name, matched case-insensitively.
    Name(Cow<'a, str>),
}

impl From<Level> for LevelInput<'_> {
    fn from(level: Level) -> Self {
        LevelInput::Code(i64::from(level.code()))
    }
}

impl<'a> From<&'a str> for LevelInput<'a> {
    fn from(name: &'a str) -> Self {
        LevelInput::Name(Cow::Borrowed(name))
    }
}

impl From<String> for LevelInput<'_> {
    fn from(name: String) -> Self {
        LevelInput::Name(Cow::Owned(name))
    }
}

macro_rules! impl_level_input_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LevelInput<'_> {
                fn from(code: $ty) -> Self {
                    LevelInput::Code(i64::from(code))
                }
            }
        )*
    };
}

impl_level_input_from_int!(u8, u16, u32, i8, i16, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_names_agree() {
        for code in 0u8..=7 {
            let by_code = Level::normalize(code).unwrap();
            let by_name = Level::normalize(by_code.as_str()).unwrap();
            let by_lower = Level::normalize(by_code.as_str().to_lowercase()).unwrap();
            assert_eq!(by_code, by_name);
            assert_eq!(by_code, by_lower);
            assert_eq!(by_code.code(), code);
        }
    }

    #[test]
    fn test_unknown_levels() {
        for input in [
            LevelInput::Code(8),
            LevelInput::Code(-1),
            LevelInput::Code(i64::MAX),
            LevelInput::from("warn"),
            LevelInput::from(""),
            LevelInput::from("critical"),
        ] {
            let err = Level::normalize(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownLevel);
        }
    }

    #[test]
    fn test_threshold() {
        let threshold = Level::Info;
        let passed: Vec<Level> = Level::iter().filter(|l| l.passes(threshold)).collect();
        assert_eq!(
            passed,
            vec![
                Level::Fatal,
                Level::Error,
                Level::Warning,
                Level::Success,
                Level::Info
            ]
        );
    }

    #[test]
    fn test_deserialize_code_or_name() {
        let levels: Vec<Level> = serde_json::from_str(r#"[0, "debug", "TRACE", 3]"#).unwrap();
        assert_eq!(
            levels,
            vec![Level::Fatal, Level::Debug, Level::Trace, Level::Success]
        );
        assert!(serde_json::from_str::<Level>("9").is_err());
        assert_eq!(serde_json::to_string(&Level::Warning).unwrap(), r#""WARNING""#);
    }

    #[test]
    fn test_from_log_level() {
        assert_eq!(Level::from(log::Level::Warn), Level::Warning);
        assert_eq!(Level::from(log::Level::Trace), Level::Trace);
    }
}
