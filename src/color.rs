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

//! Color utilities.

use colored::Color;
use colored::ColoredString;
use colored::Colorize;

use crate::Level;

/// Console emphasis for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Leave the text as is.
    Plain,
    /// Color the text.
    Foreground(Color),
    /// Color the background behind the text.
    Background(Color),
}

/// Emphasis for the console rendering of each level.
///
/// Emphasis only applies to the console; file and structured output never carry it.
#[derive(Debug, Clone)]
pub struct LevelColor {
    pub fatal: Emphasis,
    pub error: Emphasis,
    pub warning: Emphasis,
    pub success: Emphasis,
    pub info: Emphasis,
    pub debug: Emphasis,
    pub verbose: Emphasis,
    pub trace: Emphasis,
    /// Emphasis of the timestamp prefix.
    pub timestamp: Emphasis,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            fatal: Emphasis::Background(Color::Red),
            error: Emphasis::Foreground(Color::Red),
            warning: Emphasis::Foreground(Color::Yellow),
            success: Emphasis::Foreground(Color::Green),
            info: Emphasis::Plain,
            debug: Emphasis::Foreground(Color::Magenta),
            verbose: Emphasis::Foreground(Color::Blue),
            trace: Emphasis::Foreground(Color::BrightBlack),
            timestamp: Emphasis::Foreground(Color::BrightBlack),
        }
    }
}

impl LevelColor {
    /// Wrap the text in the emphasis of the given level.
    pub fn paint(&self, level: Level, text: &str) -> ColoredString {
        let emphasis = match level {
            Level::Fatal => self.fatal,
            Level::Error => self.error,
            Level::Warning => self.warning,
            Level::Success => self.success,
            Level::Info => self.info,
            Level::Debug => self.debug,
            Level::Verbose => self.verbose,
            Level::Trace => self.trace,
        };
        emphasize(emphasis, text)
    }

    /// Wrap the timestamp prefix in its neutral emphasis.
    pub fn paint_timestamp(&self, text: &str) -> ColoredString {
        emphasize(self.timestamp, text)
    }
}

fn emphasize(emphasis: Emphasis, text: &str) -> ColoredString {
    match emphasis {
        Emphasis::Plain => ColoredString::from(text),
        Emphasis::Foreground(color) => text.color(color),
        Emphasis::Background(color) => text.on_color(color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_keeps_text() {
        let colors = LevelColor::default();
        for level in Level::iter() {
            let painted = colors.paint(level, "hello");
            assert_eq!(&*painted, "hello");
        }
    }

    #[test]
    fn test_default_emphasis() {
        let colors = LevelColor::default();
        assert_eq!(colors.info, Emphasis::Plain);
        assert_eq!(colors.fatal, Emphasis::Background(Color::Red));
        assert_eq!(colors.paint(Level::Info, "x").fgcolor, None);
        assert_eq!(colors.paint(Level::Error, "x").fgcolor, Some(Color::Red));
        assert_eq!(colors.paint(Level::Fatal, "x").bgcolor, Some(Color::Red));
    }
}
