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
use std::sync::Mutex;

use crate::Error;
use crate::append::Append;

/// An appender that writes log lines that can be captured by a test harness (like `cargo test`),
/// and thus the outputs are suppressed unless `--nocapture` or `--show-output` is specified.
///
/// Every line is also kept in memory and can be read back with [`Testing::lines`]. Clones share
/// the same buffer.
///
/// # Examples
///
/// ```
/// use logfan::Logger;
/// use logfan::append::Testing;
/// use logfan::config::ConfigOverrides;
///
/// let console = Testing::default();
/// let logger = Logger::builder("app", "sub")
///     .config(ConfigOverrides::default().files([]))
///     .console(console.clone())
///     .build()
///     .unwrap();
///
/// logger.info("hello", None).unwrap();
/// assert_eq!(console.lines().len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Testing {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Testing {
    /// Return the lines written so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Append for Testing {
    fn append(&self, line: &str) -> Result<(), Error> {
        eprintln!("{line}");
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line.to_string()),
            Err(poisoned) => poisoned.into_inner().push(line.to_string()),
        }
        Ok(())
    }
}
