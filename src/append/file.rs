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

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::ErrorKind;
use crate::append::Append;

/// An appender that appends log lines to a file.
///
/// The file is opened, appended to and closed on every line, and created if it does not exist.
/// It is never truncated. Each line goes out in a single append-mode write, so concurrent
/// writers to the same path interleave whole lines.
///
/// # Examples
///
/// ```
/// use logfan::append::Append;
/// use logfan::append::File;
///
/// let dir = tempfile::tempdir().unwrap();
/// let file = File::new(dir.path().join("app.log"));
/// file.append("hello").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
}

impl File {
    /// Create a new `File` appender writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this appender writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Append for File {
    fn append(&self, line: &str) -> Result<(), Error> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');

        let failed = |message: &'static str| {
            let path = self.path.display().to_string();
            move |err: std::io::Error| {
                Error::new(ErrorKind::IoFailure, message)
                    .with_context("path", path)
                    .with_source(err)
            }
        };

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(failed("failed to open log file"))?;
        file.write_all(&bytes)
            .map_err(failed("failed to write log file"))?;
        Ok(())
    }
}
