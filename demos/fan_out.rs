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

use logfan::Level;
use logfan::Logger;
use logfan::config::ConfigOverrides;
use logfan::config::FileSink;
use logfan::config::StdoutOverrides;
use serde_json::json;

fn main() -> Result<(), logfan::Error> {
    let logger = Logger::new("foo", "bar", None)?;
    logger.info("Connected to the database!", None)?;
    logger.log(
        2,
        "Database table 'foo' missing",
        Some(&json!({"server": "server1.example.com", "database": "bar"})),
    )?;
    for level in Level::iter() {
        logger.log(level.code(), "Example", None)?;
    }

    let logger = Logger::new(
        "foo",
        "bar",
        Some(ConfigOverrides::default().stdout(StdoutOverrides::default().json(true))),
    )?;
    logger.warn("JSON", None)?;
    logger.success("JSON", Some(&json!({"rows": 3})))?;

    let logger = Logger::new(
        "foo",
        "bar",
        Some(
            ConfigOverrides::default()
                .stdout(StdoutOverrides::default().enable(false))
                .files([FileSink::new("./human.log").json(false)]),
        ),
    )?;
    for level in Level::iter() {
        logger.log(level, "LOG", None)?;
    }

    // log crate records go through the same sinks
    Logger::new("foo", "log-crate", None)?
        .apply()
        .map_err(|err| {
            logfan::Error::new(logfan::ErrorKind::InvalidArgument, "logger already set")
                .with_source(err)
        })?;
    log::warn!(table = "foo"; "Hello from the log crate!");
    log::logger().flush();

    Ok(())
}
