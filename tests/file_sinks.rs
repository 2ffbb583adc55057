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

use std::path::Path;

use logfan::ErrorKind;
use logfan::Level;
use logfan::Logger;
use logfan::append::Testing;
use logfan::config::ConfigOverrides;
use logfan::config::FileSink;
use logfan::config::StdoutOverrides;
use logfan::layout::StructuredRecord;
use serde_json::json;
use tempfile::TempDir;

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn plain_stdout() -> StdoutOverrides {
    StdoutOverrides::default().color(false)
}

#[test]
fn test_warning_reaches_console_and_json_file() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("log.log");
    let console = Testing::default();
    let logger = Logger::builder("app", "sub")
        .config(
            ConfigOverrides::default()
                .stdout(plain_stdout())
                .files([FileSink::new(&path)]),
        )
        .console(console.clone())
        .build()
        .unwrap();

    logger.log(2, "missing table", None).unwrap();

    let lines = console.lines();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert!(line.starts_with('['), "{line}");
    assert!(line.ends_with("] [app.sub] [WARNING] missing table"), "{line}");
    assert!(line.contains(" GMT"), "{line}");

    let file_lines = read_lines(&path);
    assert_eq!(file_lines.len(), 1);
    assert!(file_lines[0].contains(r#""level":"WARNING""#));
    let record: StructuredRecord = file_lines[0].parse().unwrap();
    assert_eq!(record.app_name, "app");
    assert_eq!(record.subprocess, "sub");
    assert_eq!(record.message, "missing table");
}

#[test]
fn test_file_thresholds_and_formats() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let json_path = temp_dir.path().join("all.jsonl");
    let human_path = temp_dir.path().join("human.log");
    let logger = Logger::builder("foo", "bar")
        .config(
            ConfigOverrides::default()
                .stdout(plain_stdout().enable(false))
                .files([
                    FileSink::new(&json_path),
                    FileSink::new(&human_path).json(false).level(Level::Warning),
                ]),
        )
        .console(Testing::default())
        .build()
        .unwrap();

    let extra = json!({"server": "server1.example.com", "database": "bar"});
    for level in Level::iter() {
        logger.log(level.as_str(), "LOG", Some(&extra)).unwrap();
    }

    let json_lines = read_lines(&json_path);
    assert_eq!(json_lines.len(), 8);
    for (line, level) in json_lines.iter().zip(Level::iter()) {
        let record: StructuredRecord = line.parse().unwrap();
        assert_eq!(record.level, level);
        assert_eq!(record.extra.as_ref(), Some(&extra));
    }

    let human_lines = read_lines(&human_path);
    assert_eq!(human_lines.len(), 3);
    for (line, level) in human_lines.iter().zip(["FATAL", "ERROR", "WARNING"]) {
        assert!(line.ends_with(&format!("[foo.bar] [{level}] LOG")), "{line}");
        assert!(!line.contains("server1"), "{line}");
    }
}

#[test]
fn test_disabled_console_never_writes() {
    let console = Testing::default();
    let logger = Logger::builder("app", "sub")
        .config(
            ConfigOverrides::default()
                .stdout(StdoutOverrides::default().enable(false).level(Level::Trace))
                .files([]),
        )
        .console(console.clone())
        .build()
        .unwrap();

    for level in Level::iter() {
        logger.log(level, "quiet", None).unwrap();
    }
    assert!(console.lines().is_empty());
}

#[test]
fn test_file_override_replaces_default_sink() {
    let logger = Logger::new(
        "app",
        "sub",
        Some(ConfigOverrides::default().files([FileSink::new("./elsewhere.log")])),
    )
    .unwrap();

    let paths: Vec<&Path> = logger.config().file.iter().map(|f| f.path.as_path()).collect();
    assert_eq!(paths, vec![Path::new("./elsewhere.log")]);

    let defaults = Logger::new("app", "sub", None).unwrap();
    assert_eq!(defaults.config().file, vec![FileSink::new("./log.log")]);
}

#[test]
fn test_failing_sink_does_not_stop_others() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let broken = temp_dir.path().join("no-such-dir").join("broken.log");
    let first = temp_dir.path().join("first.log");
    let last = temp_dir.path().join("last.log");
    let console = Testing::default();
    let logger = Logger::builder("app", "sub")
        .config(
            ConfigOverrides::default()
                .stdout(plain_stdout())
                .files([
                    FileSink::new(&first),
                    FileSink::new(&broken),
                    FileSink::new(&last).json(false),
                ]),
        )
        .console(console.clone())
        .build()
        .unwrap();

    let err = logger.info("still delivered", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert_eq!(err.sources().len(), 1);
    assert!(err.to_string().contains("broken.log"), "{err}");

    assert_eq!(console.lines().len(), 1);
    assert_eq!(read_lines(&first).len(), 1);
    assert_eq!(read_lines(&last).len(), 1);
}

#[test]
fn test_concurrent_writers_do_not_tear_lines() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("shared.log");
    let logger = Logger::builder("app", "sub")
        .config(
            ConfigOverrides::default()
                .stdout(plain_stdout().enable(false))
                .files([FileSink::new(&path)]),
        )
        .console(Testing::default())
        .build()
        .unwrap();

    let threads: Vec<_> = (0..4)
        .map(|t| {
            let logger = logger.clone();
            std::thread::spawn(move || {
                for i in 0..50 {
                    let extra = json!({"thread": t, "i": i, "pad": "x".repeat(200)});
                    logger.trace("concurrent", Some(&extra)).unwrap();
                }
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 200);
    for line in lines {
        let record: StructuredRecord = line.parse().unwrap();
        assert_eq!(record.message, "concurrent");
    }
}
