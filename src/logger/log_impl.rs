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

use serde_json::Map;
use serde_json::Value;

use crate::Level;
use crate::Logger;

impl Logger {
    /// Set up this logger as the `log` crate global logger.
    ///
    /// Records from the `log` crate go through plain dispatch: `log::error!` writes an ERROR
    /// record but never notifies the webhook. Key-values become the extra payload.
    ///
    /// This function will set the global maximum log level to `Trace`. To override this, call
    /// [`log::set_max_level`] after this function.
    ///
    /// # Errors
    ///
    /// Return an error if the log crate global logger has already been set.
    pub fn apply(&self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        if !Logger::enabled(self, level) {
            return;
        }

        let mut kvs = Map::new();
        let mut visitor = KvCollector { kvs: &mut kvs };
        if let Err(err) = record.key_values().visit(&mut visitor) {
            kvs.insert("kv_error".to_string(), err.to_string().into());
        }
        let extra = if kvs.is_empty() {
            None
        } else {
            Some(Value::Object(kvs))
        };

        let message = record.args().to_string();
        if let Err(err) = self.dispatcher.dispatch(level, &message, extra.as_ref()) {
            self.dispatcher.trap(&err);
        }
    }

    fn flush(&self) {
        if let Err(err) = Logger::flush(self) {
            self.dispatcher.trap(&err);
        }
    }
}

struct KvCollector<'a> {
    kvs: &'a mut Map<String, Value>,
}

impl<'kvs> log::kv::VisitSource<'kvs> for KvCollector<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        let k = key.to_string();
        let v = value.to_string();
        self.kvs.insert(k, v.into());
        Ok(())
    }
}
