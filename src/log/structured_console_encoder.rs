//! A log4rs encoder that appends the record's key-values as `key=value`.
//!
//! The message part is formatted by a regular [`PatternEncoder`]; the
//! structured fields follow it on the same line. Values containing
//! whitespace are quoted so a line stays splittable on spaces.

use std::io;

use log::{
    Record,
    kv::{Error, Key, Value, VisitSource},
};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::{Color, Encode, Style, Write};
use serde::Deserialize;

const DEFAULT_PATTERN: &str = "{d} {l} {m}";

#[derive(Debug, Deserialize)]
pub struct StructuredConsoleEncoderConfig {
    pub pattern: Option<String>,
    /// Colors keys on terminals. Writers without style support ignore it.
    #[serde(default = "default_highlight")]
    pub highlight_keys: bool,
}

fn default_highlight() -> bool {
    true
}

#[derive(Debug)]
pub struct StructuredConsoleEncoder {
    delegate: PatternEncoder,
    highlight_keys: bool,
}

impl StructuredConsoleEncoder {
    pub fn new(pattern: &str, highlight_keys: bool) -> Self {
        Self {
            delegate: PatternEncoder::new(pattern),
            highlight_keys,
        }
    }
}

impl Encode for StructuredConsoleEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.delegate.encode(w, record)?;

        let mut visitor = PairWriter {
            writer: w,
            highlight_keys: self.highlight_keys,
            io_err: None,
        };

        if let Err(kv_err) = record.key_values().visit(&mut visitor) {
            if let Some(io_err) = visitor.io_err {
                return Err(io_err.into());
            }
            write!(w, " kv_error={:?}", kv_err.to_string())?;
        }

        w.write_all(b"\n")?;
        Ok(())
    }
}

struct PairWriter<'a> {
    writer: &'a mut dyn Write,
    highlight_keys: bool,
    io_err: Option<io::Error>,
}

impl PairWriter<'_> {
    fn write_pair(&mut self, key: &Key<'_>, value: &Value<'_>) -> io::Result<()> {
        if self.highlight_keys {
            self.writer.set_style(Style::new().text(Color::Cyan))?;
        }
        write!(self.writer, " {}=", key)?;
        if self.highlight_keys {
            self.writer.set_style(&Style::default())?;
        }

        let text = value.to_string();
        if text.is_empty() || text.contains(char::is_whitespace) {
            write!(self.writer, "{:?}", text)
        } else {
            self.writer.write_all(text.as_bytes())
        }
    }
}

impl<'kvs> VisitSource<'kvs> for PairWriter<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), Error> {
        if let Err(e) = self.write_pair(&key, &value) {
            self.io_err = Some(e);
            return Err(Error::msg("io error while writing key-values"));
        }
        Ok(())
    }
}

/// Registers the encoder under `kind: structured_console`.
pub struct StructuredConsoleEncoderDeserializer;

impl log4rs::config::Deserialize for StructuredConsoleEncoderDeserializer {
    type Trait = dyn Encode;
    type Config = StructuredConsoleEncoderConfig;

    fn deserialize(
        &self,
        config: StructuredConsoleEncoderConfig,
        _: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<dyn Encode>> {
        let pattern = config.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
        Ok(Box::new(StructuredConsoleEncoder::new(pattern, config.highlight_keys)))
    }
}
