//! Record formatting and the `log` crate bridge.

use crate::{Format, Level, LogConfig, config, enabled};
use std::fmt::Display;
use std::io::Write;

/// A structured key/value pair attached to a record.
pub type Field<'a> = (&'a str, &'a dyn Display);

/// Emit a record without structured fields.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    log_fields(level, target, message, &[]);
}

/// Emit a record with structured fields.
#[doc(hidden)]
pub fn log_fields(level: Level, target: &str, message: &str, fields: &[Field<'_>]) {
    if !enabled(level) {
        return;
    }

    let config = config();

    match config.format {
        Format::Pretty => log_pretty(level, target, message, fields, config),
        Format::Compact => log_compact(level, target, message, fields, config),
        Format::Json => log_json(level, target, message, fields),
    }
}

fn write_fields(out: &mut impl Write, fields: &[Field<'_>]) {
    for (key, value) in fields {
        let _ = write!(out, " {}={}", key, value);
    }
}

fn log_pretty(level: Level, target: &str, message: &str, fields: &[Field<'_>], config: &LogConfig) {
    let mut stderr = std::io::stderr().lock();

    if config.timestamps {
        let now = chrono::Local::now();
        let _ = write!(stderr, "{} ", now.format("%Y-%m-%d %H:%M:%S%.3f"));
    }

    #[cfg(feature = "color")]
    if config.color {
        let _ = write!(stderr, "{:5} ", level.colored());
    } else {
        let _ = write!(stderr, "{:5} ", level.as_str());
    }

    #[cfg(not(feature = "color"))]
    let _ = write!(stderr, "{:5} ", level.as_str());

    if config.module_path && !target.is_empty() {
        let _ = write!(stderr, "[{}] ", target);
    }

    let _ = write!(stderr, "{}", message);
    write_fields(&mut stderr, fields);
    let _ = writeln!(stderr);
}

fn log_compact(level: Level, target: &str, message: &str, fields: &[Field<'_>], config: &LogConfig) {
    let mut stderr = std::io::stderr().lock();

    if config.timestamps {
        let now = chrono::Local::now();
        let _ = write!(stderr, "{} ", now.format("%H:%M:%S"));
    }

    let _ = write!(stderr, "{} ", level.as_str().chars().next().unwrap_or('?'));

    if config.module_path && !target.is_empty() {
        let _ = write!(stderr, "{}: ", target);
    }

    let _ = write!(stderr, "{}", message);
    write_fields(&mut stderr, fields);
    let _ = writeln!(stderr);
}

#[cfg(feature = "json")]
fn log_json(level: Level, target: &str, message: &str, fields: &[Field<'_>]) {
    if let Some(line) = json_line(level, target, message, fields) {
        eprintln!("{}", line);
    }
}

/// Render one JSON record.
#[cfg(feature = "json")]
pub(crate) fn json_line(
    level: Level,
    target: &str,
    message: &str,
    fields: &[Field<'_>],
) -> Option<String> {
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct LogEntry<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        fields: BTreeMap<&'a str, String>,
    }

    let entry = LogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
        fields: fields
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect(),
    };

    serde_json::to_string(&entry).ok()
}

#[cfg(not(feature = "json"))]
fn log_json(level: Level, target: &str, message: &str, fields: &[Field<'_>]) {
    let mut line = format!(
        r#"{{"timestamp":"{}","level":"{}","target":"{}","message":"{}""#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        escape_json(target),
        escape_json(message)
    );
    if !fields.is_empty() {
        let rendered: Vec<String> = fields
            .iter()
            .map(|(key, value)| {
                format!(r#""{}":"{}""#, escape_json(key), escape_json(&value.to_string()))
            })
            .collect();
        line.push_str(&format!(r#","fields":{{{}}}"#, rendered.join(",")));
    }
    line.push('}');
    eprintln!("{}", line);
}

#[cfg(not(feature = "json"))]
fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }
    result
}

/// Routes records emitted through the `log` facade into this crate's output.
pub struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        crate::enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            log_fields(
                record.level().into(),
                record.target(),
                &record.args().to_string(),
                &[],
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static BRIDGE: LogBridge = LogBridge;

/// Install [`LogBridge`] as the global `log` logger.
///
/// Returns an error when another logger is already installed.
pub fn install_log_bridge() -> Result<(), log::SetLoggerError> {
    log::set_logger(&BRIDGE)?;
    log::set_max_level(crate::current_level().into());
    Ok(())
}
