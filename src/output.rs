// ABOUTME: Output formatting for CLI results.
// ABOUTME: Prints plain text for people or JSON lines for scripts; warnings go to stderr.

use crate::diagnostics::Warning;
use serde::Serialize;

/// Output mode for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain text, one value per line
    Normal,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Print a command result. `key` names the value in JSON mode.
    pub fn value(&self, key: &str, value: impl Serialize + std::fmt::Display) {
        match self.mode {
            OutputMode::Normal => println!("{value}"),
            OutputMode::Json => emit(&JsonEvent {
                event: "result",
                key: Some(key),
                value: Some(&value),
                message: None,
            }),
        }
    }

    /// Print raw command output as-is (exec and hook results).
    pub fn text(&self, key: &str, text: &str) {
        match self.mode {
            OutputMode::Normal => print!("{text}"),
            OutputMode::Json => self.value(key, text),
        }
    }

    /// Print a progress or success message (dropped in JSON mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    pub fn warning(&self, warning: &Warning) {
        match self.mode {
            OutputMode::Normal => eprintln!("Warning: {}", warning.message),
            OutputMode::Json => emit_err(&JsonEvent::<()> {
                event: "warning",
                key: None,
                value: None,
                message: Some(&warning.message),
            }),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Error: {message}"),
            OutputMode::Json => emit_err(&JsonEvent::<()> {
                event: "error",
                key: None,
                value: None,
                message: Some(message),
            }),
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a, T: Serialize> {
    event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

fn emit<T: Serialize>(event: &JsonEvent<'_, T>) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    }
}

fn emit_err<T: Serialize>(event: &JsonEvent<'_, T>) {
    if let Ok(json) = serde_json::to_string(event) {
        eprintln!("{json}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_event_skips_empty_fields() {
        let event = JsonEvent {
            event: "result",
            key: Some("running"),
            value: Some(&true),
            message: None,
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"event":"result","key":"running","value":true}"#
        );
    }
}
