//! Terminal output: styled text for humans, one JSON object per line for machines.
//!
//! `console` for colors (respects NO_COLOR, auto-disables when piped),
//! `comfy-table` for tables, `indicatif` for the loading spinner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::cli::OutputFormat;

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    let msg = Msg {
        level,
        message,
        data,
    };
    match serde_json::to_string(&msg) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{}", serde_json::json!({ "level": level, "message": message })),
    }
}

pub fn success(text: &str) {
    if is_json() {
        emit_json("success", text, None);
    } else {
        println!("{} {}", style("✓").green(), style(text).bright());
    }
}

pub fn error(text: &str) {
    if is_json() {
        let data = serde_json::json!({ "level": "error", "message": text });
        eprintln!("{data}");
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        println!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).dim());
    }
}

/// One chat transcript entry.
pub fn chat_entry(speaker: &str, assistant: bool, content: &str) {
    if is_json() {
        let data = serde_json::json!({ "speaker": speaker, "content": content });
        emit_json("message", speaker, Some(&data));
    } else if assistant {
        println!("{} {}", style(format!("{speaker}:")).magenta().bold(), content);
    } else {
        println!("{} {}", style(format!("{speaker}:")).green().bold(), content);
    }
}

/// Emit a serializable value: pretty JSON in text mode, an envelope in JSON mode.
/// Table with a bold cyan header row.
pub fn table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            columns
                .iter()
                .map(|c| Cell::new(c).fg(Color::Cyan).add_attribute(Attribute::Bold)),
        );
    table
}

/// Print a table, or its rows as a JSON list.
pub fn table_print<T: Serialize>(table: &Table, rows: &[T]) {
    if is_json() {
        let data = serde_json::json!({ "items": rows });
        emit_json("list", "", Some(&data));
    } else {
        println!("{table}");
    }
}

/// Spinner shown while a request is pending. Hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
