//! Output helpers: every command speaks either tab-separated text rows or a
//! `{ok, data}` / `{ok: false, error}` JSON frame, chosen by `--json`.

use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use serde::Serialize;

pub fn emit_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}

/// A listing: one formatted row per item, or the whole slice as JSON.
pub fn emit_rows<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        return emit_json(data);
    }
    for d in data {
        println!("{}", row(d));
    }
    Ok(())
}

/// A single result: one summary line, or the value as JSON.
pub fn emit_value<T: Serialize>(
    json: bool,
    data: T,
    line: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        return emit_json(&data);
    }
    println!("{}", line(&data));
    Ok(())
}

/// Failure frame. JSON goes to stdout so scripted callers can parse one
/// stream; text goes to stderr.
pub fn emit_error(json: bool, code: &str, err: &anyhow::Error) {
    if json {
        let frame = JsonErr {
            ok: false,
            error: ErrorBody {
                code: code.to_string(),
                message: format!("{:#}", err),
            },
        };
        let out = serde_json::to_string_pretty(&frame)
            .unwrap_or_else(|_| r#"{"ok":false}"#.to_string());
        println!("{}", out);
    } else {
        eprintln!("error: {:#}", err);
    }
}
