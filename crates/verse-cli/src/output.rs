use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(render_text(&serde_json::to_value(value)?)),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_text(value: &Value) -> String {
    match value {
        Value::Array(items) if items.is_empty() => String::from("(none)"),
        Value::Array(items) => items
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n\n"),
        Value::Object(map) => {
            let mut out = String::new();
            for (key, value) in map {
                if value.is_null() {
                    continue;
                }
                let cell = value_to_cell(value);
                if cell.contains('\n') {
                    let _ = writeln!(out, "{key}:");
                    for line in cell.lines() {
                        let _ = writeln!(out, "  {line}");
                    }
                } else {
                    let _ = writeln!(out, "{key}: {cell}");
                }
            }
            out.trim_end().to_string()
        }
        scalar => value_to_cell(scalar),
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn json_is_pretty_printed() {
        let rendered = render(&json!({"project_id": "p1"}), OutputFormat::Json).unwrap();
        assert_eq!(rendered, "{\n  \"project_id\": \"p1\"\n}");
    }

    #[test]
    fn text_renders_one_field_per_line_and_skips_nulls() {
        let rendered = render(
            &json!({"id": "p1", "saved": true, "save_error": null}),
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(rendered, "id: p1\nsaved: true");
    }

    #[test]
    fn text_indents_multiline_values() {
        let rendered = render(&json!({"code": "x = 1\nprint(x)"}), OutputFormat::Text).unwrap();
        assert_eq!(rendered, "code:\n  x = 1\n  print(x)");
    }

    #[test]
    fn text_separates_list_items() {
        let rendered = render(&json!([{"id": "a"}, {"id": "b"}]), OutputFormat::Text).unwrap();
        assert_eq!(rendered, "id: a\n\nid: b");
        assert_eq!(render(&json!([]), OutputFormat::Text).unwrap(), "(none)");
    }
}
