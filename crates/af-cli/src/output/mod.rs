use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod grid;
pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table_options();
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let rows = flatten(&map)
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&["field", "value"], &rows, options))
        }
        scalar => Ok(value_to_cell(&scalar)),
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let flattened = items
        .iter()
        .map(|item| match item {
            Value::Object(map) => flatten(map),
            other => vec![(String::from("value"), other.clone())],
        })
        .collect::<Vec<_>>();

    let mut headers = Vec::<String>::new();
    for entries in &flattened {
        for (key, _) in entries {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    // `id` leftmost, the rest alphabetical.
    headers.sort_by(|a, b| (a != "id", a).cmp(&(b != "id", b)));

    let rows = flattened
        .iter()
        .map(|entries| {
            headers
                .iter()
                .map(|header| {
                    entries
                        .iter()
                        .find(|(key, _)| key == header)
                        .map_or_else(|| String::from("-"), |(_, value)| value_to_cell(value))
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&headers, &rows, options)
}

/// Flatten one level of nested objects into dotted keys, e.g. a
/// `{ "routine": { "name": .. } }` row becomes a `routine.name` column.
fn flatten(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Object(inner) => {
                for (inner_key, inner_value) in inner {
                    out.push((format!("{key}.{inner_key}"), inner_value.clone()));
                }
            }
            other => out.push((key.clone(), other.clone())),
        }
    }
    out
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
