//! Canned responses and on-disk data used across harnesses.

use serde_json::{json, Value};
use std::path::Path;

/// The three accounts of the default configuration.
pub const DEFAULT_SOURCES: &[&str] = &["Bogota.Atl", "Los_delaU", "Grupo_Niche_Poli"];

/// One viral post among two ordinary ones: mean 40, σ ≈ 35.59, cap ≈ 75.59.
pub const VIRAL_LIKES: &[u64] = &[10, 20, 90];

/// A gviz row: formatted date, raw likes, optional url.
pub type SheetRow<'a> = (&'a str, Value, Option<&'a str>);

/// Wrap a JSON value the way the gviz endpoint does.
pub fn gviz_wrap(response: &Value) -> String {
    format!("/*O_o*/\ngoogle.visualization.Query.setResponse({response});")
}

/// A successful gviz response body holding `rows`.
pub fn gviz_ok(rows: &[SheetRow<'_>]) -> String {
    let rows: Vec<Value> = rows
        .iter()
        .map(|(date, likes, url)| {
            let url = url.map_or(Value::Null, |u| json!({ "v": u }));
            json!({ "c": [{ "v": "Date(2024,0,1)", "f": date }, { "v": likes }, url] })
        })
        .collect();
    gviz_wrap(&json!({
        "version": "0.6",
        "reqId": "0",
        "status": "ok",
        "sig": "1",
        "table": {
            "cols": [
                { "id": "A", "label": "Fecha", "type": "date" },
                { "id": "B", "label": "Likes", "type": "number" },
                { "id": "C", "label": "Url", "type": "string" }
            ],
            "rows": rows,
            "parsedNumHeaders": 1
        }
    }))
}

/// A gviz error response body.
pub fn gviz_error(detailed_message: &str) -> String {
    gviz_wrap(&json!({
        "version": "0.6",
        "status": "error",
        "errors": [{
            "reason": "invalid_query",
            "message": "INVALID_QUERY",
            "detailed_message": detailed_message
        }]
    }))
}

/// Write `{dir}/{name}.json` holding rows with the given like counts.
pub fn write_source(dir: &Path, name: &str, likes: &[u64]) {
    let rows: Vec<Value> = likes
        .iter()
        .enumerate()
        .map(|(i, l)| json!({ "date": format!("{}/1/2024", i + 1), "likes": l, "url": format!("https://x.test/{name}/{i}") }))
        .collect();
    write_raw_source(dir, name, &Value::Array(rows).to_string());
}

/// Write `{dir}/{name}.json` with arbitrary contents.
pub fn write_raw_source(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(format!("{name}.json")), contents).expect("write source fixture");
}
