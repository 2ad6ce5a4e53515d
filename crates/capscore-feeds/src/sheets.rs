//! Google Sheets fetcher: reads one spreadsheet tab per source through the
//! gviz query endpoint.
//!
//! ## Endpoint
//!
//! `GET {base_url}/{spreadsheet_id}/gviz/tq?sheet={name}&headers=1&tq={query}`
//!
//! The body is JavaScript, not JSON:
//!
//! ```text
//! /*O_o*/
//! google.visualization.Query.setResponse({"status":"ok","table":{...}});
//! ```
//!
//! [`parse_response`] strips the wrapper (a bare JSON body is accepted too)
//! and maps the first three columns to [`RawRow`] fields.
//!
//! No timeout or retry is applied: a request that never completes keeps its
//! run waiting.

use crate::error::FetchError;
use crate::raw::{RawLikes, RawRow};
use crate::SourceFetcher;
use capscore_core::config::SheetConfig;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

static RESPONSE_WRAPPER: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?s)setResponse\(\s*(?P<json>\{.*\})\s*\)\s*;?\s*$")
        .expect("wrapper regex must compile")
});

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GvizResponse {
    status: String,
    #[serde(default)]
    errors: Vec<GvizError>,
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizError {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detailed_message: Option<String>,
}

impl GvizError {
    fn describe(&self) -> String {
        self.detailed_message
            .clone()
            .or_else(|| self.message.clone())
            .or_else(|| self.reason.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

/// `v` is the raw value, `f` the value as formatted in the sheet.
#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Value,
    #[serde(default)]
    f: Option<String>,
}

impl GvizRow {
    fn cell(&self, idx: usize) -> Option<&GvizCell> {
        self.c.get(idx).and_then(Option::as_ref)
    }

    fn into_raw(self) -> RawRow {
        // Date uses the formatted value so it reads the way it does in the sheet.
        let date = self.cell(0).and_then(|c| c.f.clone().or_else(|| value_text(&c.v)));
        let likes = self.cell(1).and_then(|c| match &c.v {
            Value::Number(n) => n.as_f64().map(RawLikes::Number),
            Value::String(s) => Some(RawLikes::Text(s.clone())),
            _ => None,
        });
        let url = self.cell(2).and_then(|c| match &c.v {
            Value::String(s) => Some(s.clone()),
            _ => None,
        });
        RawRow { date, likes, url }
    }
}

fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a gviz response body into raw rows.
pub fn parse_response(body: &str) -> Result<Vec<RawRow>, FetchError> {
    let json = match RESPONSE_WRAPPER.captures(body) {
        Some(caps) => caps.name("json").map_or(body, |m| m.as_str()),
        None => body.trim(),
    };

    let response: GvizResponse = serde_json::from_str(json)
        .map_err(|e| FetchError::Malformed(format!("gviz body is not a query response: {e}")))?;

    if response.status == "error" {
        let message = response
            .errors
            .first()
            .map(GvizError::describe)
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(FetchError::Query(message));
    }

    let table = response
        .table
        .ok_or_else(|| FetchError::Malformed("response has no table".to_string()))?;

    Ok(table.rows.into_iter().map(GvizRow::into_raw).collect())
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Fetches each source as a tab of one Google spreadsheet.
#[derive(Debug, Clone)]
pub struct SheetsFetcher {
    client: reqwest::Client,
    endpoint: String,
    query: String,
}

impl SheetsFetcher {
    pub fn new(settings: &SheetConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: reqwest::Client, settings: &SheetConfig) -> Self {
        let endpoint = format!(
            "{}/{}/gviz/tq",
            settings.base_url.trim_end_matches('/'),
            settings.spreadsheet_id
        );
        Self {
            client,
            endpoint,
            query: settings.query.clone(),
        }
    }

    /// The query URL without parameters.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SourceFetcher for SheetsFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<RawRow>, FetchError> {
        tracing::debug!(source, endpoint = %self.endpoint, "requesting sheet");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("sheet", source),
                ("headers", "1"),
                ("tq", self.query.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OK_BODY: &str = r#"/*O_o*/
google.visualization.Query.setResponse({"version":"0.6","reqId":"0","status":"ok","sig":"1","table":{"cols":[{"id":"A","label":"Fecha","type":"date","pattern":"d/M/yyyy"},{"id":"B","label":"Likes","type":"number","pattern":"General"},{"id":"C","label":"Url","type":"string"}],"rows":[{"c":[{"v":"Date(2024,0,15)","f":"15/1/2024"},{"v":120.0,"f":"120"},{"v":"https://www.instagram.com/p/abc/"}]},{"c":[{"v":"Date(2024,0,16)","f":"16/1/2024"},{"v":"85"},null]},{"c":[null,{"v":3.0},{"v":"https://x.test"}]}],"parsedNumHeaders":1}});"#;

    #[test]
    fn parses_wrapped_ok_response() {
        let rows = parse_response(OK_BODY).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            RawRow {
                date: Some("15/1/2024".into()),
                likes: Some(RawLikes::Number(120.0)),
                url: Some("https://www.instagram.com/p/abc/".into()),
            }
        );
        assert_eq!(rows[1].likes, Some(RawLikes::Text("85".into())));
        assert_eq!(rows[1].url, None);
        assert_eq!(rows[2].date, None);
    }

    #[test]
    fn parses_bare_json() {
        let body = r#"{"status":"ok","table":{"rows":[{"c":[{"v":"lunes"},{"v":4}]}]}}"#;
        let rows = parse_response(body).unwrap();
        assert_eq!(rows[0].date.as_deref(), Some("lunes"));
        assert_eq!(rows[0].likes, Some(RawLikes::Number(4.0)));
    }

    #[test]
    fn date_falls_back_to_raw_value() {
        let body = r#"{"status":"ok","table":{"rows":[{"c":[{"v":20240115},{"v":1}]}]}}"#;
        let rows = parse_response(body).unwrap();
        assert_eq!(rows[0].date.as_deref(), Some("20240115"));
    }

    #[test]
    fn error_status_is_query_error() {
        let body = r#"google.visualization.Query.setResponse({"version":"0.6","status":"error","errors":[{"reason":"invalid_query","message":"INVALID_QUERY","detailed_message":"Invalid query: NO_COLUMN: C"}]});"#;
        match parse_response(body) {
            Err(FetchError::Query(msg)) => assert_eq!(msg, "Invalid query: NO_COLUMN: C"),
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[test]
    fn html_body_is_malformed() {
        let body = "<!DOCTYPE html><html><body>Sign in</body></html>";
        assert!(matches!(parse_response(body), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn ok_without_table_is_malformed() {
        assert!(matches!(
            parse_response(r#"{"status":"ok"}"#),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn endpoint_joins_base_and_id() {
        let settings = SheetConfig {
            spreadsheet_id: "abc".into(),
            base_url: "http://127.0.0.1:9/".into(),
            query: "SELECT A, B, C".into(),
        };
        let fetcher = SheetsFetcher::with_client(reqwest::Client::new(), &settings);
        assert_eq!(fetcher.endpoint(), "http://127.0.0.1:9/abc/gviz/tq");
    }
}
