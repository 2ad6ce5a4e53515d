//! Fake Google Sheets gviz endpoint for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /{spreadsheet_id}/gviz/tq?sheet=NAME&...` with the
//! body and status registered for that sheet. Unknown sheets get a gviz
//! error body, the way the real endpoint answers a bad tab name.
//!
//! ```rust,no_run
//! let api = FakeSheetsApi::start("sheet-id").await.unwrap();
//! api.serve("Los_delaU", 200, gviz_ok(&[("1/1/2024", json!(5), None)])).await;
//! let settings = api.sheet_config();
//! ```

use super::fixtures::gviz_error;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use capscore_core::config::SheetConfig;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Default)]
struct ApiState {
    spreadsheet_id: String,
    sheets: HashMap<String, (u16, String)>,
    /// Query parameters of every request, in arrival order.
    requests: Vec<HashMap<String, String>>,
}

/// Handle to the running fake Sheets server.
pub struct FakeSheetsApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeSheetsApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start(spreadsheet_id: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            spreadsheet_id: spreadsheet_id.to_string(),
            ..ApiState::default()
        }));

        let app = Router::new()
            .route("/{id}/gviz/tq", get(query))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL to put in `[sheet] base_url`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Settings pointing a `SheetsFetcher` at this server.
    pub async fn sheet_config(&self) -> SheetConfig {
        SheetConfig {
            spreadsheet_id: self.state.lock().await.spreadsheet_id.clone(),
            base_url: self.base_url(),
            ..SheetConfig::default()
        }
    }

    /// Answer requests for `sheet` with `status` and `body`.
    pub async fn serve(&self, sheet: &str, status: u16, body: impl Into<String>) {
        self.state
            .lock()
            .await
            .sheets
            .insert(sheet.to_string(), (status, body.into()));
    }

    /// Query parameters of every request received so far.
    pub async fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().await.requests.clone()
    }
}

async fn query(
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.requests.push(params.clone());

    if id != state.spreadsheet_id {
        return (StatusCode::NOT_FOUND, String::from("spreadsheet not found"));
    }
    let sheet = params.get("sheet").cloned().unwrap_or_default();
    match state.sheets.get(&sheet) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body.clone(),
        ),
        None => (
            StatusCode::OK,
            gviz_error(&format!("Invalid sheet name: {sheet}")),
        ),
    }
}
