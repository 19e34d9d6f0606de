//! Jobflow RPC Server: JSON-RPC over stdin/stdout for a UI host process.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.toggle", "params":{"kind":"event","id":42}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr. `JOBFLOW_CONFIG` points at an alternative settings file.

use std::error::Error;
use std::io::{self, Write};
use std::time::Instant;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use jobflow::app::App;
use jobflow::logging;
use jobflow::rpc_handler::handle_method;
use jobflow::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Simple rate limiter: max requests per one-second window.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self {
            window_start: Instant::now(),
            request_count: 0,
            max_per_second,
        }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn respond(out: &mut impl Write, response: &Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mut settings = SettingsEngine::new(std::env::var("JOBFLOW_CONFIG").ok());
    let loaded = settings.load()?;
    logging::init(&loaded.logging.filter);

    let app = App::with_settings(settings)?;
    info!(version = env!("CARGO_PKG_VERSION"), "RPC server ready");

    let mut out = io::stdout();
    respond(
        &mut out,
        &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}),
    )?;

    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Unparsable request line");
                respond(&mut out, &json!({"id": null, "error": format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            respond(&mut out, &json!({"id": id, "error": "rate limit exceeded"}))?;
            continue;
        }

        let method = req.get("method").and_then(Value::as_str).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or_else(|| json!({}));

        let response = match handle_method(&app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        respond(&mut out, &response)?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
