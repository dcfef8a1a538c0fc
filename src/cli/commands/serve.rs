//! HTTP endpoint for the Smart Community agent.
//!
//! Exposes exactly one tool, `generate_recommendations_from_input`. Every
//! response is HTTP 200; failures are reported in the body.

use super::build_context;
use crate::agents::community::{Recommendations, RecommendationsArgs};
use crate::cli::Output;
use crate::config::Settings;
use crate::tool::{invoke, ToolContext};
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const STATUS_MESSAGE: &str = "Smart Community Agent API is running.";
const MISSING_INPUT: &str = "Missing 'input'";

/// Shared application state.
pub struct AppState {
    pub context: ToolContext,
}

/// Build the router. Split out from [`run_serve`] so handlers can be exercised without a socket.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/agent", post(call_agent))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    // Fail at startup, not on the first request, when the credential is missing.
    let state = Arc::new(AppState {
        context: build_context(&settings)?,
    });

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Serving smart community agent on {}", addr);

    Output::header("Smart Community Agent API");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Model", &settings.model.name);
    println!();
    println!("Endpoints:");
    Output::kv("Status", "GET  /");
    Output::kv("Agent", "POST /agent  {\"input\": \"...\"}");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

// === Handlers ===

async fn root() -> Json<Value> {
    Json(json!({ "message": STATUS_MESSAGE }))
}

async fn call_agent(State(state): State<Arc<AppState>>, body: Bytes) -> Json<Value> {
    let user_input = match extract_input(&body) {
        Ok(input) => input,
        Err(message) => {
            warn!("Rejected /agent request: {}", message);
            return Json(json!({ "status": "error", "message": message }));
        }
    };

    let result = invoke(
        &Recommendations,
        &RecommendationsArgs::new(user_input),
        &state.context,
    )
    .await;

    Json(json!({ "status": "success", "response": result }))
}

/// Pull a usable `input` string out of the request body.
///
/// Absent, null, and other empty-ish values all count as missing.
fn extract_input(body: &[u8]) -> Result<String, String> {
    let data: Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    let data = data
        .as_object()
        .ok_or_else(|| "Request body must be a JSON object".to_string())?;

    match data.get("input") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(MISSING_INPUT.to_string()),
        Some(Value::String(s)) if s.is_empty() => Err(MISSING_INPUT.to_string()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(MISSING_INPUT.to_string()),
        Some(Value::Array(a)) if a.is_empty() => Err(MISSING_INPUT.to_string()),
        Some(Value::Object(o)) if o.is_empty() => Err(MISSING_INPUT.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err("'input' must be a string".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;
    use crate::model::mock::MockGenerator;
    use std::time::Duration;

    fn state(generator: &Arc<MockGenerator>) -> Arc<AppState> {
        Arc::new(AppState {
            context: ToolContext::new(generator.clone(), Prompts::default(), Duration::from_secs(5)),
        })
    }

    async fn post(state: Arc<AppState>, body: &'static [u8]) -> Value {
        call_agent(State(state), Bytes::from_static(body)).await.0
    }

    #[test]
    fn test_root_reports_status() {
        let Json(body) = tokio_test::block_on(root());
        assert_eq!(body, json!({"message": "Smart Community Agent API is running."}));
    }

    #[test]
    fn test_missing_input_exact_body() {
        let generator = Arc::new(MockGenerator::replying("{}"));
        let body = tokio_test::block_on(post(state(&generator), b"{}"));
        assert_eq!(body, json!({"status": "error", "message": "Missing 'input'"}));
        assert_eq!(generator.calls(), 0);
    }

    #[test]
    fn test_falsy_inputs_count_as_missing() {
        for raw in [r#"{"input": ""}"#, r#"{"input": null}"#, r#"{"input": false}"#] {
            assert_eq!(extract_input(raw.as_bytes()), Err(MISSING_INPUT.to_string()));
        }
        assert_eq!(
            extract_input(br#"{"input": 42}"#),
            Err("'input' must be a string".to_string())
        );
    }

    #[test]
    fn test_malformed_body_is_error_envelope() {
        let generator = Arc::new(MockGenerator::replying("{}"));
        let body = tokio_test::block_on(post(state(&generator), b"{input"));
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("line 1"));

        let body = tokio_test::block_on(post(state(&generator), b"[1, 2]"));
        assert_eq!(
            body,
            json!({"status": "error", "message": "Request body must be a JSON object"})
        );
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_agent_relays_tool_envelope() {
        let generator = Arc::new(MockGenerator::replying(r#"{"summary": "No water"}"#));
        let body = post(
            state(&generator),
            br#"{"input": "Our ward has had no water for two weeks and the borehole pump is broken."}"#,
        )
        .await;

        assert_eq!(
            body,
            json!({
                "status": "success",
                "response": {"status": "success", "recommendations": {"summary": "No water"}}
            })
        );
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_agent_relays_tool_validation_error() {
        let generator = Arc::new(MockGenerator::replying("{}"));
        let body = post(state(&generator), br#"{"input": "too short"}"#).await;

        assert_eq!(body["status"], "success");
        assert_eq!(body["response"]["status"], "error");
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_agent_relays_remote_failure() {
        let generator = Arc::new(MockGenerator::failing("deadline exceeded"));
        let body = post(
            state(&generator),
            br#"{"input": "Street lights in our estate have been off for a month and muggings are up."}"#,
        )
        .await;

        assert_eq!(body["status"], "success");
        assert_eq!(body["response"]["status"], "error");
        assert!(body["response"]["message"]
            .as_str()
            .unwrap()
            .contains("deadline exceeded"));
    }

    #[test]
    fn test_router_builds() {
        let generator = Arc::new(MockGenerator::replying("{}"));
        let _router = router(state(&generator));
    }
}
