mod types;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use parking_lot::RwLock;

use crate::{Environment, EvalError, EvalResult, RuleValue};

pub use types::{ErrorBody, EvalRequest, EvalResponse};

/// Shared server state: the environment rules run against.
///
/// In the default shared mode the environment lives behind a write lock
/// and every request's context merges into it, so bindings persist across
/// requests. With isolation on, each request evaluates against a fresh
/// copy of the base environment instead.
#[derive(Clone)]
pub struct AppState {
    env: Arc<RwLock<Environment>>,
    isolate: bool,
}

impl AppState {
    pub fn new(isolate: bool) -> AppState {
        AppState {
            env: Arc::new(RwLock::new(Environment::new())),
            isolate,
        }
    }

    fn evaluate(&self, req: &EvalRequest) -> EvalResult<RuleValue> {
        if self.isolate {
            let mut env = self.env.read().clone();

            env.merge_json_object(&req.context);
            env.eval_rule(&req.rule)
        } else {
            let mut env = self.env.write();

            env.merge_json_object(&req.context);
            env.eval_rule(&req.rule)
        }
    }
}

struct ApiError(EvalError);

impl From<EvalError> for ApiError {
    fn from(err: EvalError) -> ApiError {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // every evaluation failure reports through the same fixed format
        let detail = format!("Error evaluando la regla: {}", self.0);

        (StatusCode::BAD_REQUEST, Json(ErrorBody { detail })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate))
        .with_state(state)
}

async fn evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvalRequest>,
) -> Result<Json<EvalResponse>, ApiError> {
    tracing::debug!(rule = %req.rule, "evaluating rule");

    let value = state.evaluate(&req).map_err(|err| {
        tracing::warn!(rule = %req.rule, error = %err, "rule evaluation failed");
        err
    })?;

    let result = value
        .into_json_primitive()
        .ok_or_else(|| EvalError::internal("primitive result did not serialize"))?;

    Ok(Json(EvalResponse { result }))
}

#[cfg(test)]
mod test {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use super::{router, AppState};

    fn app(isolate: bool) -> Router {
        router(AppState::new(isolate))
    }

    async fn post_evaluate(
        app: Router,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/evaluate")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn evaluate_bool_rule() {
        let (status, body) = post_evaluate(
            app(false),
            json!({"context": {"age": 21}, "rule": "age >= 18"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": true}));
    }

    #[tokio::test]
    async fn evaluate_string_rule() {
        let (status, body) = post_evaluate(
            app(false),
            json!({
                "context": {"name": "federico"},
                "rule": "upper(substring(name, 0, 3))"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": "FED"}));
    }

    #[tokio::test]
    async fn evaluate_numeric_rule() {
        let (status, body) = post_evaluate(
            app(false),
            json!({
                "context": {"items": [1, 2, 3], "price": 2.5},
                "rule": "len(items) * price"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": 7.5}));
    }

    #[tokio::test]
    async fn evaluation_error_is_400_with_detail() {
        let (status, body) = post_evaluate(
            app(false),
            json!({"context": {}, "rule": "unknown_name + 1"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);

        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error evaluando la regla: "), "{}", detail);
    }

    #[tokio::test]
    async fn syntax_error_is_400_with_detail() {
        let (status, body) =
            post_evaluate(app(false), json!({"context": {}, "rule": "1 +"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Error evaluando la regla: "));
    }

    #[tokio::test]
    async fn non_primitive_result_is_400() {
        let (status, body) = post_evaluate(
            app(false),
            json!({"context": {"items": [1, 2]}, "rule": "items"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "detail":
                    "Error evaluando la regla: La regla no devolvió un resultado válido."
            })
        );
    }

    #[tokio::test]
    async fn non_primitive_result_detail_is_prefixed() {
        let (status, body) = post_evaluate(
            app(false),
            json!({"context": {}, "rule": "[1, 2, 3]"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Error evaluando la regla: "));
    }

    #[tokio::test]
    async fn context_persists_across_requests_in_shared_mode() {
        let app = app(false);

        let (status, _) = post_evaluate(
            app.clone(),
            json!({"context": {"flag": true}, "rule": "flag"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // no context this time, the binding from the first request remains
        let (status, body) =
            post_evaluate(app, json!({"context": {}, "rule": "flag"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": true}));
    }

    #[tokio::test]
    async fn context_does_not_persist_in_isolated_mode() {
        let app = app(true);

        let (status, _) = post_evaluate(
            app.clone(),
            json!({"context": {"flag": true}, "rule": "flag"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) =
            post_evaluate(app, json!({"context": {}, "rule": "flag"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_object_context_is_rejected() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/evaluate")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({"context": [1, 2], "rule": "1"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}
