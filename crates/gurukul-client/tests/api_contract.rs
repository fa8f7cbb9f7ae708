//! Contract tests for the HTTP client against a loopback mock of the
//! feedback-service collaborator.

use axum::{
  Json, Router,
  extract::Path,
  http::StatusCode,
  routing::{delete, get, post, put},
};
use gurukul_client::{
  ApiClient, ApiConfig, ApiError, AuthApi, FeedbackApi, ImprovementsApi,
};
use gurukul_core::{
  draft::{FeedbackDraft, ImprovementDraft},
  record::House,
  session::AuthProvider as _,
  store::RecordStore as _,
};
use serde_json::{Value, json};

/// Serve `router` on an ephemeral loopback port; returns the base URL.
async fn serve(router: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
    .await
    .expect("bind loopback");
  let addr = listener.local_addr().expect("local addr");
  tokio::spawn(async move {
    axum::serve(listener, router).await.expect("mock server");
  });
  format!("http://{addr}")
}

fn client(base_url: String) -> ApiClient {
  ApiClient::new(ApiConfig { base_url }).expect("build client")
}

// ─── Collections ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_feedback_decodes_canonical_records() {
  let router = Router::new().route(
    "/api/feedback",
    get(|| async {
      Json(json!([{
        "_id": "1",
        "studentName": "Ann",
        "house": "Megh",
        "rating": 5,
        "timestamp": "2024-01-01T10:00:00Z"
      }]))
    }),
  );
  let api = FeedbackApi::new(client(serve(router).await));

  let records = api.list().await.unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].id, "1");
  assert_eq!(records[0].display_name(), "Ann");
  assert_eq!(records[0].house, Some(House::Megh));
  assert_eq!(records[0].rating, 5);
}

#[tokio::test]
async fn create_posts_the_camel_case_draft_and_adopts_the_canonical_form() {
  let router = Router::new().route(
    "/api/improvements",
    post(|Json(body): Json<Value>| async move {
      // The draft carries exactly the editable-field set.
      assert_eq!(body["submittedBy"], "Ann");
      assert_eq!(body["problem"], "projector flickers");
      assert!(body.get("_id").is_none());
      assert!(body.get("timestamp").is_none());
      (
        StatusCode::CREATED,
        Json(json!({
          "_id": "imp1",
          "problem": body["problem"].clone(),
          "solution": body["solution"].clone(),
          "submittedBy": body["submittedBy"].clone(),
          "timestamp": "2024-06-01T09:00:00Z"
        })),
      )
    }),
  );
  let api = ImprovementsApi::new(client(serve(router).await));

  let record = api
    .create(&ImprovementDraft {
      problem:      "projector flickers".to_string(),
      solution:     "replace the cable".to_string(),
      submitted_by: "Ann".to_string(),
    })
    .await
    .unwrap();
  assert_eq!(record.id, "imp1");
  assert_eq!(record.submitted_by, "Ann");
}

#[tokio::test]
async fn rejection_surfaces_the_collaborator_message_verbatim() {
  let router = Router::new().route(
    "/api/feedback/{id}",
    put(|Path(_id): Path<String>| async {
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "db down"})),
      )
    }),
  );
  let api = FeedbackApi::new(client(serve(router).await));

  let err = api
    .update("1", &FeedbackDraft::default())
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    ApiError::Rejected {
      status: 500,
      message: Some(_)
    }
  ));
  assert_eq!(err.to_string(), "db down");
}

#[tokio::test]
async fn rejection_without_a_message_reads_as_server_error() {
  let router = Router::new().route(
    "/api/feedback",
    get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
  );
  let api = FeedbackApi::new(client(serve(router).await));

  let err = api.list().await.unwrap_err();
  assert_eq!(err.to_string(), "Server error");
}

#[tokio::test]
async fn delete_accepts_any_success_status_and_ignores_the_body() {
  let router = Router::new().route(
    "/api/feedback/{id}",
    delete(|Path(_id): Path<String>| async { StatusCode::NO_CONTENT }),
  );
  let api = FeedbackApi::new(client(serve(router).await));

  assert!(api.delete("1").await.is_ok());
}

#[tokio::test]
async fn unreachable_backend_reads_as_a_connection_failure() {
  // Grab an ephemeral port, then free it so nothing listens there.
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let api = FeedbackApi::new(client(format!("http://{addr}")));
  let err = api.list().await.unwrap_err();
  assert!(matches!(err, ApiError::Network { .. }));
  assert_eq!(err.to_string(), "Connection failed. Is the backend running?");
}

// ─── Auth ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn current_user_is_absent_when_unauthenticated() {
  let router = Router::new()
    .route("/auth/user", get(|| async { StatusCode::UNAUTHORIZED }));
  let auth = AuthApi::new(client(serve(router).await));

  assert_eq!(auth.current_user().await.unwrap(), None);
}

#[tokio::test]
async fn current_user_decodes_the_profile() {
  let router = Router::new().route(
    "/auth/user",
    get(|| async {
      Json(json!({
        "name": "Priya",
        "email": "priya@example.edu",
        "picture": "https://example.edu/priya.png"
      }))
    }),
  );
  let auth = AuthApi::new(client(serve(router).await));

  let user = auth.current_user().await.unwrap().expect("signed in");
  assert_eq!(user.name, "Priya");
  assert_eq!(user.picture.as_deref(), Some("https://example.edu/priya.png"));
}

#[tokio::test]
async fn login_url_points_at_the_google_flow() {
  let auth = AuthApi::new(client("http://localhost:3000/".to_string()));
  assert_eq!(auth.login_url(), "http://localhost:3000/auth/google");
}
