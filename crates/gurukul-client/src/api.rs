//! Async HTTP client wrapping the feedback-service JSON API.

use std::time::Duration;

use gurukul_core::{
  draft::{FeedbackDraft, ImprovementDraft},
  record::{FeedbackRecord, ImprovementRecord},
  store::RecordStore,
};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{ApiError, Result};

/// Connection settings for the feedback service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the feedback-service REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. The
/// cookie store carries the collaborator's session cookie across requests,
/// which is how authenticated calls are made.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// Shape of the optional error body a rejection may carry.
#[derive(Deserialize)]
struct ErrorBody {
  message: Option<String>,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .cookie_store(true)
      .build()
      .map_err(|e| ApiError::Setup {
        detail: e.to_string(),
      })?;
    Ok(Self { client, config })
  }

  pub(crate) fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Send a request and map transport failures and non-2xx statuses into
  /// the [`ApiError`] taxonomy.
  pub(crate) async fn execute(
    &self,
    req: reqwest::RequestBuilder,
  ) -> Result<Response> {
    let resp = req.send().await.map_err(|e| {
      tracing::debug!(error = %e, "request failed");
      ApiError::Network {
        detail: e.to_string(),
      }
    })?;

    if resp.status().is_success() {
      return Ok(resp);
    }
    Err(Self::rejection(resp).await)
  }

  /// Build a [`ApiError::Rejected`], salvaging the `message` field from the
  /// body when the collaborator sent one.
  async fn rejection(resp: Response) -> ApiError {
    let status = resp.status().as_u16();
    let message = resp
      .json::<ErrorBody>()
      .await
      .ok()
      .and_then(|body| body.message)
      .filter(|m| !m.is_empty());
    tracing::debug!(status, ?message, "request rejected");
    ApiError::Rejected { status, message }
  }

  async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    resp.json().await.map_err(|e| ApiError::Network {
      detail: format!("deserialising response: {e}"),
    })
  }

  // ── Collection plumbing ───────────────────────────────────────────────────

  /// `GET /{collection}`
  pub(crate) async fn list_records<T: DeserializeOwned>(
    &self,
    path: &str,
  ) -> Result<Vec<T>> {
    let resp = self.execute(self.client.get(self.url(path))).await?;
    Self::decode(resp).await
  }

  /// `POST /{collection}`
  pub(crate) async fn create_record<T, D>(
    &self,
    path: &str,
    draft: &D,
  ) -> Result<T>
  where
    T: DeserializeOwned,
    D: Serialize + Sync,
  {
    let resp = self
      .execute(self.client.post(self.url(path)).json(draft))
      .await?;
    Self::decode(resp).await
  }

  /// `PUT /{collection}/{id}`
  pub(crate) async fn update_record<T, D>(
    &self,
    path: &str,
    id: &str,
    draft: &D,
  ) -> Result<T>
  where
    T: DeserializeOwned,
    D: Serialize + Sync,
  {
    let resp = self
      .execute(
        self
          .client
          .put(format!("{}/{id}", self.url(path)))
          .json(draft),
      )
      .await?;
    Self::decode(resp).await
  }

  /// `DELETE /{collection}/{id}`: any success status counts, body ignored.
  pub(crate) async fn delete_record(&self, path: &str, id: &str) -> Result<()> {
    self
      .execute(self.client.delete(format!("{}/{id}", self.url(path))))
      .await?;
    Ok(())
  }

  pub(crate) fn http(&self) -> &Client { &self.client }
}

// ─── Feedback collection ─────────────────────────────────────────────────────

/// Typed handle for the `/api/feedback` collection.
#[derive(Clone)]
pub struct FeedbackApi {
  client: ApiClient,
}

impl FeedbackApi {
  const PATH: &'static str = "/api/feedback";

  pub fn new(client: ApiClient) -> Self { Self { client } }
}

impl RecordStore for FeedbackApi {
  type Record = FeedbackRecord;
  type Error = ApiError;

  async fn list(&self) -> Result<Vec<FeedbackRecord>> {
    self.client.list_records(Self::PATH).await
  }

  async fn create(&self, draft: &FeedbackDraft) -> Result<FeedbackRecord> {
    self.client.create_record(Self::PATH, draft).await
  }

  async fn update(
    &self,
    id: &str,
    draft: &FeedbackDraft,
  ) -> Result<FeedbackRecord> {
    self.client.update_record(Self::PATH, id, draft).await
  }

  async fn delete(&self, id: &str) -> Result<()> {
    self.client.delete_record(Self::PATH, id).await
  }
}

// ─── Improvements collection ─────────────────────────────────────────────────

/// Typed handle for the `/api/improvements` collection.
#[derive(Clone)]
pub struct ImprovementsApi {
  client: ApiClient,
}

impl ImprovementsApi {
  const PATH: &'static str = "/api/improvements";

  pub fn new(client: ApiClient) -> Self { Self { client } }
}

impl RecordStore for ImprovementsApi {
  type Record = ImprovementRecord;
  type Error = ApiError;

  async fn list(&self) -> Result<Vec<ImprovementRecord>> {
    self.client.list_records(Self::PATH).await
  }

  async fn create(
    &self,
    draft: &ImprovementDraft,
  ) -> Result<ImprovementRecord> {
    self.client.create_record(Self::PATH, draft).await
  }

  async fn update(
    &self,
    id: &str,
    draft: &ImprovementDraft,
  ) -> Result<ImprovementRecord> {
    self.client.update_record(Self::PATH, id, draft).await
  }

  async fn delete(&self, id: &str) -> Result<()> {
    self.client.delete_record(Self::PATH, id).await
  }
}
