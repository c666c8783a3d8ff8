// HTTP client for the remote collaborators: the draft authority (start, pick,
// ban) and the roster data source (fetch, sync).
//
// The authority owns the true draft state; every successful call returns a
// full snapshot that replaces the client cache. Rejections carry the
// authority's own message, which is surfaced to the user verbatim.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::draft::hero::Hero;
use crate::draft::session::DraftSnapshot;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    /// The collaborator was unreachable or the connection failed mid-request.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
    },

    /// The collaborator answered with a non-success status and no usable
    /// rejection message (roster fetch, malformed body, ...).
    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    /// The authority refused a start/pick/ban. The message is the authority's
    /// own explanation and must be shown to the user unchanged.
    #[error("{message}")]
    Rejected { message: String },
}

impl ApiError {
    /// Whether this failure is an authoritative refusal rather than a
    /// transport-level problem.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

// ---------------------------------------------------------------------------
// DraftAuthority trait
// ---------------------------------------------------------------------------

/// The remote operations this client depends on.
///
/// The production implementation is [`HttpAuthority`]; tests substitute an
/// in-process fake to drive the state machine without a server.
#[async_trait]
pub trait DraftAuthority: Send + Sync + 'static {
    /// Fetch the full hero catalog.
    async fn fetch_heroes(&self) -> Result<Vec<Hero>, ApiError>;

    /// Trigger the upstream catalog refresh. Returns the source's
    /// human-readable status message, displayed verbatim.
    async fn sync_heroes(&self) -> Result<String, ApiError>;

    /// Create a new draft and return its initial snapshot.
    async fn start_draft(&self) -> Result<DraftSnapshot, ApiError>;

    /// Record a pick for the given draft and hero.
    async fn pick_hero(&self, draft_id: i64, hero_id: i64) -> Result<DraftSnapshot, ApiError>;

    /// Record a ban for the given draft and hero.
    async fn ban_hero(&self, draft_id: i64, hero_id: i64) -> Result<DraftSnapshot, ApiError>;
}

// ---------------------------------------------------------------------------
// HttpAuthority
// ---------------------------------------------------------------------------

/// reqwest-backed client for the drafter backend's REST surface.
pub struct HttpAuthority {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthority {
    /// Create a client against the given base URL (e.g.
    /// `http://localhost:8080/api`). A trailing slash is trimmed so path
    /// joining stays predictable.
    pub fn new(base_url: &str) -> Self {
        HttpAuthority {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST to a draft endpoint and decode the returned snapshot.
    ///
    /// Non-success responses are read as the authority's rejection message;
    /// an empty body falls back to the status line so the user still sees
    /// something actionable.
    async fn post_draft(
        &self,
        endpoint: &'static str,
        url: String,
    ) -> Result<DraftSnapshot, ApiError> {
        debug!(endpoint, %url, "dispatching draft request");
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(rejection(status, message));
        }

        response
            .json::<DraftSnapshot>()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })
    }
}

/// Build the rejection error for a non-success draft response, falling back
/// to the status line when the authority sent no message body.
fn rejection(status: StatusCode, message: String) -> ApiError {
    let message = message.trim();
    if message.is_empty() {
        ApiError::Rejected {
            message: format!("request rejected with status {}", status),
        }
    } else {
        ApiError::Rejected {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl DraftAuthority for HttpAuthority {
    async fn fetch_heroes(&self) -> Result<Vec<Hero>, ApiError> {
        const ENDPOINT: &str = "fetch_heroes";
        let response = self
            .http
            .get(self.url("/heroes"))
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint: ENDPOINT, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint: ENDPOINT, status });
        }

        response
            .json::<Vec<Hero>>()
            .await
            .map_err(|source| ApiError::Transport { endpoint: ENDPOINT, source })
    }

    async fn sync_heroes(&self) -> Result<String, ApiError> {
        const ENDPOINT: &str = "sync_heroes";
        let response = self
            .http
            .post(self.url("/heroes/sync"))
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint: ENDPOINT, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint: ENDPOINT, status });
        }

        response
            .text()
            .await
            .map_err(|source| ApiError::Transport { endpoint: ENDPOINT, source })
    }

    async fn start_draft(&self) -> Result<DraftSnapshot, ApiError> {
        self.post_draft("start_draft", self.url("/draft/start")).await
    }

    async fn pick_hero(&self, draft_id: i64, hero_id: i64) -> Result<DraftSnapshot, ApiError> {
        let url = self.url(&format!("/draft/{}/pick/{}", draft_id, hero_id));
        self.post_draft("pick_hero", url).await
    }

    async fn ban_hero(&self, draft_id: i64, hero_id: i64) -> Result<DraftSnapshot, ApiError> {
        let url = self.url(&format!("/draft/{}/ban/{}", draft_id, hero_id));
        self.post_draft("ban_hero", url).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
