// API client module: a small blocking HTTP client for the VibeBench
// voting service. One method per remote operation, no retries and no
// caching; a failed round trip surfaces immediately as an `ApiError`.

use log::debug;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://vibebench.com";

/// One of the three mutually exclusive vote categories.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Fire,
    Mid,
    Cursed,
}

impl VoteType {
    pub const ALL: [VoteType; 3] = [VoteType::Fire, VoteType::Mid, VoteType::Cursed];

    /// Human-readable label, capitalized for display.
    pub fn label(self) -> &'static str {
        match self {
            VoteType::Fire => "Fire",
            VoteType::Mid => "Mid",
            VoteType::Cursed => "Cursed",
        }
    }
}

impl FromStr for VoteType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fire" => Ok(VoteType::Fire),
            "mid" => Ok(VoteType::Mid),
            "cursed" => Ok(VoteType::Cursed),
            _ => Err(()),
        }
    }
}

/// Vote tally for one model. The server maintains the invariant
/// `fire + mid + cursed == total`; the client only consumes it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VoteTally {
    pub fire: u64,
    pub mid: u64,
    pub cursed: u64,
    pub total: u64,
}

/// A vote-able model as the service reports it, without ranking.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub slug: String,
    pub name: String,
    pub category: String,
    pub vibe_score: f64,
    pub votes: VoteTally,
}

/// A model plus its position in a leaderboard snapshot. Rank presence
/// is a type-level distinction: un-ranked data stays a plain `Model`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LeaderboardEntry {
    pub rank: u32,
    #[serde(flatten)]
    pub model: Model,
}

/// Outbound vote payload. Built per invocation, sent once.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub model_slug: String,
    pub vote_type: VoteType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub success: bool,
    pub message: String,
    pub updated_model: Option<Model>,
    pub rate_limit_remaining: Option<u64>,
}

/// Point-in-time quota snapshot; re-fetched on every inquiry.
/// `reset_time` is an epoch timestamp in milliseconds.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitStatus {
    pub remaining: u64,
    pub reset_time: i64,
    pub max_votes: u64,
}

#[derive(Deserialize, Debug)]
struct LeaderboardResponse {
    data: Vec<LeaderboardEntry>,
}

/// Error body the service returns on non-2xx statuses. All fields are
/// optional because not every deployment sets all of them.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    reset_time: Option<i64>,
}

/// Failure taxonomy for remote operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, DNS or body-decoding failure in the transport layer.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response other than 429. `message` carries the
    /// server-provided text when the body was parseable.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// HTTP 429. `reset_time` is the epoch-millisecond reset timestamp
    /// from the response body, when the server included one.
    #[error("rate limit exceeded")]
    RateLimited { reset_time: Option<i64> },

    /// The leaderboard snapshot has no entry for this slug.
    #[error("model not found: {0}")]
    NotFound(String),
}

/// Blocking client holding a reqwest client and the service base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client configured from the environment variable
    /// `VIBEBENCH_API_URL`, or fall back to the public service URL.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("VIBEBENCH_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        ApiClient::new(base_url)
    }

    /// Submit a vote by POSTing to /api/vote.
    pub fn vote(&self, request: &VoteRequest) -> Result<VoteResponse, ApiError> {
        let url = format!("{}/api/vote", self.base_url);
        debug!("POST {} ({})", url, request.model_slug);
        let res = self.client.post(&url).json(request).send()?;
        if !res.status().is_success() {
            return Err(error_from_response(res));
        }
        Ok(res.json()?)
    }

    /// Fetch the full leaderboard snapshot, ranked best-first.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let url = format!("{}/api/leaderboard", self.base_url);
        debug!("GET {}", url);
        let res = self.client.get(&url).send()?;
        if !res.status().is_success() {
            return Err(error_from_response(res));
        }
        let body: LeaderboardResponse = res.json()?;
        Ok(body.data)
    }

    /// Stats for a single model: a client-side filter of the
    /// leaderboard, since the service has no per-model endpoint.
    pub fn model_stats(&self, slug: &str) -> Result<LeaderboardEntry, ApiError> {
        let entries = self.leaderboard()?;
        entries
            .into_iter()
            .find(|e| e.model.slug == slug)
            .ok_or_else(|| ApiError::NotFound(slug.to_string()))
    }

    /// Fetch the caller's current rate-limit quota.
    pub fn rate_limit_status(&self) -> Result<RateLimitStatus, ApiError> {
        let url = format!("{}/api/rate-limit-status", self.base_url);
        debug!("GET {}", url);
        let res = self.client.get(&url).send()?;
        if !res.status().is_success() {
            return Err(error_from_response(res));
        }
        Ok(res.json()?)
    }
}

fn error_from_response(res: reqwest::blocking::Response) -> ApiError {
    let status = res.status();
    let body: Option<ErrorBody> = res.json().ok();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ApiError::RateLimited {
            reset_time: body.and_then(|b| b.reset_time),
        };
    }
    let message = body
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn leaderboard_body() -> serde_json::Value {
        json!({
            "data": [
                {
                    "rank": 1,
                    "slug": "gpt-4o",
                    "name": "GPT-4o",
                    "category": "Frontier",
                    "vibeScore": 87.5,
                    "votes": { "fire": 120, "mid": 30, "cursed": 5, "total": 155 }
                },
                {
                    "rank": 2,
                    "slug": "claude-3",
                    "name": "Claude 3",
                    "category": "Frontier",
                    "vibeScore": 84.1,
                    "votes": { "fire": 95, "mid": 40, "cursed": 10, "total": 145 }
                }
            ]
        })
    }

    #[test]
    fn leaderboard_parses_and_tally_invariant_holds() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/leaderboard");
            then.status(200).json_body(leaderboard_body());
        });

        let api = ApiClient::new(server.base_url());
        let entries = api.leaderboard().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].model.slug, "gpt-4o");
        for entry in &entries {
            let v = &entry.model.votes;
            assert_eq!(v.fire + v.mid + v.cursed, v.total);
        }
    }

    #[test]
    fn model_stats_filters_by_slug() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/leaderboard");
            then.status(200).json_body(leaderboard_body());
        });

        let api = ApiClient::new(server.base_url());
        let entry = api.model_stats("claude-3").unwrap();
        assert_eq!(entry.rank, 2);
        assert_eq!(entry.model.name, "Claude 3");
    }

    #[test]
    fn model_stats_misses_with_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/leaderboard");
            then.status(200).json_body(leaderboard_body());
        });

        let api = ApiClient::new(server.base_url());
        match api.model_stats("not-a-real-model") {
            Err(ApiError::NotFound(slug)) => assert_eq!(slug, "not-a-real-model"),
            other => panic!("expected NotFound, got {:?}", other.map(|e| e.model.slug)),
        }
    }

    #[test]
    fn vote_success_parses_updated_model_and_remaining() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/vote")
                .json_body(json!({ "modelSlug": "gpt-4o", "voteType": "fire" }));
            then.status(200).json_body(json!({
                "success": true,
                "message": "Vote recorded",
                "updatedModel": {
                    "slug": "gpt-4o",
                    "name": "GPT-4o",
                    "category": "Frontier",
                    "vibeScore": 87.9,
                    "votes": { "fire": 121, "mid": 30, "cursed": 5, "total": 156 }
                },
                "rateLimitRemaining": 2
            }));
        });

        let api = ApiClient::new(server.base_url());
        let request = VoteRequest {
            model_slug: "gpt-4o".into(),
            vote_type: VoteType::Fire,
            comment: None,
        };
        let response = api.vote(&request).unwrap();
        assert!(response.success);
        assert_eq!(response.rate_limit_remaining, Some(2));
        let model = response.updated_model.unwrap();
        assert_eq!(model.votes.total, 156);
    }

    #[test]
    fn status_429_maps_to_rate_limited_with_reset_time() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/vote");
            then.status(429)
                .json_body(json!({ "error": "Rate limit exceeded", "resetTime": 1700000300000i64 }));
        });

        let api = ApiClient::new(server.base_url());
        let request = VoteRequest {
            model_slug: "gpt-4o".into(),
            vote_type: VoteType::Mid,
            comment: None,
        };
        match api.vote(&request) {
            Err(ApiError::RateLimited { reset_time }) => {
                assert_eq!(reset_time, Some(1_700_000_300_000));
            }
            other => panic!("expected RateLimited, got ok={}", other.is_ok()),
        }
    }

    #[test]
    fn non_2xx_carries_server_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/rate-limit-status");
            then.status(503).json_body(json!({ "message": "service unavailable" }));
        });

        let api = ApiClient::new(server.base_url());
        match api.rate_limit_status() {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "service unavailable");
            }
            other => panic!("expected Status, got ok={}", other.is_ok()),
        }
    }

    #[test]
    fn non_2xx_without_body_falls_back_to_http_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/leaderboard");
            then.status(500);
        });

        let api = ApiClient::new(server.base_url());
        match api.leaderboard() {
            Err(ApiError::Status { message, .. }) => assert_eq!(message, "HTTP 500"),
            other => panic!("expected Status, got ok={}", other.is_ok()),
        }
    }

    #[test]
    fn vote_type_parses_case_insensitively() {
        assert_eq!("FIRE".parse::<VoteType>(), Ok(VoteType::Fire));
        assert_eq!("mid".parse::<VoteType>(), Ok(VoteType::Mid));
        assert_eq!("Cursed".parse::<VoteType>(), Ok(VoteType::Cursed));
        assert!("great".parse::<VoteType>().is_err());
    }
}
