//! Gateway to the remote roster backend: a single HTTP JSON endpoint that
//! multiplexes actions through a POST body `{ token, action, ...payload }`.

use crate::models::attendee::{Attendee, Status};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

/// Row payload of `upsertAttendees`. New rows carry no id; the remote
/// assigns one on insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportRow {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: Status,
}

impl ImportRow {
    pub fn new(name: String, email: Option<String>, note: Option<String>) -> Self {
        Self {
            name,
            email,
            note,
            status: Status::NotYet,
        }
    }
}

/// Flat response envelope. Success fields are a union across actions; the
/// backend only populates the ones the action produces.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    /// Set locally when the failure never reached the backend (transport
    /// error, non-2xx status, unreadable body).
    #[serde(default)]
    pub is_network_error: bool,
    #[serde(default)]
    pub event_code: Option<String>,
    #[serde(default)]
    pub attendees: Option<Vec<Attendee>>,
    #[serde(default)]
    pub inserted: Option<u32>,
    #[serde(default)]
    pub updated: Option<u32>,
}

impl ApiResponse {
    fn network(message: String) -> Self {
        Self {
            ok: false,
            error: Some(message),
            is_network_error: true,
            ..Self::default()
        }
    }

    /// Human-readable failure reason for banners and warnings.
    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "unknown remote error".to_string())
    }
}

/// Trait for remote backends to allow mocking and abstraction. Calls never
/// return `Err`: every failure mode is folded into the [`ApiResponse`].
pub trait Gateway: Send + Sync {
    fn ping(&self) -> ApiResponse;
    fn fetch_attendees(&self) -> ApiResponse;
    fn upsert_attendees(&self, rows: &[ImportRow]) -> ApiResponse;
    fn check_in(&self, id: &str) -> ApiResponse;
    fn undo_check_in(&self, id: &str) -> ApiResponse;
}

pub struct HttpGateway {
    url: String,
    token: String,
    agent: ureq::Agent,
}

impl HttpGateway {
    pub fn new(url: &str, token: &str) -> Self {
        Self {
            url: url.to_string(),
            token: token.to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(15))
                .build(),
        }
    }

    /// POST one action and normalize every failure into the envelope.
    fn call(&self, action: &str, payload: Value) -> ApiResponse {
        let mut body = match payload {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        body.insert("token".to_string(), Value::String(self.token.clone()));
        body.insert("action".to_string(), Value::String(action.to_string()));

        let resp = self.agent.post(&self.url).send_json(Value::Object(body));

        match resp {
            Ok(r) => match r.into_json::<ApiResponse>() {
                Ok(api) => api,
                Err(e) => ApiResponse::network(format!("unreadable response: {e}")),
            },
            Err(ureq::Error::Status(code, r)) => {
                let text = r.into_string().unwrap_or_default();
                ApiResponse::network(format!("HTTP {code}: {text}"))
            }
            Err(e) => ApiResponse::network(format!("request failed: {e}")),
        }
    }
}

impl Gateway for HttpGateway {
    fn ping(&self) -> ApiResponse {
        self.call("ping", json!({}))
    }

    fn fetch_attendees(&self) -> ApiResponse {
        self.call("getAttendees", json!({}))
    }

    fn upsert_attendees(&self, rows: &[ImportRow]) -> ApiResponse {
        self.call("upsertAttendees", json!({ "rows": rows }))
    }

    fn check_in(&self, id: &str) -> ApiResponse {
        self.call("checkIn", json!({ "id": id }))
    }

    fn undo_check_in(&self, id: &str) -> ApiResponse {
        self.call("undoCheckIn", json!({ "id": id }))
    }
}
