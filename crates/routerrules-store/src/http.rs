//! HTTP rule-set backend.
//!
//! Calls a remote policy service over HTTP:
//!
//! | operation            | request                                   |
//! |----------------------|-------------------------------------------|
//! | `add_rule`           | `POST   {base}/routers/{id}/rules`        |
//! | `remove_rules` (one) | `DELETE {base}/routers/{id}/rules/{rule}` |
//! | `remove_rules` reset | `DELETE {base}/routers/{id}/rules`        |
//!
//! Request bodies use JSON (default) or bincode via [`Codec`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use routerrules_store::http::{Codec, HttpBackend};
//!
//! let backend = HttpBackend::new(
//!     "https://controller.example/v1",
//!     Codec::Json,
//!     Some("api-token".into()),
//!     Duration::from_secs(10),
//! )
//! .unwrap();
//! ```

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use routerrules_rules::{RouterId, Rule, RuleId};
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::traits::RulePolicyBackend;

// ── Codec ─────────────────────────────────────────────────────────

/// Serialization codec for request bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// JSON (default).
    #[default]
    Json,
    /// Bincode, a compact binary format.
    Bincode,
}

impl FromStr for Codec {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Codec::Json),
            "bincode" => Ok(Codec::Bincode),
            other => Err(BackendError::Backend(format!("unsupported codec: {other}"))),
        }
    }
}

// ── HttpBackend ───────────────────────────────────────────────────

/// Backend that delegates to a remote policy service.
#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    base: Url,
    codec: Codec,
    token: Option<String>,
}

impl HttpBackend {
    /// Create a new HTTP backend.
    ///
    /// `base_url` is the service root (e.g. `https://controller.example/v1`).
    /// `token` is sent as a Bearer token when present.
    pub fn new(
        base_url: &str,
        codec: Codec,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Backend(format!("failed to build HTTP client: {e}")))?;
        Self::with_client(client, base_url, codec, token)
    }

    /// Create with a custom reqwest [`Client`] (for proxies, TLS roots, etc.).
    pub fn with_client(
        client: Client,
        base_url: &str,
        codec: Codec,
        token: Option<String>,
    ) -> Result<Self, BackendError> {
        let base = Url::parse(base_url)
            .map_err(|e| BackendError::Backend(format!("invalid base url {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(BackendError::Backend(format!(
                "invalid base url {base_url:?}: cannot be a base"
            )));
        }
        Ok(Self {
            client,
            base,
            codec,
            token,
        })
    }

    /// `{base}/routers/{router}/rules[/{rule}]`, with each segment escaped.
    pub(crate) fn rules_url(&self, router_id: &RouterId, rule_id: Option<&RuleId>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("routers")
                .push(router_id.as_str())
                .push("rules");
            if let Some(rule_id) = rule_id {
                segments.push(rule_id.as_str());
            }
        }
        url
    }

    /// Send a request and map the response status.
    ///
    /// 404 is mapped through `not_found`; other 4xx become
    /// [`BackendError::Rejected`], everything else [`BackendError::Backend`].
    async fn send<B, F>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        not_found: F,
    ) -> Result<(), BackendError>
    where
        B: Serialize + Sync,
        F: FnOnce(String) -> BackendError + Send,
    {
        tracing::debug!(method = %method, url = %url, "policy backend request");

        let mut req = self.client.request(method, url);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = match self.codec {
                Codec::Json => req.json(body),
                Codec::Bincode => {
                    let bytes = bincode::serialize(body).map_err(BackendError::backend)?;
                    req.header("Content-Type", "application/octet-stream")
                        .body(bytes)
                }
            };
        }

        let resp = req.send().await.map_err(BackendError::backend)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let message = resp
            .json::<wire::ErrorBody>()
            .await
            .map(|b| b.message)
            .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
        if status == StatusCode::NOT_FOUND {
            return Err(not_found(message));
        }
        if status.is_client_error() {
            return Err(BackendError::Rejected(message));
        }
        Err(BackendError::Backend(message))
    }
}

#[async_trait]
impl RulePolicyBackend for HttpBackend {
    async fn add_rule(&self, router_id: &RouterId, rule: &Rule) -> Result<(), BackendError> {
        let body = wire::RuleBody::from(rule);
        self.send(
            Method::POST,
            self.rules_url(router_id, None),
            Some(&body),
            BackendError::Rejected,
        )
        .await
    }

    async fn remove_rules(
        &self,
        router_id: &RouterId,
        rule_id: Option<&RuleId>,
        reset: bool,
    ) -> Result<(), BackendError> {
        if reset {
            return self
                .send::<(), _>(
                    Method::DELETE,
                    self.rules_url(router_id, None),
                    None,
                    BackendError::Rejected,
                )
                .await;
        }

        let rule_id = rule_id.ok_or_else(|| {
            BackendError::Rejected("no rule id given and reset not requested".into())
        })?;
        self.send::<(), _>(
            Method::DELETE,
            self.rules_url(router_id, Some(rule_id)),
            None,
            |_| BackendError::NotFound(rule_id.clone()),
        )
        .await
    }
}

// ── Wire types (must match the policy service) ────────────────────

#[allow(missing_debug_implementations)]
mod wire {
    use serde::{Deserialize, Serialize};

    use routerrules_rules::Rule;

    #[derive(Serialize, Deserialize)]
    pub struct RuleBody {
        pub priority: i32,
        pub action: String,
        pub source: String,
        pub destination: String,
        pub nexthops: Vec<String>,
    }

    #[derive(Deserialize)]
    pub struct ErrorBody {
        pub message: String,
    }

    impl From<&Rule> for RuleBody {
        fn from(rule: &Rule) -> Self {
            Self {
                priority: rule.priority.get(),
                action: rule.action.to_string(),
                source: rule.source.to_string(),
                destination: rule.destination.to_string(),
                nexthops: rule.nexthops.iter().map(ToString::to_string).collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, Codec::Json, None, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn urls_are_built_per_segment() {
        let router = RouterId::new("r 1/x").unwrap();
        let b = backend("https://controller.example/v1/");
        assert_eq!(
            b.rules_url(&router, None).as_str(),
            "https://controller.example/v1/routers/r%201%2Fx/rules"
        );
        assert_eq!(
            b.rules_url(&router, Some(&RuleId::from("5"))).as_str(),
            "https://controller.example/v1/routers/r%201%2Fx/rules/5"
        );

        let b = backend("http://127.0.0.1:9696");
        let router = RouterId::new("abc").unwrap();
        assert_eq!(
            b.rules_url(&router, None).as_str(),
            "http://127.0.0.1:9696/routers/abc/rules"
        );
    }

    #[test]
    fn invalid_base_url() {
        HttpBackend::new("not a url", Codec::Json, None, Duration::from_secs(1)).unwrap_err();
        HttpBackend::new("mailto:ops@example.com", Codec::Json, None, Duration::from_secs(1))
            .unwrap_err();
    }

    #[test]
    fn codec_parse() {
        assert_eq!("JSON".parse::<Codec>().unwrap(), Codec::Json);
        assert_eq!("bincode".parse::<Codec>().unwrap(), Codec::Bincode);
        "xml".parse::<Codec>().unwrap_err();
    }
}
