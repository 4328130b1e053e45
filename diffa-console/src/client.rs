//! REST client for the Diffa agent
//!
//! One POST opens a diffs session; the `Location` it answers with scopes the
//! reads that follow:
//! - `POST {agent}/rest/diffs/sessions`
//! - `GET  {session}/zoom?range-start&range-end&bucketing`
//! - `GET  {session}/?pairKey&range-start&range-end`
//!
//! Calls either succeed or fail outright: no retry, no timeout beyond what
//! the underlying `reqwest::Client` was built with.

use crate::error::{ConsoleError, Result};
use crate::models::{decode_diff_records, DiffRecord, ZoomedCounts};
use crate::timefmt::TimeRange;
use reqwest::{Method, Url};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

const SESSIONS_PATH: &str = "rest/diffs/sessions";

/// What came back from one exchange with the agent
#[derive(Debug, Clone)]
pub struct AgentResponse {
    pub status: u16,
    /// Header names are lowercase
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl AgentResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

pub struct DiffsClient {
    http: reqwest::Client,
    agent_url: Url,
    session_url: Url,
}

impl DiffsClient {
    /// Open a session on the agent with a default HTTP client
    pub async fn connect(agent_url: &str) -> Result<Self> {
        Self::connect_with(reqwest::Client::new(), agent_url).await
    }

    pub async fn connect_with(http: reqwest::Client, agent_url: &str) -> Result<Self> {
        let agent_url = normalize_agent_url(agent_url)?;
        let sessions_url = agent_url
            .join(SESSIONS_PATH)
            .map_err(|e| ConsoleError::InvalidUrl(format!("{}: {}", agent_url, e)))?;

        let response = send(&http, Method::POST, sessions_url.clone()).await?;
        let location = response.header("location").ok_or_else(|| {
            ConsoleError::MalformedResponse(format!(
                "session response from {} has no Location header",
                sessions_url
            ))
        })?;
        // the agent may answer with a path relative to the sessions resource
        let session_url = sessions_url
            .join(location)
            .map_err(|e| ConsoleError::MalformedResponse(format!("bad session Location '{}': {}", location, e)))?;

        info!("opened diffs session {} (HTTP {})", session_url, response.status);
        Ok(Self {
            http,
            agent_url,
            session_url,
        })
    }

    pub fn agent_url(&self) -> &Url {
        &self.agent_url
    }

    pub fn session_url(&self) -> &Url {
        &self.session_url
    }

    /// Bucketed counts per pairing, `bucket_seconds` wide, over `range`
    pub async fn get_diffs_zoomed(&self, range: &TimeRange, bucket_seconds: u64) -> Result<ZoomedCounts> {
        let mut url = self.session_endpoint("zoom")?;
        url.query_pairs_mut()
            .append_pair("range-start", &range.wire_start())
            .append_pair("range-end", &range.wire_end())
            .append_pair("bucketing", &bucket_seconds.to_string());

        let response = send(&self.http, Method::GET, url).await?;
        ZoomedCounts::from_json(&response.body)
    }

    /// Raw differences for one pairing over `range`
    pub async fn get_diffs(&self, pair_key: &str, range: &TimeRange) -> Result<Vec<DiffRecord>> {
        let mut url = self.session_endpoint("")?;
        url.query_pairs_mut()
            .append_pair("pairKey", pair_key)
            .append_pair("range-start", &range.wire_start())
            .append_pair("range-end", &range.wire_end());

        let response = send(&self.http, Method::GET, url).await?;
        decode_diff_records(&response.body)
    }

    // {session}/{segment}; an empty segment leaves a trailing slash
    fn session_endpoint(&self, segment: &str) -> Result<Url> {
        let mut url = self.session_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| ConsoleError::InvalidUrl(format!("session URL {} cannot carry a path", self.session_url)))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }
}

impl fmt::Debug for DiffsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DiffsClient").field(&self.agent_url.as_str()).finish()
    }
}

/// Parse the agent base URL, making sure it ends in `/` so relative joins
/// land underneath it.
pub fn normalize_agent_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let url = Url::parse(&with_slash).map_err(|e| ConsoleError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ConsoleError::InvalidUrl(format!("{}: not a base URL", raw)));
    }
    Ok(url)
}

async fn send(http: &reqwest::Client, method: Method, url: Url) -> Result<AgentResponse> {
    debug!("{} {}", method, url);
    let response = http.request(method.clone(), url.clone()).send().await?;

    let status = response.status();
    let headers: HashMap<String, String> = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
        })
        .collect();
    let body = response.text().await?;
    debug!(status = status.as_u16(), headers = ?headers, body = %body, "agent response");

    if !status.is_success() {
        return Err(ConsoleError::Status {
            method: method.to_string(),
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(AgentResponse {
        status: status.as_u16(),
        headers,
        body,
    })
}
