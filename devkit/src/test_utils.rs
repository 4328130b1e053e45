/*!
Test harness for the console

Starts a stub agent with the given fixtures and gives assertions over what
the console asked for.
*/

use crate::fixtures::{DiffRecordFixture, ZoomFixture};
use crate::stub_agent::{LocationStyle, RecordedRequest, StubAgent, StubAgentConfig};
use anyhow::Result;

pub struct TestHarness {
    pub agent: StubAgent,
}

impl TestHarness {
    pub async fn start(config: StubAgentConfig) -> Result<Self> {
        env_logger::try_init().ok(); // test logging, first caller wins
        let agent = StubAgent::start(config).await?;
        Ok(Self { agent })
    }

    pub async fn with_zoom(zoom: ZoomFixture) -> Result<Self> {
        Self::start(StubAgentConfig {
            zoom,
            ..Default::default()
        })
        .await
    }

    pub async fn with_records(records: Vec<DiffRecordFixture>) -> Result<Self> {
        Self::start(StubAgentConfig {
            records,
            ..Default::default()
        })
        .await
    }

    pub async fn with_location(location: LocationStyle) -> Result<Self> {
        Self::start(StubAgentConfig {
            location,
            ..Default::default()
        })
        .await
    }

    pub fn agent_url(&self) -> String {
        self.agent.url()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.agent.requests()
    }

    /// Last request whose path ends with `suffix`
    pub fn last_request_to(&self, suffix: &str) -> Option<RecordedRequest> {
        self.requests().into_iter().rev().find(|r| r.path.ends_with(suffix))
    }

    /// Asserts the exact sequence of (method, path suffix) the console sent
    pub fn assert_sequence(&self, expected: &[(&str, &str)]) {
        let requests = self.requests();
        assert_eq!(
            requests.len(),
            expected.len(),
            "expected {} requests, got {:?}",
            expected.len(),
            requests
        );
        for (request, (method, suffix)) in requests.iter().zip(expected) {
            assert_eq!(request.method, *method, "method of {:?}", request);
            assert!(request.path.ends_with(suffix), "{} should end with {}", request.path, suffix);
        }
    }
}
