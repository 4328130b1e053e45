/*!
# Diffa DevKit - Stub agent and fixtures for console development

Library for exercising the console without a real Diffa agent:
- Stub agent serving the diffs session REST API on localhost
- Fixture builders for zoom payloads and diff records
- Test harness recording every request the console sends
*/

pub mod fixtures;
pub mod stub_agent;
pub mod test_utils;

pub use fixtures::{DiffRecordFixture, ZoomFixture};
pub use stub_agent::{LocationStyle, RecordedRequest, StubAgent, StubAgentConfig};
pub use test_utils::TestHarness;
