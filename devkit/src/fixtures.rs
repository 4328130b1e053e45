/*!
Builders for agent payloads

Produce JSON shaped the way the agent sends it:
- zoom payloads: object of pair key -> bucket counts, keys in insertion order
- diff records: `{objId: {id}, upstreamVsn, downstreamVsn, detectedAt}`
*/

use serde_json::{json, Map, Value};

/// Zoom payload with pairings kept in the order they were added
#[derive(Debug, Clone, Default)]
pub struct ZoomFixture {
    series: Vec<(String, Vec<u64>)>,
}

impl ZoomFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pairing(mut self, pair_key: &str, counts: Vec<u64>) -> Self {
        self.series.push((pair_key.to_string(), counts));
        self
    }

    /// `columns` buckets cycling through `pattern`
    pub fn repeating(self, pair_key: &str, columns: usize, pattern: &[u64]) -> Self {
        let counts = pattern.iter().copied().cycle().take(columns).collect();
        self.pairing(pair_key, counts)
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (pair_key, counts) in &self.series {
            object.insert(pair_key.clone(), json!(counts));
        }
        Value::Object(object)
    }
}

/// One diff record as the agent lists it
#[derive(Debug, Clone)]
pub struct DiffRecordFixture {
    pair_key: String,
    id: String,
    upstream_vsn: Option<String>,
    downstream_vsn: Option<String>,
    detected_at: String,
}

impl DiffRecordFixture {
    /// Defaults to a data diff detected at the start of 2024
    pub fn new(pair_key: &str, id: &str) -> Self {
        Self {
            pair_key: pair_key.to_string(),
            id: id.to_string(),
            upstream_vsn: Some("up-1".to_string()),
            downstream_vsn: Some("down-1".to_string()),
            detected_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    pub fn upstream(mut self, vsn: Option<&str>) -> Self {
        self.upstream_vsn = vsn.map(String::from);
        self
    }

    pub fn downstream(mut self, vsn: Option<&str>) -> Self {
        self.downstream_vsn = vsn.map(String::from);
        self
    }

    pub fn detected_at(mut self, detected_at: &str) -> Self {
        self.detected_at = detected_at.to_string();
        self
    }

    pub fn pair_key(&self) -> &str {
        &self.pair_key
    }

    pub fn to_json(&self) -> Value {
        json!({
            "objId": { "pair": { "key": self.pair_key }, "id": self.id },
            "upstreamVsn": self.upstream_vsn,
            "downstreamVsn": self.downstream_vsn,
            "detectedAt": self.detected_at,
        })
    }
}
