use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};

/// Identity of a differing record, as reported by the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectId {
    pub id: String,
}

/// One record-level difference (list mode)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffRecord {
    pub obj_id: ObjectId,
    pub upstream_vsn: Option<String>,
    pub downstream_vsn: Option<String>,
    /// Kept in the agent's own textual form
    pub detected_at: String,
}

/// Bucketed diff counts per pairing, in the order the agent returned them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoomedCounts {
    series: Vec<(String, Vec<u64>)>,
}

impl ZoomedCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pair_key: impl Into<String>, counts: Vec<u64>) {
        self.series.push((pair_key.into(), counts));
    }

    /// Decode a zoom payload: a JSON object of pair key -> array of counts.
    /// Key order is kept as it appears in the body.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        let object = value.as_object().ok_or_else(|| {
            ConsoleError::MalformedResponse(format!(
                "zoom payload should be an object, got {}",
                json_kind(&value)
            ))
        })?;

        let mut counts = Self::new();
        for (pair_key, buckets) in object {
            let buckets = buckets.as_array().ok_or_else(|| {
                ConsoleError::MalformedResponse(format!(
                    "buckets for '{}' should be an array, got {}",
                    pair_key,
                    json_kind(buckets)
                ))
            })?;
            let parsed = buckets
                .iter()
                .map(|b| {
                    b.as_u64().ok_or_else(|| {
                        ConsoleError::MalformedResponse(format!(
                            "bucket count for '{}' should be a non-negative integer, got {}",
                            pair_key, b
                        ))
                    })
                })
                .collect::<Result<Vec<u64>>>()?;
            counts.push(pair_key.clone(), parsed);
        }
        Ok(counts)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.series.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn pair_keys(&self) -> Vec<&str> {
        self.series.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Same series ordered by pair key, for deterministic output
    pub fn sorted(mut self) -> Self {
        self.series.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Decode a list payload into records
pub fn decode_diff_records(body: &str) -> Result<Vec<DiffRecord>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_array() {
        return Err(ConsoleError::MalformedResponse(format!(
            "diff listing should be an array, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| ConsoleError::MalformedResponse(format!("unexpected diff record shape: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_preserves_agent_order() {
        let counts = ZoomedCounts::from_json(r#"{"zeta":[1,2],"alpha":[0],"mid":[]}"#).unwrap();
        assert_eq!(counts.pair_keys(), vec!["zeta", "alpha", "mid"]);
        let (first_key, first_series) = counts.iter().next().unwrap();
        assert_eq!((first_key, first_series), ("zeta", &[1u64, 2][..]));

        let sorted = counts.sorted();
        assert_eq!(sorted.pair_keys(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_zoom_rejects_wrong_shapes() {
        for body in [r#"[1,2,3]"#, r#"{"a":3}"#, r#"{"a":[1,-2]}"#, r#"{"a":[1.5]}"#] {
            assert!(
                matches!(ZoomedCounts::from_json(body), Err(ConsoleError::MalformedResponse(_))),
                "{} should be malformed",
                body
            );
        }
        assert!(matches!(ZoomedCounts::from_json("not json"), Err(ConsoleError::Decode(_))));
    }

    #[test]
    fn test_decode_records_with_nulls() {
        let body = r#"[
            {"objId": {"id": "order-1", "pair": {"key": "orders"}}, "upstreamVsn": "v1", "downstreamVsn": null, "detectedAt": "2024-01-01T03:00:00.000Z"},
            {"objId": {"id": "order-2"}, "upstreamVsn": null, "downstreamVsn": "v2", "detectedAt": "2024-01-01T04:00:00.000Z"}
        ]"#;
        let records = decode_diff_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].obj_id.id, "order-1");
        assert_eq!(records[0].upstream_vsn.as_deref(), Some("v1"));
        assert_eq!(records[0].downstream_vsn, None);
        assert_eq!(records[1].upstream_vsn, None);
    }

    #[test]
    fn test_decode_records_missing_fields() {
        assert!(matches!(
            decode_diff_records(r#"[{"objId": {"id": "x"}}]"#),
            Err(ConsoleError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode_diff_records(r#"{"objId": {"id": "x"}}"#),
            Err(ConsoleError::MalformedResponse(_))
        ));
    }
}
