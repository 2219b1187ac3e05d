//! Persisted session transcript model.
//!
//! Field names mirror the stored documents exactly (`sessionId`,
//! `conversationHistory`, ...). Display logic elsewhere in the system
//! round-trips the `YYYY-MM-DD HH:MM:SS` timestamp strings, so timestamps
//! are persisted as formatted text rather than native datetimes.

use chrono::{FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Civil offset the deployment records timestamps in (UTC+5:30, no DST).
const LOCAL_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// One user/agent exchange. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub timestamp: String,
    pub user: String,
    pub agent: String,
    pub language: String,
}

/// Full per-session record; rewritten whole on every successful turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Caller-chosen primary key.
    pub session_id: String,

    /// Chronological, append-only transcript.
    #[serde(default, deserialize_with = "lenient_history")]
    pub conversation_history: Vec<Turn>,

    /// Last-seen caller contact; overwritten each turn, never merged.
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub last_updated: String,

    #[serde(default)]
    pub language: String,
}

/// A stored history that is not list-shaped is discarded rather than failing
/// the request; malformed entries inside a list are skipped the same way.
fn lenient_history<'de, D>(deserializer: D) -> Result<Vec<Turn>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(entries) => Ok(entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// Current wall-clock time in the deployment's fixed offset, formatted the
/// way the persisted contract requires.
pub fn now_timestamp() -> String {
    let offset = FixedOffset::east_opt(LOCAL_OFFSET_SECS).expect("offset within bounds");
    Utc::now()
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_timestamp_format(ts: &str) {
        let bytes = ts.as_bytes();
        assert_eq!(bytes.len(), 19, "unexpected timestamp length: {}", ts);
        for (i, b) in bytes.iter().enumerate() {
            match i {
                4 | 7 => assert_eq!(*b, b'-', "bad timestamp: {}", ts),
                10 => assert_eq!(*b, b' ', "bad timestamp: {}", ts),
                13 | 16 => assert_eq!(*b, b':', "bad timestamp: {}", ts),
                _ => assert!(b.is_ascii_digit(), "bad timestamp: {}", ts),
            }
        }
    }

    #[test]
    fn now_timestamp_matches_persisted_pattern() {
        assert_timestamp_format(&now_timestamp());
    }

    #[test]
    fn now_timestamp_is_non_decreasing() {
        let first = now_timestamp();
        let second = now_timestamp();
        // Lexicographic order equals chronological order for this format.
        assert!(first <= second);
    }

    #[test]
    fn record_round_trips_wire_field_names() {
        let record = SessionRecord {
            session_id: "s1".to_string(),
            conversation_history: vec![Turn {
                timestamp: "2025-01-01 10:00:00".to_string(),
                user: "Hi".to_string(),
                agent: "Hello!".to_string(),
                language: "en-US".to_string(),
            }],
            email: "user@example.com".to_string(),
            last_updated: "2025-01-01 10:00:00".to_string(),
            language: "en-US".to_string(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["sessionId"], "s1");
        assert_eq!(value["conversationHistory"][0]["user"], "Hi");
        assert_eq!(value["lastUpdated"], "2025-01-01 10:00:00");
    }

    #[test]
    fn non_list_history_normalizes_to_empty() {
        let record: SessionRecord = serde_json::from_value(json!({
            "sessionId": "s1",
            "conversationHistory": "corrupted",
            "email": "",
            "lastUpdated": "",
            "language": "en-US"
        }))
        .unwrap();
        assert!(record.conversation_history.is_empty());
    }

    #[test]
    fn malformed_history_entries_are_skipped() {
        let record: SessionRecord = serde_json::from_value(json!({
            "sessionId": "s1",
            "conversationHistory": [
                { "timestamp": "t", "user": "u", "agent": "a", "language": "l" },
                42
            ]
        }))
        .unwrap();
        assert_eq!(record.conversation_history.len(), 1);
        assert_eq!(record.conversation_history[0].user, "u");
    }

    #[test]
    fn missing_history_defaults_to_empty() {
        let record: SessionRecord =
            serde_json::from_value(json!({ "sessionId": "s1" })).unwrap();
        assert!(record.conversation_history.is_empty());
        assert!(record.email.is_empty());
    }
}
