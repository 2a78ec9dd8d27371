use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

/// `{success, data, timestamp}` for a record that was scraped.
pub fn success<T: Serialize>(data: &T) -> serde_json::Result<Value> {
    Ok(json!({
        "success": true,
        "data": serde_json::to_value(data)?,
        "timestamp": timestamp(),
    }))
}

/// `{success, error, kind, timestamp}` for a failed command.
pub fn failure(kind: &str, message: &str) -> Value {
    json!({
        "success": false,
        "error": message,
        "kind": kind,
        "timestamp": timestamp(),
    })
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use animeworld_core::{EmbedResult, EmbedServer};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn success_wraps_camel_case_record() {
        let record = EmbedResult {
            id: "show-1x1".into(),
            servers: vec![EmbedServer {
                server: 1,
                name: "Server 1".into(),
                url: "https://player.example/1".into(),
            }],
        };
        let value = success(&record).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["servers"][0]["url"], "https://player.example/1");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn failure_carries_message_and_kind() {
        let value = failure("not_found", "http status 404");
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "http status 404");
        assert_eq!(value["kind"], "not_found");
        assert!(value.get("data").is_none());
    }
}
