//! Parsing of prompt lines into command envelopes.
//!
//! A line is `COMMAND [json-payload]`, for example
//! `UPDATE_TICKER {"message":"hello","active":true}`. Lowercase aliases
//! (`ticker`, `popup`, `brb`, `countdown`, `stats`, `trigger`, `state`,
//! `ping`) stand for the full command names.

use onair_server::infrastructure::dto::websocket::CommandEnvelope;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("empty command")]
    Empty,

    #[error("payload is not valid JSON: {0}")]
    InvalidPayload(String),
}

/// Map a shorthand alias to its command name; anything else is sent verbatim.
fn resolve_alias(word: &str) -> &str {
    match word {
        "ticker" => "UPDATE_TICKER",
        "popup" => "UPDATE_POPUP",
        "brb" => "UPDATE_BRB",
        "countdown" => "UPDATE_COUNTDOWN",
        "stats" => "UPDATE_STATS",
        "trigger" => "TRIGGER_POPUP",
        "state" => "GET_STATE",
        "ping" => "PING",
        other => other,
    }
}

/// Build the envelope for one prompt line, attaching `token` if given.
pub fn parse_line(line: &str, token: Option<&str>) -> Result<CommandEnvelope, LineError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    if word.is_empty() {
        return Err(LineError::Empty);
    }

    let payload = if rest.is_empty() {
        None
    } else {
        Some(
            serde_json::from_str::<Value>(rest)
                .map_err(|e| LineError::InvalidPayload(e.to_string()))?,
        )
    };

    Ok(CommandEnvelope::new(
        resolve_alias(word),
        payload,
        token.map(str::to_string),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_command_with_payload() {
        // テスト項目: コマンド名と JSON payload が封筒に変換され、トークンが付与される
        // given (前提条件):
        let line = r#"UPDATE_TICKER {"message": "hello world", "active": true}"#;

        // when (操作):
        let envelope = parse_line(line, Some("secret")).unwrap();

        // then (期待する結果):
        assert_eq!(envelope.r#type.as_deref(), Some("UPDATE_TICKER"));
        assert_eq!(
            envelope.payload,
            Some(json!({"message": "hello world", "active": true}))
        );
        assert_eq!(envelope.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_parse_alias_without_payload() {
        // テスト項目: 省略形のコマンドが正式名に変換される
        // given (前提条件):
        let cases = [
            ("ping", "PING"),
            ("state", "GET_STATE"),
            ("  trigger  ", "TRIGGER_POPUP"),
            ("stats", "UPDATE_STATS"),
        ];

        for (line, expected) in cases {
            // when (操作):
            let envelope = parse_line(line, None).unwrap();

            // then (期待する結果):
            assert_eq!(envelope.r#type.as_deref(), Some(expected));
            assert_eq!(envelope.payload, None);
            assert_eq!(envelope.token, None);
        }
    }

    #[test]
    fn test_unknown_words_are_sent_verbatim() {
        // テスト項目: 未知のコマンド名はそのまま送られる（判定はサーバー側）
        // given (前提条件):
        let line = "DANCE";

        // when (操作):
        let envelope = parse_line(line, None).unwrap();

        // then (期待する結果):
        assert_eq!(envelope.r#type.as_deref(), Some("DANCE"));
    }

    #[test]
    fn test_parse_errors() {
        // テスト項目: 空行や不正な JSON payload はエラーになる
        // given (前提条件):

        // when (操作) / then (期待する結果):
        assert_eq!(parse_line("   ", None), Err(LineError::Empty));
        assert!(matches!(
            parse_line("ticker {message: hi}", None),
            Err(LineError::InvalidPayload(_))
        ));
    }
}
